//! Report overview of campaigns that have been sent

use std::path::{Path, PathBuf};

use mailshot_api::models::Campaign;
use mailshot_api::ApiClient;

use super::PageStatus;
use crate::download::export_report;
use crate::filter::reportable;

pub const LOAD_ERROR: &str = "Erro ao carregar campanhas";
pub const EXPORT_ERROR: &str = "Erro ao exportar relatório";

#[derive(Debug, Default)]
pub struct ReportsPage {
    pub status: PageStatus,
    /// Sending and completed campaigns only
    pub campaigns: Vec<Campaign>,
}

impl ReportsPage {
    pub async fn mount(&mut self, api: &ApiClient) {
        self.status.start();
        match api.campaigns().list().await {
            Ok(campaigns) => {
                self.campaigns = reportable(campaigns);
                tracing::debug!("{} campaigns with reports", self.campaigns.len());
                self.status.finish();
            }
            Err(e) => {
                tracing::error!("Failed to load campaigns: {}", e);
                self.status.fail_request(LOAD_ERROR, &e);
            }
        }
    }

    pub async fn export(&mut self, api: &ApiClient, id: u64, dir: &Path) -> Option<PathBuf> {
        let title = self
            .campaigns
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.title.clone());
        self.status.start();
        match export_report(api, id, title.as_deref(), dir).await {
            Ok(path) => {
                self.status.succeed(format!("Relatório salvo em {}", path.display()));
                Some(path)
            }
            Err(e) => {
                tracing::error!("Failed to export report of campaign {}: {}", id, e);
                self.status.fail_request(EXPORT_ERROR, &e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mailshot_api::io::{HttpResponse, Method, MockHttpClient};

    use super::super::testing::{api, CAMPAIGNS_JSON};
    use super::*;

    #[tokio::test]
    async fn keeps_sending_and_completed_only() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Box::pin(async { Ok(HttpResponse::json(200, CAMPAIGNS_JSON)) }));

        let mut page = ReportsPage::default();
        page.mount(&api(mock)).await;

        let titles: Vec<_> = page.campaigns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C"]);
        assert_eq!(page.campaigns[0].report_or_default().opens, 5);
        assert_eq!(page.campaigns[1].report_or_default().sends, 0);
    }

    #[tokio::test]
    async fn load_failure_shows_generic_message() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Box::pin(async { Ok(HttpResponse::json(200, "not json")) }));

        let mut page = ReportsPage::default();
        page.mount(&api(mock)).await;
        assert_eq!(page.status.error.as_deref(), Some(LOAD_ERROR));
    }

    #[tokio::test]
    async fn export_names_file_after_listed_title() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| req.method == Method::Get && req.url.ends_with("/campanhas/"))
            .returning(|_| Box::pin(async { Ok(HttpResponse::json(200, CAMPAIGNS_JSON)) }));
        mock.expect_execute()
            .withf(|req| req.url.ends_with("/exportar_relatorio/"))
            .returning(|_| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 200,
                        body: b"x".to_vec(),
                        content_type: Some("text/csv".to_string()),
                        content_disposition: Some("attachment; filename=servidor.csv".to_string()),
                    })
                })
            });

        let dir = tempfile::tempdir().unwrap();
        let api = api(mock);
        let mut page = ReportsPage::default();
        page.mount(&api).await;
        let listed = page.campaigns[0].id;

        let path = page.export(&api, listed, dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("relatorio_B.csv"));

        let path = page.export(&api, 999, dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("servidor.csv"));
    }
}
