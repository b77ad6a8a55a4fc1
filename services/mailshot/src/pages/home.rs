//! Dashboard with client and campaign counts

use mailshot_api::ApiClient;

use super::PageStatus;
use crate::filter::CampaignTally;

pub const LOAD_ERROR: &str = "Erro ao carregar dados. Tente novamente mais tarde.";

#[derive(Debug, Default)]
pub struct HomePage {
    pub status: PageStatus,
    pub total_clients: usize,
    pub tally: CampaignTally,
}

impl HomePage {
    pub async fn mount(&mut self, api: &ApiClient) {
        self.status.start();
        let clients = match api.clients().list().await {
            Ok(clients) => clients,
            Err(e) => {
                tracing::error!("Failed to load clients for dashboard: {}", e);
                self.status.fail_request(LOAD_ERROR, &e);
                return;
            }
        };
        let campaigns = match api.campaigns().list().await {
            Ok(campaigns) => campaigns,
            Err(e) => {
                tracing::error!("Failed to load campaigns for dashboard: {}", e);
                self.status.fail_request(LOAD_ERROR, &e);
                return;
            }
        };

        self.total_clients = clients.len();
        self.tally = CampaignTally::from_campaigns(&campaigns);
        tracing::debug!(
            "Dashboard: {} clients, {:?}",
            self.total_clients,
            self.tally
        );
        self.status.finish();
    }
}
