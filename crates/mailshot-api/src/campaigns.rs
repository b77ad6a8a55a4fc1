//! `/campanhas/` endpoints

use serde::Serialize;

use crate::client::{ApiClient, Download};
use crate::models::{ActionStatus, Campaign, CampaignDraft, Timestamp};

const CAMPAIGNS: &str = "/campanhas/";

fn campaign_path(id: u64) -> String {
    format!("{}{}/", CAMPAIGNS, id)
}

#[derive(Serialize)]
struct ScheduleRequest {
    data_agendamento: String,
}

#[derive(Serialize)]
struct TestSendRequest<'a> {
    email: &'a str,
}

/// Campaign operations
#[derive(Debug, Clone, Copy)]
pub struct CampaignsApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn campaigns(&self) -> CampaignsApi<'_> {
        CampaignsApi { api: self }
    }
}

impl CampaignsApi<'_> {
    pub async fn list(&self) -> crate::Result<Vec<Campaign>> {
        self.api.get(CAMPAIGNS).await
    }

    pub async fn get(&self, id: u64) -> crate::Result<Campaign> {
        self.api.get(&campaign_path(id)).await
    }

    pub async fn create(&self, draft: &CampaignDraft) -> crate::Result<Campaign> {
        self.api.post(CAMPAIGNS, draft).await
    }

    pub async fn update(&self, id: u64, draft: &CampaignDraft) -> crate::Result<Campaign> {
        self.api.put(&campaign_path(id), draft).await
    }

    pub async fn delete(&self, id: u64) -> crate::Result<()> {
        self.api.delete(&campaign_path(id)).await
    }

    pub async fn schedule(&self, id: u64, at: Timestamp) -> crate::Result<ActionStatus> {
        let body = ScheduleRequest {
            data_agendamento: at.to_rfc3339(),
        };
        self.api
            .post(&format!("{}agendar/", campaign_path(id)), &body)
            .await
    }

    pub async fn send_test(&self, id: u64, email: &str) -> crate::Result<ActionStatus> {
        self.api
            .post(
                &format!("{}enviar_teste/", campaign_path(id)),
                &TestSendRequest { email },
            )
            .await
    }

    pub async fn start_send(&self, id: u64) -> crate::Result<ActionStatus> {
        self.api
            .post_empty(&format!("{}iniciar_envio/", campaign_path(id)))
            .await
    }

    /// Report as an opaque CSV payload
    pub async fn export_report(&self, id: u64) -> crate::Result<Download> {
        self.api
            .download(&format!("{}exportar_relatorio/", campaign_path(id)))
            .await
    }
}
