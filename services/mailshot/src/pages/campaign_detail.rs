//! One campaign with its report and actions

use std::path::{Path, PathBuf};

use mailshot_api::models::Campaign;
use mailshot_api::ApiClient;

use super::PageStatus;
use crate::download::export_report;
use crate::form::{FieldError, FieldKind, FieldSpec, Form, Validator};

pub const LOAD_ERROR: &str = "Erro ao carregar detalhes da campanha";
pub const START_SUCCESS: &str = "Envio de campanha iniciado com sucesso!";
pub const START_ERROR: &str = "Erro ao iniciar envio da campanha";
pub const SCHEDULE_SUCCESS: &str = "Campanha agendada com sucesso";
pub const SCHEDULE_ERROR: &str = "Erro ao agendar campanha";
pub const EXPORT_ERROR: &str = "Erro ao exportar relatório";

pub const SCHEDULE_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "data_agendamento",
    label: "Data de agendamento",
    kind: FieldKind::Date,
    validators: &[Validator::Required],
}];

#[derive(Debug)]
pub struct CampaignDetailPage {
    pub id: u64,
    pub campaign: Option<Campaign>,
    pub status: PageStatus,
    pub schedule_form: Form,
}

impl CampaignDetailPage {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            campaign: None,
            status: PageStatus::default(),
            schedule_form: Form::new(SCHEDULE_FIELDS),
        }
    }

    pub async fn mount(&mut self, api: &ApiClient) {
        self.status.start();
        if self.refresh(api).await {
            self.status.finish();
        }
    }

    async fn refresh(&mut self, api: &ApiClient) -> bool {
        match api.campaigns().get(self.id).await {
            Ok(campaign) => {
                self.campaign = Some(campaign);
                true
            }
            Err(e) => {
                tracing::error!("Failed to load campaign {}: {}", self.id, e);
                self.status.fail_request(LOAD_ERROR, &e);
                false
            }
        }
    }

    /// The start action is only offered for drafts and scheduled campaigns
    pub fn can_start_send(&self) -> bool {
        self.campaign
            .as_ref()
            .is_some_and(|c| c.status.can_start_send())
    }

    pub async fn start_send(&mut self, api: &ApiClient) {
        if self.campaign.is_some() && !self.can_start_send() {
            tracing::warn!("Campaign {} cannot start sending in its current status", self.id);
            self.status.fail(START_ERROR);
            return;
        }

        self.status.start();
        match api.campaigns().start_send(self.id).await {
            Ok(ack) => {
                tracing::info!("Started send of campaign {}: {}", self.id, ack.status);
                if self.refresh(api).await {
                    self.status.succeed(START_SUCCESS);
                }
            }
            Err(e) => {
                tracing::error!("Failed to start send of campaign {}: {}", self.id, e);
                self.status.fail_request(START_ERROR, &e);
            }
        }
    }

    /// Set the schedule date from RFC 3339 input
    pub fn set_schedule(&mut self, raw: &str) -> Result<(), FieldError> {
        self.schedule_form.set("data_agendamento", raw)
    }

    pub async fn schedule(&mut self, api: &ApiClient) {
        if let Some(message) = self.schedule_form.first_error() {
            self.status.fail(message);
            return;
        }
        let Some(at) = self.schedule_form.date("data_agendamento") else {
            return;
        };

        self.status.start();
        match api.campaigns().schedule(self.id, at).await {
            Ok(_) => {
                tracing::info!("Scheduled campaign {} for {}", self.id, at);
                self.schedule_form.clear();
                if self.refresh(api).await {
                    self.status.succeed(SCHEDULE_SUCCESS);
                }
            }
            Err(e) => {
                tracing::error!("Failed to schedule campaign {}: {}", self.id, e);
                self.status.fail_request(SCHEDULE_ERROR, &e);
            }
        }
    }

    /// Save the exported report under `dir`
    pub async fn export(&mut self, api: &ApiClient, dir: &Path) -> Option<PathBuf> {
        let title = self.campaign.as_ref().map(|c| c.title.clone());
        self.status.start();
        match export_report(api, self.id, title.as_deref(), dir).await {
            Ok(path) => {
                self.status.succeed(format!("Relatório salvo em {}", path.display()));
                Some(path)
            }
            Err(e) => {
                tracing::error!("Failed to export report of campaign {}: {}", self.id, e);
                self.status.fail_request(EXPORT_ERROR, &e);
                None
            }
        }
    }
}
