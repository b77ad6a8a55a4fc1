//! Campaign composer
//!
//! The draft lives in a descriptor-driven [`Form`] plus the group
//! selection. While the all-clients flag is set the group selector is
//! disabled: toggles are ignored but the earlier selection is kept and
//! sent as-is.
//!
//! "Send test" creates the campaign as a draft the first time it is used
//! and remembers its id. A later submit updates that campaign instead of
//! creating a second one, and attachments already uploaded are not sent
//! again.

use std::time::Duration;

use mailshot_api::models::{CampaignDraft, CampaignStatus, Client, Group};
use mailshot_api::{ApiClient, ApiError, FileUpload};

use super::{PageStatus, Redirect};
use crate::form::{FieldError, FieldKind, FieldSpec, Form, Validator};
use crate::preview::render_placeholders;
use crate::router::Route;
use crate::upload::UploadPlan;

pub const LOAD_ERROR: &str = "Erro ao carregar dados. Tente novamente mais tarde.";
pub const SUCCESS: &str = "Campanha criada com sucesso!";
pub const SUBMIT_ERROR: &str = "Erro ao criar campanha. Verifique os dados e tente novamente.";
pub const TEST_EMAIL_REQUIRED: &str = "Informe um email para enviar o teste";
pub const TEST_ERROR: &str = "Erro ao enviar email de teste. Tente novamente mais tarde.";

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "titulo",
        label: "Título",
        kind: FieldKind::Text,
        validators: &[Validator::Required],
    },
    FieldSpec {
        name: "assunto",
        label: "Assunto",
        kind: FieldKind::Text,
        validators: &[Validator::Required],
    },
    FieldSpec {
        name: "corpo",
        label: "Conteúdo",
        kind: FieldKind::Html,
        validators: &[Validator::Required],
    },
    FieldSpec {
        name: "todos_clientes",
        label: "Enviar para todos os clientes ativos",
        kind: FieldKind::Checkbox,
        validators: &[],
    },
    FieldSpec {
        name: "email_teste",
        label: "Email para teste",
        kind: FieldKind::Email,
        validators: &[Validator::EmailFormat],
    },
];

/// Subject and body with placeholders filled from the sample client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub subject: String,
    pub body: String,
}

#[derive(Debug)]
pub struct NewCampaignPage {
    pub form: Form,
    pub status: PageStatus,
    pub groups: Vec<Group>,
    pub sample: Option<Client>,
    selected_groups: Vec<u64>,
    pending_attachments: Vec<FileUpload>,
    created_id: Option<u64>,
}

impl Default for NewCampaignPage {
    fn default() -> Self {
        Self::new()
    }
}

impl NewCampaignPage {
    pub fn new() -> Self {
        Self {
            form: Form::new(FIELDS),
            status: PageStatus::default(),
            groups: Vec::new(),
            sample: None,
            selected_groups: Vec::new(),
            pending_attachments: Vec::new(),
            created_id: None,
        }
    }

    /// Load the group choices and the first client as preview sample
    pub async fn mount(&mut self, api: &ApiClient) {
        self.status.start();
        let groups = match api.groups().list().await {
            Ok(groups) => groups,
            Err(e) => {
                tracing::error!("Failed to load groups: {}", e);
                self.status.fail_request(LOAD_ERROR, &e);
                return;
            }
        };
        match api.clients().list().await {
            Ok(clients) => {
                self.groups = groups;
                self.sample = clients.into_iter().next();
                self.status.finish();
            }
            Err(e) => {
                tracing::error!("Failed to load preview sample: {}", e);
                self.groups = groups;
                self.status.fail_request(LOAD_ERROR, &e);
            }
        }
    }

    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), FieldError> {
        self.form.set(name, raw)
    }

    pub fn all_clients(&self) -> bool {
        self.form.flag("todos_clientes")
    }

    pub fn group_selector_enabled(&self) -> bool {
        !self.all_clients()
    }

    /// Toggle a group in the selection; ignored while the selector is disabled
    pub fn toggle_group(&mut self, id: u64) -> bool {
        if !self.group_selector_enabled() {
            tracing::debug!("Group selector disabled, ignoring group {}", id);
            return false;
        }
        if let Some(pos) = self.selected_groups.iter().position(|g| *g == id) {
            self.selected_groups.remove(pos);
        } else {
            self.selected_groups.push(id);
        }
        true
    }

    pub fn selected_groups(&self) -> &[u64] {
        &self.selected_groups
    }

    pub fn attach(&mut self, file: FileUpload) {
        self.pending_attachments.push(file);
    }

    /// Files not yet uploaded, in upload order
    pub fn pending_attachments(&self) -> &[FileUpload] {
        &self.pending_attachments
    }

    /// Id of the campaign once it exists on the backend
    pub fn created_id(&self) -> Option<u64> {
        self.created_id
    }

    pub fn preview(&self) -> Preview {
        Preview {
            subject: render_placeholders(self.form.text("assunto"), self.sample.as_ref()),
            body: render_placeholders(self.form.text("corpo"), self.sample.as_ref()),
        }
    }

    pub fn draft(&self) -> CampaignDraft {
        CampaignDraft {
            title: self.form.text("titulo").to_string(),
            subject: self.form.text("assunto").to_string(),
            body: self.form.text("corpo").to_string(),
            groups: self.selected_groups.clone(),
            all_clients: self.all_clients(),
            status: CampaignStatus::Draft,
        }
    }

    /// Create the campaign (or update the one already created when
    /// `update_existing`), then upload the pending attachments in order.
    async fn save(&mut self, api: &ApiClient, update_existing: bool) -> Result<u64, ApiError> {
        let draft = self.draft();
        let id = match self.created_id {
            Some(id) if update_existing => api.campaigns().update(id, &draft).await?.id,
            Some(id) => id,
            None => {
                let campaign = api.campaigns().create(&draft).await?;
                tracing::info!("Created campaign {} ({})", campaign.id, campaign.title);
                self.created_id = Some(campaign.id);
                campaign.id
            }
        };

        let plan = UploadPlan::new(std::mem::take(&mut self.pending_attachments));
        if plan.is_empty() {
            return Ok(id);
        }
        let mut report = plan.run(api, id).await;
        self.pending_attachments = report.remaining();
        match report.failure.take() {
            Some(failure) => Err(failure.error),
            None => Ok(id),
        }
    }

    pub async fn submit(&mut self, api: &ApiClient, delay: Duration) -> Option<Redirect> {
        if let Some(message) = self.form.first_error() {
            self.status.fail(message);
            return None;
        }

        self.status.start();
        match self.save(api, true).await {
            Ok(id) => {
                tracing::info!("Campaign {} saved", id);
                self.status.succeed(SUCCESS);
                Some(Redirect {
                    to: Route::Home,
                    after: delay,
                })
            }
            Err(e) => {
                tracing::error!("Failed to create campaign: {}", e);
                self.status.fail_request(SUBMIT_ERROR, &e);
                None
            }
        }
    }

    pub async fn send_test(&mut self, api: &ApiClient) {
        let email = self.form.text("email_teste").to_string();
        if email.is_empty() {
            self.status.fail(TEST_EMAIL_REQUIRED);
            return;
        }
        if let Some(message) = self.form.first_error() {
            self.status.fail(message);
            return;
        }

        self.status.start();
        let result = match self.save(api, false).await {
            Ok(id) => api.campaigns().send_test(id, &email).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(_) => self.status.succeed(format!("Email de teste enviado para {}", email)),
            Err(e) => {
                tracing::error!("Failed to send test email to {}: {}", email, e);
                self.status.fail_request(TEST_ERROR, &e);
            }
        }
    }
}
