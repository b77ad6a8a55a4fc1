//! Records mirrored from the backend
//!
//! Field names are English on the Rust side and renamed to the backend's
//! wire names with serde. Only the backend may enforce invariants; these
//! are plain copies.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Backend timestamps carry their UTC offset
pub type Timestamp = DateTime<FixedOffset>;

fn default_true() -> bool {
    true
}

/// Format a percentage the way every report view shows it
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}

/// A customer on the mailing list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: u64,
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "sobrenome")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "ativo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "data_cadastro", default)]
    pub registered_at: Option<Timestamp>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for creating or replacing a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "sobrenome")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "ativo")]
    pub active: bool,
}

impl Default for NewClient {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            active: true,
        }
    }
}

/// A named, reusable set of clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "clientes", default)]
    pub client_ids: Vec<u64>,
    #[serde(rename = "clientes_count", default)]
    pub client_count: u64,
}

/// Payload for creating or replacing a group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGroup {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "clientes")]
    pub client_ids: Vec<u64>,
}

/// Lifecycle of a campaign, owned by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignStatus {
    #[default]
    #[serde(rename = "rascunho")]
    Draft,
    #[serde(rename = "agendada")]
    Scheduled,
    #[serde(rename = "enviando")]
    Sending,
    #[serde(rename = "concluida")]
    Completed,
    #[serde(rename = "cancelada")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl CampaignStatus {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "Rascunho",
            CampaignStatus::Scheduled => "Agendada",
            CampaignStatus::Sending => "Enviando",
            CampaignStatus::Completed => "Concluída",
            CampaignStatus::Cancelled => "Cancelada",
            CampaignStatus::Unknown => "Desconhecido",
        }
    }

    /// Draft, scheduled or sending
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            CampaignStatus::Draft | CampaignStatus::Scheduled | CampaignStatus::Sending
        )
    }

    pub fn is_completed(&self) -> bool {
        *self == CampaignStatus::Completed
    }

    /// A send run may only be started from draft or scheduled
    pub fn can_start_send(&self) -> bool {
        matches!(self, CampaignStatus::Draft | CampaignStatus::Scheduled)
    }

    /// Campaigns that have delivery data worth reporting
    pub fn is_reportable(&self) -> bool {
        matches!(self, CampaignStatus::Sending | CampaignStatus::Completed)
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A backend user, as nested in campaign details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// `criador` is an id in list responses and a user object in details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatorRef {
    Id(u64),
    User(UserSummary),
}

/// `grupos` is a list of ids in list responses and of groups in details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupRef {
    Id(u64),
    Group(Group),
}

impl GroupRef {
    pub fn id(&self) -> u64 {
        match self {
            GroupRef::Id(id) => *id,
            GroupRef::Group(group) => group.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            GroupRef::Id(_) => None,
            GroupRef::Group(group) => Some(&group.name),
        }
    }
}

/// A file attached to a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u64,
    #[serde(rename = "campanha")]
    pub campaign_id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "arquivo", default)]
    pub file_url: Option<String>,
}

/// Aggregate engagement for one campaign
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "total_envios", default)]
    pub sends: u64,
    #[serde(rename = "total_aberturas", default)]
    pub opens: u64,
    #[serde(rename = "total_cliques", default)]
    pub clicks: u64,
    #[serde(rename = "total_respostas", default)]
    pub replies: u64,
    #[serde(rename = "taxa_abertura", default)]
    pub open_rate: f64,
    #[serde(rename = "taxa_clique", default)]
    pub click_rate: f64,
    #[serde(rename = "taxa_resposta", default)]
    pub reply_rate: f64,
    #[serde(rename = "data_geracao", default)]
    pub generated_at: Option<Timestamp>,
}

/// Per-recipient delivery state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    #[serde(rename = "aguardando")]
    Pending,
    #[serde(rename = "enviado")]
    Sent,
    #[serde(rename = "falha")]
    Failed,
    #[serde(rename = "aberto")]
    Opened,
    #[serde(rename = "clicado")]
    Clicked,
    #[serde(rename = "respondido")]
    Replied,
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Aguardando Envio",
            DeliveryStatus::Sent => "Enviado",
            DeliveryStatus::Failed => "Falha no Envio",
            DeliveryStatus::Opened => "Aberto",
            DeliveryStatus::Clicked => "Clicado",
            DeliveryStatus::Replied => "Respondido",
            DeliveryStatus::Unknown => "Desconhecido",
        }
    }
}

/// One delivered (or pending) email, as sampled in campaign details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailDelivery {
    pub id: u64,
    #[serde(rename = "cliente_email", default)]
    pub recipient: String,
    pub status: DeliveryStatus,
    #[serde(rename = "data_envio", default)]
    pub sent_at: Option<Timestamp>,
    #[serde(rename = "data_abertura", default)]
    pub opened_at: Option<Timestamp>,
    #[serde(rename = "data_clique", default)]
    pub clicked_at: Option<Timestamp>,
    #[serde(rename = "data_resposta", default)]
    pub replied_at: Option<Timestamp>,
}

/// A bulk email with its recipients, attachments and report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: u64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "assunto")]
    pub subject: String,
    #[serde(rename = "corpo")]
    pub body: String,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(rename = "criador", default)]
    pub creator: Option<CreatorRef>,
    #[serde(rename = "criador_nome", default)]
    pub creator_name: Option<String>,
    #[serde(rename = "grupos", default)]
    pub groups: Vec<GroupRef>,
    #[serde(rename = "todos_clientes", default)]
    pub all_clients: bool,
    #[serde(rename = "data_criacao", default)]
    pub created_at: Option<Timestamp>,
    #[serde(rename = "data_atualizacao", default)]
    pub updated_at: Option<Timestamp>,
    #[serde(rename = "data_agendamento", default)]
    pub scheduled_at: Option<Timestamp>,
    #[serde(rename = "data_inicio_envio", default)]
    pub send_started_at: Option<Timestamp>,
    #[serde(rename = "data_fim_envio", default)]
    pub send_finished_at: Option<Timestamp>,
    #[serde(rename = "anexos", default)]
    pub attachments: Vec<Attachment>,
    #[serde(rename = "relatorio", default)]
    pub report: Option<Report>,
    #[serde(default)]
    pub emails: Vec<EmailDelivery>,
}

impl Campaign {
    /// Creator as shown to users: the list-view name, else the nested username
    pub fn creator_display(&self) -> Option<&str> {
        if let Some(name) = self.creator_name.as_deref() {
            return Some(name);
        }
        match &self.creator {
            Some(CreatorRef::User(user)) => Some(&user.username),
            _ => None,
        }
    }

    pub fn group_ids(&self) -> Vec<u64> {
        self.groups.iter().map(GroupRef::id).collect()
    }

    /// Report, or zeros when the backend has not produced one yet
    pub fn report_or_default(&self) -> Report {
        self.report.clone().unwrap_or_default()
    }
}

/// Payload for creating or replacing a campaign
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDraft {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "assunto")]
    pub subject: String,
    #[serde(rename = "corpo")]
    pub body: String,
    #[serde(rename = "grupos")]
    pub groups: Vec<u64>,
    #[serde(rename = "todos_clientes")]
    pub all_clients: bool,
    pub status: CampaignStatus,
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    #[serde(rename = "clientes_criados", default)]
    pub created: u64,
    #[serde(rename = "clientes_atualizados", default)]
    pub updated: u64,
    #[serde(rename = "erros", default)]
    pub errors: Vec<String>,
}

/// `{"status": "..."}` acknowledgement returned by action endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStatus {
    #[serde(default)]
    pub status: String,
}

/// Username and password exchanged for a token
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// A new backend user
#[derive(Clone, Default, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
