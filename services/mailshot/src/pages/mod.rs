//! Page view-models
//!
//! Each page owns the records it fetched plus a [`PageStatus`]. Facade
//! failures are caught here, logged with their cause and replaced by one
//! fixed message per action; callers never see an `ApiError`.

pub mod campaign_detail;
pub mod client_list;
pub mod groups;
pub mod home;
pub mod import_csv;
pub mod login;
pub mod new_campaign;
pub mod new_client;
pub mod reports;

use std::time::Duration;

use mailshot_api::{ApiClient, ApiError};

use crate::router::Route;

pub use campaign_detail::CampaignDetailPage;
pub use client_list::ClientListPage;
pub use groups::GroupsPage;
pub use home::HomePage;
pub use import_csv::ImportCsvPage;
pub use login::LoginPage;
pub use new_campaign::NewCampaignPage;
pub use new_client::NewClientPage;
pub use reports::ReportsPage;

/// The only page-level state besides fetched records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    /// The last failure was the backend refusing the session
    pub login_required: bool,
}

impl PageStatus {
    /// An action started: clear old messages
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
        self.success = None;
        self.login_required = false;
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.success = None;
        self.login_required = false;
        self.error = Some(message.into());
    }

    /// Fail with the fixed message for an action, noting a rejected session
    pub fn fail_request(&mut self, message: impl Into<String>, err: &ApiError) {
        self.fail(message);
        self.login_required = err.is_unauthorized();
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = None;
        self.login_required = false;
        self.success = Some(message.into());
    }
}

/// Navigation scheduled by a page after a successful action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub after: Duration,
}

/// Asks the user before destructive actions
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers yes without asking, for `--yes`
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!("Auto-confirming: {}", prompt);
        true
    }
}

/// A mounted page
#[derive(Debug)]
pub enum Page {
    Home(HomePage),
    Login(LoginPage),
    Clients(ClientListPage),
    NewClient(NewClientPage),
    ImportClients(ImportCsvPage),
    Groups(GroupsPage),
    NewCampaign(NewCampaignPage),
    CampaignDetail(CampaignDetailPage),
    Reports(ReportsPage),
}

impl Page {
    /// Build the page for `route` and run its mount fetches
    pub async fn open(route: Route, api: &ApiClient) -> Self {
        tracing::info!("Opening {}", route);
        match route {
            Route::Home => {
                let mut page = HomePage::default();
                page.mount(api).await;
                Page::Home(page)
            }
            Route::Login => Page::Login(LoginPage::new()),
            Route::Clients => {
                let mut page = ClientListPage::default();
                page.mount(api).await;
                Page::Clients(page)
            }
            Route::NewClient => Page::NewClient(NewClientPage::new()),
            Route::ImportClients => Page::ImportClients(ImportCsvPage::default()),
            Route::Groups => {
                let mut page = GroupsPage::new();
                page.mount(api).await;
                Page::Groups(page)
            }
            Route::NewCampaign => {
                let mut page = NewCampaignPage::new();
                page.mount(api).await;
                Page::NewCampaign(page)
            }
            Route::CampaignDetail(id) => {
                let mut page = CampaignDetailPage::new(id);
                page.mount(api).await;
                Page::CampaignDetail(page)
            }
            Route::Reports => {
                let mut page = ReportsPage::default();
                page.mount(api).await;
                Page::Reports(page)
            }
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Page::Home(_) => Route::Home,
            Page::Login(_) => Route::Login,
            Page::Clients(_) => Route::Clients,
            Page::NewClient(_) => Route::NewClient,
            Page::ImportClients(_) => Route::ImportClients,
            Page::Groups(_) => Route::Groups,
            Page::NewCampaign(_) => Route::NewCampaign,
            Page::CampaignDetail(page) => Route::CampaignDetail(page.id),
            Page::Reports(_) => Route::Reports,
        }
    }

    pub fn status(&self) -> &PageStatus {
        match self {
            Page::Home(page) => &page.status,
            Page::Login(page) => &page.status,
            Page::Clients(page) => &page.status,
            Page::NewClient(page) => &page.status,
            Page::ImportClients(page) => &page.status,
            Page::Groups(page) => &page.status,
            Page::NewCampaign(page) => &page.status,
            Page::CampaignDetail(page) => &page.status,
            Page::Reports(page) => &page.status,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use mailshot_api::io::MockHttpClient;
    use mailshot_api::{ApiClient, Session};

    pub fn api(mock: MockHttpClient) -> ApiClient {
        ApiClient::new("http://localhost:8000/api", Session::in_memory(), Arc::new(mock)).unwrap()
    }

    pub const CLIENTS_JSON: &str = r#"[
        {"id": 1, "nome": "João", "sobrenome": "Silva", "email": "joao@x.com", "ativo": true},
        {"id": 2, "nome": "Maria", "sobrenome": "Santos", "email": "maria@y.com", "ativo": true}
    ]"#;

    pub const CAMPAIGNS_JSON: &str = r#"[
        {"id": 1, "titulo": "A", "assunto": "s", "corpo": "b", "status": "rascunho", "grupos": []},
        {"id": 2, "titulo": "B", "assunto": "s", "corpo": "b", "status": "enviando", "grupos": [1],
         "relatorio": {"total_envios": 10, "total_aberturas": 5, "total_cliques": 1, "total_respostas": 0,
                       "taxa_abertura": 50.0, "taxa_clique": 10.0, "taxa_resposta": 0.0}},
        {"id": 3, "titulo": "C", "assunto": "s", "corpo": "b", "status": "concluida", "grupos": []},
        {"id": 4, "titulo": "D", "assunto": "s", "corpo": "b", "status": "cancelada", "grupos": []}
    ]"#;
}
