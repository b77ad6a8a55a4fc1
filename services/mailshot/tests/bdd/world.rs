//! BDD test world for the mailshot front-end

use std::sync::Arc;
use std::time::Duration;

use cucumber::World;
use mailshot::config::UiConfig;
use mailshot::pages::{NewCampaignPage, NewClientPage, Page, PageStatus, Redirect};
use mailshot::Shell;
use mailshot_api::{ApiClient, Session};

use crate::backend::{FakeBackend, BASE_URL};

#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct MailshotWorld {
    pub backend: Arc<FakeBackend>,
    pub session: Session,
    pub shell: Shell,
    pub page: Option<Page>,
    pub redirect: Option<Redirect>,
    pub new_client: Option<NewClientPage>,
    pub new_campaign: Option<NewCampaignPage>,
    /// Status of the last action, whichever page ran it
    pub status: PageStatus,
}

impl MailshotWorld {
    fn new() -> Self {
        let backend = Arc::new(FakeBackend::default());
        let session = Session::in_memory();
        let api = ApiClient::new(BASE_URL, session.clone(), backend.clone())
            .expect("fake backend URL is valid");
        let ui = UiConfig {
            redirect_delay: Duration::from_millis(50),
            ..UiConfig::default()
        };
        Self {
            backend,
            session,
            shell: Shell::new(api, ui),
            page: None,
            redirect: None,
            new_client: None,
            new_campaign: None,
            status: PageStatus::default(),
        }
    }

    pub fn api(&self) -> ApiClient {
        self.shell.api().clone()
    }
}
