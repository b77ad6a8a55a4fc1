//! Navigation shell: header, current page and redirects

use std::path::Path;
use std::time::Duration;

use mailshot_api::ApiClient;

use crate::config::UiConfig;
use crate::pages::{Page, Redirect};
use crate::router::Route;

pub const BRAND: &str = "Sistema de Email Marketing";

/// Header navigation links, in display order
pub const NAV_LINKS: &[(&str, Route)] = &[
    ("Home", Route::Home),
    ("Clientes", Route::Clients),
    ("Nova Campanha", Route::NewCampaign),
    ("Relatórios", Route::Reports),
];

/// Persistent header, reflecting whether a token is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub brand: &'static str,
    pub links: &'static [(&'static str, Route)],
    pub authenticated: bool,
}

impl Header {
    /// "Sair" with a token, "Login" without
    pub fn session_action(&self) -> &'static str {
        if self.authenticated {
            "Sair"
        } else {
            "Login"
        }
    }
}

#[derive(Debug)]
pub struct Shell {
    api: ApiClient,
    ui: UiConfig,
    current: Route,
}

impl Shell {
    pub fn new(api: ApiClient, ui: UiConfig) -> Self {
        Self {
            api,
            ui,
            current: Route::Home,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn redirect_delay(&self) -> Duration {
        self.ui.redirect_delay
    }

    pub fn download_dir(&self) -> &Path {
        &self.ui.download_dir
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn header(&self) -> Header {
        Header {
            brand: BRAND,
            links: NAV_LINKS,
            authenticated: self.api.session().is_authenticated(),
        }
    }

    pub async fn navigate(&mut self, route: Route) -> Page {
        tracing::debug!("Navigating from {} to {}", self.current, route);
        self.current = route;
        Page::open(route, &self.api).await
    }

    pub async fn open_path(&mut self, path: &str) -> crate::Result<Page> {
        let route = Route::parse(path)?;
        Ok(self.navigate(route).await)
    }

    /// Wait out the redirect's delay, then open its target
    pub async fn follow(&mut self, redirect: Redirect) -> Page {
        tracing::debug!("Redirecting to {} in {:?}", redirect.to, redirect.after);
        tokio::time::sleep(redirect.after).await;
        self.navigate(redirect.to).await
    }

    /// Clear the token and return to the landing page
    pub async fn logout(&mut self) -> crate::Result<Page> {
        self.api.auth().logout()?;
        Ok(self.navigate(Route::Home).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mailshot_api::io::{HttpResponse, MockHttpClient};
    use mailshot_api::Session;

    use super::*;

    fn shell(mock: MockHttpClient, session: Session) -> Shell {
        let api = ApiClient::new("http://localhost:8000/api", session, Arc::new(mock)).unwrap();
        Shell::new(api, UiConfig::default())
    }

    #[test]
    fn header_reflects_token() {
        let session = Session::in_memory();
        let shell = shell(MockHttpClient::new(), session.clone());
        assert_eq!(shell.header().session_action(), "Login");

        session.login("abc").unwrap();
        let header = shell.header();
        assert_eq!(header.session_action(), "Sair");
        assert_eq!(header.brand, BRAND);
        assert_eq!(header.links.len(), 4);
    }

    #[tokio::test]
    async fn logout_clears_token_and_goes_home() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| req.authorization.is_none())
            .returning(|_| Box::pin(async { Ok(HttpResponse::json(200, "[]")) }));

        let session = Session::in_memory();
        session.login("abc").unwrap();
        let mut shell = shell(mock, session.clone());
        shell.navigate(Route::Login).await;

        let page = shell.logout().await.unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(page.route(), Route::Home);
        assert_eq!(shell.current(), Route::Home);
    }

    #[tokio::test]
    async fn follow_waits_for_the_delay() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Box::pin(async { Ok(HttpResponse::json(200, "[]")) }));
        let mut shell = shell(mock, Session::in_memory());

        let started = tokio::time::Instant::now();
        let page = shell
            .follow(Redirect {
                to: Route::Clients,
                after: Duration::from_millis(20),
            })
            .await;
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(page.route(), Route::Clients);
    }

    #[tokio::test]
    async fn unknown_path_is_an_error() {
        let mut shell = shell(MockHttpClient::new(), Session::in_memory());
        assert!(shell.open_path("/nada").await.is_err());
    }
}
