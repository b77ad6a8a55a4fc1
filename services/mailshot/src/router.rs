//! Static route table

use std::fmt;

use crate::error::ConsoleError;

/// Every page reachable by path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Clients,
    NewClient,
    ImportClients,
    Groups,
    NewCampaign,
    CampaignDetail(u64),
    Reports,
}

/// Path patterns, in match order
pub const ROUTE_PATTERNS: &[&str] = &[
    "/",
    "/login",
    "/clientes",
    "/clientes/novo",
    "/clientes/importar",
    "/grupos",
    "/campanhas/nova",
    "/campanhas/:id",
    "/relatorios",
];

impl Route {
    /// Resolve a path; trailing slashes are ignored
    pub fn parse(path: &str) -> crate::Result<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["clientes"] => Route::Clients,
            ["clientes", "novo"] => Route::NewClient,
            ["clientes", "importar"] => Route::ImportClients,
            ["grupos"] => Route::Groups,
            ["campanhas", "nova"] => Route::NewCampaign,
            ["campanhas", id] => id
                .parse()
                .map(Route::CampaignDetail)
                .map_err(|_| ConsoleError::Route(path.to_string()))?,
            ["relatorios"] => Route::Reports,
            _ => return Err(ConsoleError::Route(path.to_string())),
        };
        Ok(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Clients => "/clientes".to_string(),
            Route::NewClient => "/clientes/novo".to_string(),
            Route::ImportClients => "/clientes/importar".to_string(),
            Route::Groups => "/grupos".to_string(),
            Route::NewCampaign => "/campanhas/nova".to_string(),
            Route::CampaignDetail(id) => format!("/campanhas/{}", id),
            Route::Reports => "/relatorios".to_string(),
        }
    }

    /// Page heading
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Dashboard",
            Route::Login => "Login",
            Route::Clients => "Clientes",
            Route::NewClient => "Cadastrar Novo Cliente",
            Route::ImportClients => "Importar Clientes",
            Route::Groups => "Grupos",
            Route::NewCampaign => "Nova Campanha",
            Route::CampaignDetail(_) => "Detalhes da Campanha",
            Route::Reports => "Relatórios",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
