//! Mailshot - terminal front-end for the email-marketing backend
//!
//! Pages are view-models over the `mailshot-api` facades; the shell maps
//! route paths to pages and follows the redirects they schedule.

pub mod config;
pub mod download;
pub mod error;
pub mod filter;
pub mod form;
pub mod pages;
pub mod preview;
pub mod render;
pub mod router;
pub mod shell;
pub mod upload;

pub use config::{load_config, Config};
pub use error::{ConsoleError, Result};
pub use router::Route;
pub use shell::Shell;

use std::sync::Arc;

use mailshot_api::{ApiClient, ReqwestHttpClient, Session};

/// Build the API client from configuration, loading any saved session
pub fn connect(config: &Config) -> Result<ApiClient> {
    let session = Session::persisted(&config.session.path)?;
    let http = Arc::new(ReqwestHttpClient::new());
    let api = ApiClient::new(&config.api.base_url, session, http)?;
    tracing::debug!("Connected to {}", api.base_url());
    Ok(api)
}
