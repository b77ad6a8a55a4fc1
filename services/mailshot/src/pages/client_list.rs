//! Client list with local filter and confirmed delete

use mailshot_api::models::Client;
use mailshot_api::ApiClient;

use super::{Confirm, PageStatus};
use crate::filter::filter_clients;

pub const LOAD_ERROR: &str = "Erro ao carregar a lista de clientes. Tente novamente mais tarde.";
pub const DELETE_ERROR: &str = "Erro ao excluir o cliente. Tente novamente mais tarde.";
pub const CONFIRM_DELETE: &str = "Tem certeza que deseja excluir este cliente?";

#[derive(Debug, Default)]
pub struct ClientListPage {
    pub status: PageStatus,
    pub clients: Vec<Client>,
    query: String,
}

impl ClientListPage {
    /// Fetch the full list; no pagination
    pub async fn mount(&mut self, api: &ApiClient) {
        self.status.start();
        match api.clients().list().await {
            Ok(clients) => {
                tracing::debug!("Loaded {} clients", clients.len());
                self.clients = clients;
                self.status.finish();
            }
            Err(e) => {
                tracing::error!("Failed to load clients: {}", e);
                self.status.fail_request(LOAD_ERROR, &e);
            }
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Clients matching the current query
    pub fn visible(&self) -> Vec<&Client> {
        filter_clients(&self.clients, &self.query)
    }

    /// Delete after confirmation, then re-fetch. Returns whether a delete happened.
    pub async fn delete(&mut self, api: &ApiClient, id: u64, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(CONFIRM_DELETE) {
            tracing::debug!("Delete of client {} declined", id);
            return false;
        }
        match api.clients().delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted client {}", id);
                self.mount(api).await;
                true
            }
            Err(e) => {
                tracing::error!("Failed to delete client {}: {}", id, e);
                self.status.fail_request(DELETE_ERROR, &e);
                false
            }
        }
    }
}
