//! `/clientes/` endpoints

use crate::client::ApiClient;
use crate::io::{FileUpload, MultipartForm};
use crate::models::{Client, ImportSummary, NewClient};

const CLIENTS: &str = "/clientes/";

fn client_path(id: u64) -> String {
    format!("{}{}/", CLIENTS, id)
}

/// Customer operations
#[derive(Debug, Clone, Copy)]
pub struct ClientsApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn clients(&self) -> ClientsApi<'_> {
        ClientsApi { api: self }
    }
}

impl ClientsApi<'_> {
    pub async fn list(&self) -> crate::Result<Vec<Client>> {
        self.api.get(CLIENTS).await
    }

    pub async fn get(&self, id: u64) -> crate::Result<Client> {
        self.api.get(&client_path(id)).await
    }

    pub async fn create(&self, client: &NewClient) -> crate::Result<Client> {
        self.api.post(CLIENTS, client).await
    }

    pub async fn update(&self, id: u64, client: &NewClient) -> crate::Result<Client> {
        self.api.put(&client_path(id), client).await
    }

    pub async fn delete(&self, id: u64) -> crate::Result<()> {
        self.api.delete(&client_path(id)).await
    }

    /// Upload a `Nome,Sobrenome,Email` CSV; the backend upserts by email
    pub async fn import_csv(&self, file: FileUpload) -> crate::Result<ImportSummary> {
        tracing::debug!("Importing clients from {}", file.file_name);
        let form = MultipartForm::new().file("arquivo", file);
        self.api
            .post_multipart(&format!("{}importar_csv/", CLIENTS), form)
            .await
    }
}
