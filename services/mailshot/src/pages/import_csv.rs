//! CSV import of clients (`Nome,Sobrenome,Email` header)

use mailshot_api::models::ImportSummary;
use mailshot_api::{ApiClient, FileUpload};

use super::PageStatus;

pub const SUCCESS: &str = "Importação concluída com sucesso!";
pub const INVALID_FILE: &str = "Por favor, selecione um arquivo CSV válido.";
pub const NO_FILE: &str = "Por favor, selecione um arquivo CSV para importar.";
pub const SUBMIT_ERROR: &str = "Erro ao importar arquivo. Verifique o formato e tente novamente.";

/// Header row the backend expects
pub const EXPECTED_HEADER: &str = "Nome,Sobrenome,Email";

#[derive(Debug, Default)]
pub struct ImportCsvPage {
    pub status: PageStatus,
    pub summary: Option<ImportSummary>,
    file: Option<FileUpload>,
}

fn is_csv(file: &FileUpload) -> bool {
    file.content_type == "text/csv" || file.extension().as_deref() == Some("csv")
}

impl ImportCsvPage {
    pub fn selected(&self) -> Option<&FileUpload> {
        self.file.as_ref()
    }

    /// Select a file; anything that is not CSV is refused
    pub fn select(&mut self, file: FileUpload) -> bool {
        if !is_csv(&file) {
            tracing::warn!("Refusing non-CSV file {}", file.file_name);
            self.file = None;
            self.status.fail(INVALID_FILE);
            return false;
        }
        self.status.error = None;
        self.file = Some(file);
        true
    }

    pub async fn submit(&mut self, api: &ApiClient) {
        let Some(file) = self.file.clone() else {
            self.status.fail(NO_FILE);
            return;
        };

        self.status.start();
        self.summary = None;
        match api.clients().import_csv(file).await {
            Ok(summary) => {
                tracing::info!(
                    "Import finished: {} created, {} updated, {} errors",
                    summary.created,
                    summary.updated,
                    summary.errors.len()
                );
                self.summary = Some(summary);
                self.file = None;
                self.status.succeed(SUCCESS);
            }
            Err(e) => {
                tracing::error!("Failed to import CSV: {}", e);
                self.status.fail_request(SUBMIT_ERROR, &e);
            }
        }
    }
}
