//! `/anexos/` endpoints

use crate::client::ApiClient;
use crate::io::{FileUpload, MultipartForm};
use crate::models::Attachment;

const ATTACHMENTS: &str = "/anexos/";

/// Attachment upload and removal
#[derive(Debug, Clone, Copy)]
pub struct AttachmentsApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn attachments(&self) -> AttachmentsApi<'_> {
        AttachmentsApi { api: self }
    }
}

impl AttachmentsApi<'_> {
    /// Attach a file to an existing campaign
    pub async fn upload(&self, campaign_id: u64, file: FileUpload) -> crate::Result<Attachment> {
        tracing::debug!(
            "Uploading attachment {} to campaign {}",
            file.file_name,
            campaign_id
        );
        let form = MultipartForm::new()
            .file("arquivo", file)
            .text("campanha", campaign_id.to_string());
        self.api.post_multipart(ATTACHMENTS, form).await
    }

    pub async fn delete(&self, id: u64) -> crate::Result<()> {
        self.api.delete(&format!("{}{}/", ATTACHMENTS, id)).await
    }
}
