//! Ordered attachment uploads
//!
//! Files are uploaded strictly one after another. The first failure halts
//! the plan: later files are not attempted and come back as skipped, and
//! attachments already created stay on the campaign.

use mailshot_api::models::Attachment;
use mailshot_api::{ApiClient, ApiError, FileUpload};

/// The upload that stopped a plan
#[derive(Debug)]
pub struct UploadFailure {
    pub file: FileUpload,
    pub error: ApiError,
}

/// What happened to each file of a plan
#[derive(Debug, Default)]
pub struct UploadReport {
    pub uploaded: Vec<Attachment>,
    pub failure: Option<UploadFailure>,
    pub skipped: Vec<FileUpload>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Files that still need uploading: the failed one, then the skipped ones
    pub fn remaining(&self) -> Vec<FileUpload> {
        self.failure
            .iter()
            .map(|f| f.file.clone())
            .chain(self.skipped.iter().cloned())
            .collect()
    }
}

/// An ordered list of files to attach to one campaign
#[derive(Debug, Clone, Default)]
pub struct UploadPlan {
    files: Vec<FileUpload>,
}

impl UploadPlan {
    pub fn new(files: Vec<FileUpload>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub async fn run(self, api: &ApiClient, campaign_id: u64) -> UploadReport {
        let mut report = UploadReport::default();
        let mut files = self.files.into_iter();

        for file in files.by_ref() {
            let name = file.file_name.clone();
            match api.attachments().upload(campaign_id, file.clone()).await {
                Ok(attachment) => {
                    tracing::debug!("Uploaded {} as attachment {}", name, attachment.id);
                    report.uploaded.push(attachment);
                }
                Err(error) => {
                    tracing::warn!("Upload of {} failed, halting: {}", name, error);
                    report.failure = Some(UploadFailure { file, error });
                    break;
                }
            }
        }

        report.skipped = files.collect();
        if !report.skipped.is_empty() {
            tracing::info!("Skipped {} remaining uploads", report.skipped.len());
        }
        report
    }
}
