//! Saving exported reports to disk

use std::path::{Path, PathBuf};

use mailshot_api::ApiClient;

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// `relatorio_<title>.csv`, with path separators and control characters replaced
pub fn report_file_name(title: &str) -> String {
    format!("relatorio_{}.csv", sanitize(title))
}

/// Name for a saved report: the campaign title when known, else the name
/// the server suggested, else the campaign id
pub fn export_file_name(campaign_id: u64, title: Option<&str>, suggested: Option<&str>) -> String {
    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        return report_file_name(title);
    }
    match suggested.map(sanitize).filter(|name| !name.is_empty() && name != "." && name != "..") {
        Some(name) => name,
        None => report_file_name(&campaign_id.to_string()),
    }
}

/// Write `bytes` into `dir` as `name`, creating the directory if needed
pub async fn save_download(dir: &Path, name: &str, bytes: &[u8]) -> crate::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(name);
    tokio::fs::write(&path, bytes).await?;
    tracing::info!("Saved {} bytes to {:?}", bytes.len(), path);
    Ok(path)
}

/// Fetch a campaign's report and save it under [`export_file_name`]
pub async fn export_report(
    api: &ApiClient,
    campaign_id: u64,
    title: Option<&str>,
    dir: &Path,
) -> crate::Result<PathBuf> {
    let download = api.campaigns().export_report(campaign_id).await?;
    let name = export_file_name(campaign_id, title, download.suggested_name.as_deref());
    save_download(dir, &name, &download.bytes).await
}
