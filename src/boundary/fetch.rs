//! Boundary dataset download
//!
//! Fetches the two Natural Earth GeoJSON files into the local data
//! directory when they are missing. Downloads are validated as parseable
//! feature collections before being written, so a truncated response
//! never poisons the on-disk dataset.

use crate::boundary::dataset::FeatureCollection;
use crate::constants::api::{MINOR_ISLANDS_URL, WORLD_MAP_URL};
use crate::constants::cache::{MINOR_ISLANDS_FILE, WORLD_MAP_FILE};
use crate::error::{Error, Result};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

const DOWNLOAD_TIMEOUT_SECS: u64 = 120;

/// Ensure both dataset files exist in `dir`, downloading any that are
/// missing
///
/// The primary file is required; a failed minor-islands download is
/// logged and skipped, matching the index's best-effort handling of that
/// collection.
pub async fn ensure_datasets(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::Dataset(format!("failed to create {}: {}", dir.display(), e)))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .build()?;

    let world_path = dir.join(WORLD_MAP_FILE);
    if !world_path.exists() {
        download_collection(&client, WORLD_MAP_URL, &world_path).await?;
    }

    let islands_path = dir.join(MINOR_ISLANDS_FILE);
    if !islands_path.exists() {
        if let Err(e) = download_collection(&client, MINOR_ISLANDS_URL, &islands_path).await {
            warn!(error = %e, "minor islands download failed, continuing without it");
        }
    }

    Ok(())
}

async fn download_collection(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
) -> Result<()> {
    info!(url, "downloading boundary dataset");

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Dataset(format!(
            "dataset download returned status {}",
            response.status()
        )));
    }

    let body = response.text().await?;

    // Validate before writing
    let parsed: FeatureCollection = serde_json::from_str(&body)
        .map_err(|e| Error::Dataset(format!("downloaded dataset is not valid GeoJSON: {}", e)))?;

    std::fs::write(path, &body)
        .map_err(|e| Error::Dataset(format!("failed to write {}: {}", path.display(), e)))?;

    info!(
        path = %path.display(),
        features = parsed.features.len(),
        size_kb = body.len() / 1024,
        "boundary dataset saved"
    );
    Ok(())
}
