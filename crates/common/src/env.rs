//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::info;

/// Ensure the parent directory of a data file exists, creating it if needed.
pub async fn ensure_data_dir(file_path: &str) -> anyhow::Result<()> {
    let Some(dir) = Path::new(file_path).parent() else {
        return Ok(());
    };
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    if tokio::fs::metadata(dir).await.is_err() {
        info!(dir = %dir.display(), "creating data directory");
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    Ok(())
}
