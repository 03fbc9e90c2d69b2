//! Export variables to later workflow steps through the `GITHUB_ENV` file

use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::errors::WatchlyError;

/// Sink for `KEY=value` lines read by subsequent CI steps
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: Option<PathBuf>,
}

impl EnvFile {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Append `key=value`. Returns false when no env file is configured.
    pub async fn export(&self, key: &str, value: &str) -> Result<bool, WatchlyError> {
        let Some(path) = &self.path else {
            warn!("No env file configured, {} will not be available to later steps", key);
            return Ok(false);
        };

        if key.is_empty() || key.contains(['=', '\n', '\r']) {
            return Err(WatchlyError::InvalidInput(format!("invalid variable name: {:?}", key)));
        }
        if value.contains(['\n', '\r']) {
            return Err(WatchlyError::InvalidInput(format!(
                "value for {} spans multiple lines",
                key
            )));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(format!("{}={}\n", key, value).as_bytes())
            .await?;
        file.flush().await?;

        debug!("Exported {} to {}", key, path.display());
        Ok(true)
    }
}
