//! File saver seam and the shipped filesystem implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ExportError, Result};

/// File save capability
///
/// The host environment decides what "saving" means — a browser download
/// trigger, a write to disk, a test recording. Side-effecting and only
/// observable by the fact that it was invoked with the given arguments.
#[async_trait]
pub trait FileSaver: Send + Sync {
    /// Save `content` under `filename`
    async fn save(&self, content: &str, filename: &str) -> Result<()>;
}

/// Saver writing each file into a target directory
///
/// The directory is created on first save if it doesn't exist.
pub struct FsFileSaver {
    target_dir: PathBuf,
}

impl FsFileSaver {
    /// Create a saver targeting the given directory
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }
}

#[async_trait]
impl FileSaver for FsFileSaver {
    async fn save(&self, content: &str, filename: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.target_dir)
            .await
            .map_err(|e| ExportError::SaveFailed {
                name: filename.to_string(),
                reason: format!(
                    "failed to create target directory '{}': {}",
                    self.target_dir.display(),
                    e
                ),
            })?;

        let path = self.target_dir.join(filename);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| ExportError::SaveFailed {
                name: filename.to_string(),
                reason: e.to_string(),
            })?;

        debug!(path = %path.display(), bytes = content.len(), "saved exported file");
        Ok(())
    }
}
