//! Local-filesystem implementation of the [`FileStore`] trait.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use eygar_core::error::CoreError;
use eygar_core::external::FileStore;

/// Looks up uploaded files under a configured root directory.
///
/// Storage keys are relative paths; keys that escape the root (absolute
/// paths or `..` components) are rejected as validation errors.
pub struct LocalFileStore {
    root: PathBuf,
    timeout: Duration,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            root: root.into(),
            timeout,
        }
    }

    /// Resolve a storage key to a path under the root.
    fn resolve(&self, storage_key: &str) -> Result<PathBuf, CoreError> {
        let relative = Path::new(storage_key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if storage_key.is_empty() || escapes {
            return Err(CoreError::Validation(format!(
                "Invalid storage key '{storage_key}'"
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn exists(&self, storage_key: &str) -> Result<bool, CoreError> {
        let path = self.resolve(storage_key)?;

        let lookup = tokio::fs::try_exists(path);
        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(exists)) => Ok(exists),
            Ok(Err(err)) => Err(CoreError::Internal(format!(
                "File store lookup failed for '{storage_key}': {err}"
            ))),
            Err(_) => Err(CoreError::UpstreamTimeout(format!(
                "File store did not respond within {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}
