//! JSON-file profile repository.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::Profile;
use crate::paths::{PathError, profiles_path};
use crate::ports::{ProfileRepository, RepositoryError};

/// Stores the whole profile list as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the data root.
    pub fn in_data_root() -> Result<Self, PathError> {
        Ok(Self::new(profiles_path()?))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileRepository for JsonProfileStore {
    async fn load_all(&self) -> Result<Vec<Profile>, RepositoryError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No profile file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(RepositoryError::Storage(format!(
                    "reading {}: {e}",
                    self.path.display()
                )));
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents)
            .map_err(|e| RepositoryError::Serialization(format!("{}: {e}", self.path.display())))
    }

    async fn save_all(&self, profiles: &[Profile]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(profiles)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                RepositoryError::Storage(format!("creating {}: {e}", parent.display()))
            })?;
        }

        // Write-then-rename so a crash never leaves a truncated file behind.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepositoryError::Storage(format!("writing {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            RepositoryError::Storage(format!("replacing {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), count = profiles.len(), "Profiles saved");
        Ok(())
    }
}
