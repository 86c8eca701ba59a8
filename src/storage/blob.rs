//! Key-addressed blob store rooted at a configured directory.
//!
//! Not used by the authentication flow itself; available to the surrounding
//! application for uploads and generated files.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::errors::StorageError;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Write `content` under `key`, creating parent directories as needed.
    /// Returns the key on success.
    pub async fn save(&self, key: &str, content: &[u8]) -> Result<String, StorageError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content).await?;
        tracing::debug!("Saved {} bytes to {}", content.len(), path.display());
        Ok(key.to_string())
    }

    /// Remove the blob stored under `key`. Returns whether anything was
    /// deleted; a missing key is not an error.
    pub async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Generate a fresh storage key with a random unique component.
    pub fn generate_key(prefix: &str, suffix: &str) -> String {
        format!("{prefix}{}{suffix}", Uuid::new_v4())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
