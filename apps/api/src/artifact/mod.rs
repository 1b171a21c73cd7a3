//! Generated artifacts (the CV PDF) cached at a stable location.
//!
//! `AppState` holds an `Arc<dyn ArtifactStore>`; the filesystem store is the
//! only backend today.

pub mod fs;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fs::FsArtifactStore;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid artifact key: {0:?}")]
    InvalidKey(String),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Metadata about a stored artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub key: String,
    pub size_bytes: u64,
    pub generated_at: DateTime<Utc>,
}

/// Storage for generated artifacts, addressed by a plain file-name key.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Metadata for `key`, or `None` when nothing is stored.
    async fn info(&self, key: &str) -> Result<Option<ArtifactInfo>, ArtifactError>;

    async fn fetch(&self, key: &str) -> Result<Option<Bytes>, ArtifactError>;

    /// Stores `bytes` under `key`, replacing any previous artifact atomically.
    async fn store(&self, key: &str, bytes: Bytes) -> Result<ArtifactInfo, ArtifactError>;

    /// Removes `key`. Returns whether anything was removed.
    async fn invalidate(&self, key: &str) -> Result<bool, ArtifactError>;
}

/// Keys are single path components: no separators, no `.`/`..`, no NULs.
pub(crate) fn validate_key(key: &str) -> Result<(), ArtifactError> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if invalid {
        return Err(ArtifactError::InvalidKey(key.to_string()));
    }
    Ok(())
}
