use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::artifact::{validate_key, ArtifactError, ArtifactInfo, ArtifactStore};

/// Stores each artifact as a file directly under `root`.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsArtifactStore { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ArtifactError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn info(&self, key: &str) -> Result<Option<ArtifactInfo>, ArtifactError> {
        let path = self.path_for(key)?;
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let generated_at: DateTime<Utc> = metadata.modified()?.into();
        Ok(Some(ArtifactInfo {
            key: key.to_string(),
            size_bytes: metadata.len(),
            generated_at,
        }))
    }

    async fn fetch(&self, key: &str) -> Result<Option<Bytes>, ArtifactError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => {
                debug!(key, bytes = data.len(), "Artifact cache hit");
                Ok(Some(Bytes::from(data)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, key: &str, bytes: Bytes) -> Result<ArtifactInfo, ArtifactError> {
        let path = self.path_for(key)?;
        let root = self.root.clone();

        // Write to a temp file beside the target, then rename over it, so a
        // reader never observes a half-written artifact.
        tokio::task::spawn_blocking(move || -> Result<(), std::io::Error> {
            std::fs::create_dir_all(&root)?;
            let mut tmp = tempfile::NamedTempFile::new_in(&root)?;
            tmp.write_all(&bytes)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await??;

        let stored = self
            .info(key)
            .await?
            .ok_or_else(|| ArtifactError::Io(std::io::ErrorKind::NotFound.into()))?;
        info!(key, size_bytes = stored.size_bytes, "Artifact stored");
        Ok(stored)
    }

    async fn invalidate(&self, key: &str) -> Result<bool, ArtifactError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(key, "Artifact invalidated");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());
        assert!(store.fetch("cv.pdf").await.unwrap().is_none());
        assert!(store.info("cv.pdf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_then_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());
        let info = store
            .store("cv.pdf", Bytes::from_static(b"%PDF-1.7 test"))
            .await
            .unwrap();
        assert_eq!(info.key, "cv.pdf");
        assert_eq!(info.size_bytes, 13);

        let fetched = store.fetch("cv.pdf").await.unwrap().unwrap();
        assert_eq!(&fetched[..], b"%PDF-1.7 test");
    }

    #[tokio::test]
    async fn test_store_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("public");
        let store = FsArtifactStore::new(&root);
        store.store("cv.pdf", Bytes::from_static(b"x")).await.unwrap();
        assert!(root.join("cv.pdf").exists());
    }

    #[tokio::test]
    async fn test_store_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());
        store.store("cv.pdf", Bytes::from_static(b"old")).await.unwrap();
        store.store("cv.pdf", Bytes::from_static(b"newer")).await.unwrap();
        let fetched = store.fetch("cv.pdf").await.unwrap().unwrap();
        assert_eq!(&fetched[..], b"newer");

        // Only the artifact itself remains; temp files were renamed away.
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_invalidate() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());
        assert!(!store.invalidate("cv.pdf").await.unwrap());
        store.store("cv.pdf", Bytes::from_static(b"x")).await.unwrap();
        assert!(store.invalidate("cv.pdf").await.unwrap());
        assert!(store.fetch("cv.pdf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());
        let err = store
            .store("../escape.pdf", Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidKey(_)));
    }
}
