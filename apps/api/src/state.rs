use std::sync::Arc;

use tokio::sync::Mutex;

use crate::artifact::{ArtifactStore, FsArtifactStore};
use crate::config::Config;
use crate::content::ContentStore;
use crate::layout::PaginatedLayoutEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub content: ContentStore,
    /// Where the generated CV PDF is cached. Filesystem-backed by default.
    pub artifacts: Arc<dyn ArtifactStore>,
    pub engine: Arc<PaginatedLayoutEngine>,
    /// Held for the whole check-generate-store sequence so concurrent
    /// requests never render the same artifact twice.
    pub generation_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let content = ContentStore::new(config.content_dir.clone());
        let artifacts: Arc<dyn ArtifactStore> =
            Arc::new(FsArtifactStore::new(config.artifact_dir.clone()));
        let engine = Arc::new(PaginatedLayoutEngine::new(config.layout.clone()));
        AppState {
            config,
            content,
            artifacts,
            engine,
            generation_lock: Arc::new(Mutex::new(())),
        }
    }
}
