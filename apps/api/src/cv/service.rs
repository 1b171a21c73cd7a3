//! CV pipeline: content → layout → PDF → cached artifact.
//!
//! Layout and rendering are CPU-bound and run on a blocking thread. Every path
//! that writes the artifact holds `AppState::generation_lock`, so concurrent
//! requests for a cold cache produce one PDF, not several.

use bytes::Bytes;
use tracing::info;

use crate::artifact::ArtifactInfo;
use crate::errors::AppError;
use crate::layout::LayoutResult;
use crate::render::render_pdf;
use crate::state::AppState;

/// Lays out the current résumé without rendering it.
pub async fn layout_cv(state: &AppState) -> Result<LayoutResult, AppError> {
    let document = state.content.load_resume().await?;
    let engine = state.engine.clone();

    let layout = tokio::task::spawn_blocking(move || engine.layout(&document))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}"))
        })??;
    Ok(layout)
}

/// Returns the cached CV PDF, generating and storing it first on a miss.
pub async fn ensure_cv_pdf(state: &AppState) -> Result<Bytes, AppError> {
    let _guard = state.generation_lock.lock().await;
    let key = state.config.cv_pdf_name.as_str();

    if let Some(cached) = state.artifacts.fetch(key).await? {
        return Ok(cached);
    }

    let (pdf, _) = generate_and_store(state, key).await?;
    Ok(pdf)
}

/// Drops the cached PDF and builds a fresh one from the current content.
/// If generation fails the old artifact stays gone rather than going stale.
pub async fn regenerate_cv_pdf(state: &AppState) -> Result<ArtifactInfo, AppError> {
    let _guard = state.generation_lock.lock().await;
    let key = state.config.cv_pdf_name.as_str();

    state.artifacts.invalidate(key).await?;
    let (_, stored) = generate_and_store(state, key).await?;
    Ok(stored)
}

/// Caller must hold `generation_lock`.
async fn generate_and_store(
    state: &AppState,
    key: &str,
) -> Result<(Bytes, ArtifactInfo), AppError> {
    let document = state.content.load_resume().await?;
    let engine = state.engine.clone();
    let title = format!("{} - CV", document.personal_info.name);

    let (pdf, page_count) = tokio::task::spawn_blocking(move || -> Result<_, AppError> {
        let layout = engine.layout(&document)?;
        let pdf = render_pdf(&layout, engine.config(), &title)?;
        Ok((Bytes::from(pdf), layout.page_count))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    let stored = state.artifacts.store(key, pdf.clone()).await?;
    info!(
        key,
        pages = page_count,
        size_bytes = stored.size_bytes,
        "Generated CV PDF"
    );
    Ok((pdf, stored))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::test_support::{test_state, write_sample_content};

    // ── layout ──

    #[tokio::test]
    async fn test_layout_cv_uses_current_content() {
        let (state, _dirs) = test_state();
        write_sample_content(state.content.dir());

        let layout = layout_cv(&state).await.unwrap();
        assert_eq!(layout.page_count, 1);
        let first = &layout.commands[0];
        assert_eq!(first.text.lines(), vec!["Jane Doe"]);
    }

    #[tokio::test]
    async fn test_layout_cv_missing_content_is_not_found() {
        let (state, _dirs) = test_state();
        let err = layout_cv(&state).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
    }

    // ── artifact caching ──

    #[tokio::test]
    async fn test_ensure_generates_on_miss_and_caches() {
        let (state, _dirs) = test_state();
        write_sample_content(state.content.dir());

        let first = ensure_cv_pdf(&state).await.unwrap();
        assert!(first.starts_with(b"%PDF-"));
        let info = state.artifacts.info("cv.pdf").await.unwrap().unwrap();
        assert_eq!(info.size_bytes, first.len() as u64);

        // A cache hit is served even after the content disappears.
        std::fs::remove_file(state.content.dir().join("cv.md")).unwrap();
        let second = ensure_cv_pdf(&state).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_ensure_serves_existing_artifact_untouched() {
        let (state, _dirs) = test_state();
        state
            .artifacts
            .store("cv.pdf", Bytes::from_static(b"%PDF-cached"))
            .await
            .unwrap();

        let bytes = ensure_cv_pdf(&state).await.unwrap();
        assert_eq!(&bytes[..], b"%PDF-cached");
    }

    #[tokio::test]
    async fn test_regenerate_replaces_cached_artifact() {
        let (state, _dirs) = test_state();
        write_sample_content(state.content.dir());
        state
            .artifacts
            .store("cv.pdf", Bytes::from_static(b"stale"))
            .await
            .unwrap();

        let info = regenerate_cv_pdf(&state).await.unwrap();
        assert_eq!(info.key, "cv.pdf");
        let bytes = state.artifacts.fetch("cv.pdf").await.unwrap().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(info.size_bytes, bytes.len() as u64);
    }

    #[tokio::test]
    async fn test_regenerate_with_malformed_content_leaves_no_artifact() {
        let (state, _dirs) = test_state();
        write_sample_content(state.content.dir());
        std::fs::write(
            state.content.dir().join("cv.md"),
            "+++\n[[education]]\ndegree = \"\"\ninstitution = \"Uni\"\nyear = \"2010\"\n+++\n",
        )
        .unwrap();
        state
            .artifacts
            .store("cv.pdf", Bytes::from_static(b"stale"))
            .await
            .unwrap();

        let err = regenerate_cv_pdf(&state).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedInput(_)), "got {err:?}");
        assert!(state.artifacts.fetch("cv.pdf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_ensure_produces_identical_bytes() {
        let (state, _dirs) = test_state();
        write_sample_content(state.content.dir());

        let (a, b) = tokio::join!(ensure_cv_pdf(&state), ensure_cv_pdf(&state));
        assert_eq!(a.unwrap(), b.unwrap());
    }
}
