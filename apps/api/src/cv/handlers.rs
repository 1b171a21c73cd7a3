use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::artifact::ArtifactInfo;
use crate::cv::service::{ensure_cv_pdf, layout_cv, regenerate_cv_pdf};
use crate::errors::AppError;
use crate::layout::LayoutResult;
use crate::state::AppState;

/// GET /cv.pdf
/// Serves the cached PDF, generating it on first request.
pub async fn handle_get_cv_pdf(State(state): State<AppState>) -> Result<Response, AppError> {
    let pdf = ensure_cv_pdf(&state).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"cv.pdf\""),
        ],
        pdf,
    )
        .into_response())
}

/// GET /api/v1/cv/layout
pub async fn handle_get_cv_layout(
    State(state): State<AppState>,
) -> Result<Json<LayoutResult>, AppError> {
    Ok(Json(layout_cv(&state).await?))
}

/// GET /api/v1/cv/pdf/status
pub async fn handle_cv_pdf_status(
    State(state): State<AppState>,
) -> Result<Json<ArtifactInfo>, AppError> {
    let key = state.config.cv_pdf_name.as_str();
    state
        .artifacts
        .info(key)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No generated artifact '{key}'")))
}

/// POST /api/v1/cv/pdf/regenerate
pub async fn handle_regenerate_cv_pdf(
    State(state): State<AppState>,
) -> Result<Json<ArtifactInfo>, AppError> {
    Ok(Json(regenerate_cv_pdf(&state).await?))
}
