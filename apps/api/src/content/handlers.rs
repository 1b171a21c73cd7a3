use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::portfolio::{Profile, Project};
use crate::models::resume::ResumeDocument;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.content.load_profile().await?))
}

/// GET /api/v1/projects
pub async fn handle_get_projects(
    State(state): State<AppState>,
) -> Result<Json<ProjectsResponse>, AppError> {
    let projects = state.content.load_projects().await?;
    Ok(Json(ProjectsResponse { projects }))
}

/// GET /api/v1/cv
///
/// The validated résumé exactly as the layout engine will see it.
pub async fn handle_get_cv(
    State(state): State<AppState>,
) -> Result<Json<ResumeDocument>, AppError> {
    Ok(Json(state.content.load_resume().await?))
}
