pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::content::handlers as content;
use crate::cv::handlers as cv;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Portfolio content
        .route("/api/v1/profile", get(content::handle_get_profile))
        .route("/api/v1/projects", get(content::handle_get_projects))
        // CV
        .route("/api/v1/cv", get(content::handle_get_cv))
        .route("/api/v1/cv/layout", get(cv::handle_get_cv_layout))
        .route("/api/v1/cv/pdf/status", get(cv::handle_cv_pdf_status))
        .route(
            "/api/v1/cv/pdf/regenerate",
            post(cv::handle_regenerate_cv_pdf),
        )
        .route("/cv.pdf", get(cv::handle_get_cv_pdf))
        .with_state(state)
}
