pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::upload::handlers;
use crate::views::{editor, summary};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Submission boundary
        .route("/api/v1/resume", get(handlers::handle_get_state))
        .route("/api/v1/resume/upload", post(handlers::handle_upload))
        .route("/api/v1/resume/fields", patch(handlers::handle_edit_field))
        // View projections
        .route("/api/v1/resume/summary", get(summary::handle_summary))
        .route("/api/v1/resume/editor", get(editor::handle_editor))
        .with_state(state)
}
