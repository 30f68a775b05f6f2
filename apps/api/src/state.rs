use std::sync::Arc;

use crate::upload::controller::UploadController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one controller instance for this process. It serializes the
    /// upload lifecycle and is the only writer of the résumé record; the
    /// summary and editor views read through it.
    pub controller: Arc<UploadController>,
}
