//! HTTP surface: upload form, report endpoint and error mapping.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::output::OutputView;
use crate::upload::UploadStore;

/// Shared state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub uploads: Arc<UploadStore>,
    pub default_view: OutputView,
}

impl AppState {
    pub fn new(uploads: UploadStore, default_view: OutputView) -> Self {
        Self {
            uploads: Arc::new(uploads),
            default_view,
        }
    }
}

pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/process", post(handlers::process))
        .route("/health", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
