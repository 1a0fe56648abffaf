mod sequences;
mod service_info;

pub use sequences::{get_sequence, list_contigs};
pub use service_info::service_info;

use crate::storage::Storage;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/sequences/:id", get(get_sequence))
        .route("/sequences/:id/contigs", get(list_contigs))
        .route("/", get(service_info))
        .route("/service-info", get(service_info))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
