//! HTTP gateway (Axum) for the matching pipeline.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{ALLOWED_EXTENSIONS, allowed_file, compare_by_identity_handler, compare_handler};
pub use payload::{CompareByIdRequest, CompareResponse};
pub use state::HandlerState;

use crate::comparator::FaceComparator;
use crate::corpus::ObjectStore;
use crate::identity::MetadataStore;

/// Headroom on top of the image cap for multipart boundaries and the
/// threshold field.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_router_with_state<S, C, M>(state: HandlerState<S, C, M>) -> Router
where
    S: ObjectStore + Send + Sync + 'static,
    C: FaceComparator + Send + Sync + 'static,
    M: MetadataStore + Send + Sync + 'static,
{
    let body_limit = state.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health_handler))
        .route("/compare", post(compare_handler))
        .route("/compare-by-id", post(compare_by_identity_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            message: "face matching service is running",
        }),
    )
        .into_response()
}
