//! API Routes
//!
//! HTTP surface of the storage facade:
//! - `/health` - liveness probe
//! - `/upload/file` - multipart upload through this service
//! - `/upload/presign` - presigned POST for direct-to-bucket uploads
//! - `/download/url` - presigned GET for a stored key
//! - `/scribes/{scribe_id}/content` - save a JSON content record
//! - `/scribes/{scribe_id}/items` - list everything stored for a scribe

pub mod files;
pub mod health;
pub mod scribes;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware;
use crate::models::AppState;

/// Create the main application router with CORS and request tracing applied.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = middleware::cors_layer(&state.config.server.allowed_origins);

    Router::new()
        .merge(health::router())
        .merge(files::router(state.clone()))
        .merge(scribes::router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
