use axum::{response::Json as ResponseJson, routing::get, Json, Router};
use crate::models::HealthResponse;

pub fn router() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> ResponseJson<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
