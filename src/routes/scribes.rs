use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use crate::models::{
    AppState, ContentRecord, ListItemsResponse, SaveContentRequest, SaveContentResponse,
};
use crate::storage::ScribeStore;
use crate::types::{ApiError, ApiResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/scribes/{scribe_id}/content", post(save_content))
        .route("/scribes/{scribe_id}/items", get(list_items))
        .with_state(state)
}

/// Persist a JSON content record under the `notes` prefix.
async fn save_content(
    State(state): State<AppState>,
    Path(scribe_id): Path<String>,
    Json(body): Json<SaveContentRequest>,
) -> ApiResult<Json<SaveContentResponse>> {
    let key = ScribeStore::generate_key("notes", &scribe_id, "content.json");
    let record = ContentRecord {
        scribe_id,
        content: body.content,
        metadata: body.metadata,
    };
    info!(%key, "saving content record");

    let uri = state
        .store
        .put_json(&key, &record)
        .await
        .map_err(|e| ApiError::internal(format!("S3 put_json failed: {e}")))?;

    Ok(Json(SaveContentResponse { key, uri }))
}

/// Everything stored for one scribe, across all logical prefixes.
async fn list_items(
    State(state): State<AppState>,
    Path(scribe_id): Path<String>,
) -> ApiResult<Json<ListItemsResponse>> {
    let items = state
        .store
        .list_prefix(&format!("scribes/{scribe_id}/"))
        .await
        .map_err(|e| ApiError::internal(format!("S3 list failed: {e}")))?;

    Ok(Json(ListItemsResponse { items }))
}
