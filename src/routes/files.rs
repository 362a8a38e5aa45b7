use axum::{
    extract::{Multipart, Query, State},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::info;

use crate::models::{
    AppState, DownloadUrlQuery, DownloadUrlResponse, PresignUploadRequest, PresignUploadResponse,
    SaveContentResponse,
};
use crate::storage::ScribeStore;
use crate::types::{ApiError, ApiResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload/file", post(upload_file))
        .route("/upload/presign", post(presign_upload))
        .route("/download/url", get(download_url))
        .with_state(state)
}

/// Multipart upload: `scribe_id` plus a `file` part. The file lands under the
/// `uploads` prefix with a fresh uuid in the key.
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<SaveContentResponse>> {
    let mut scribe_id: Option<String> = None;
    let mut file: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::unprocessable(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("scribe_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::unprocessable(format!("invalid scribe_id: {e}")))?;
                scribe_id = Some(value);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("file").to_string();
                let declared = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::unprocessable(format!("invalid file: {e}")))?;
                file = Some((filename, declared, data));
            }
            _ => {}
        }
    }

    let scribe_id = scribe_id.ok_or_else(|| ApiError::missing_field("scribe_id"))?;
    let (filename, declared, data) = file.ok_or_else(|| ApiError::missing_field("file"))?;

    let key = ScribeStore::generate_key("uploads", &scribe_id, &filename);
    let content_type = resolve_content_type(declared.as_deref(), &filename);
    info!(%key, %content_type, size = data.len(), "uploading file");

    let uri = state
        .store
        .put_bytes(&key, data, Some(&content_type))
        .await
        .map_err(|e| ApiError::internal(format!("S3 upload failed: {e}")))?;

    Ok(Json(SaveContentResponse { key, uri }))
}

/// Presigned POST so the client uploads straight to the bucket instead of
/// routing bytes through this service.
async fn presign_upload(
    State(state): State<AppState>,
    Json(request): Json<PresignUploadRequest>,
) -> ApiResult<Json<PresignUploadResponse>> {
    let (key, post) = state
        .store
        .presign_post(
            &request.prefix,
            &request.scribe_id,
            &request.filename,
            request.expires_in,
        )
        .await
        .map_err(|e| ApiError::internal(format!("S3 presign failed: {e}")))?;

    Ok(Json(PresignUploadResponse {
        key,
        url: post.url,
        fields: post.fields,
    }))
}

async fn download_url(
    State(state): State<AppState>,
    Query(query): Query<DownloadUrlQuery>,
) -> ApiResult<Json<DownloadUrlResponse>> {
    let url = state
        .store
        .presign_get(&query.key, query.expires_in)
        .await
        .map_err(|e| ApiError::internal(format!("S3 presign failed: {e}")))?;

    Ok(Json(DownloadUrlResponse { url }))
}

/// Prefer the client-declared content type, then the filename extension,
/// then `application/octet-stream`.
fn resolve_content_type(declared: Option<&str>, filename: &str) -> String {
    match declared {
        Some(content_type) => content_type.to_string(),
        None => mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string(),
    }
}
