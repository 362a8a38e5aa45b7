use crate::config::Config;
use crate::storage::{ListingEntry, ScribeStore};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ScribeStore>,
    pub config: Config,
}

// API Request/Response types

#[derive(Debug, serde::Deserialize)]
pub struct SaveContentRequest {
    pub content: String,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// JSON record persisted for a saved note. Field order is part of the stored
/// format.
#[derive(Debug, serde::Serialize)]
pub struct ContentRecord {
    pub scribe_id: String,
    pub content: String,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, serde::Serialize)]
pub struct SaveContentResponse {
    pub key: String,
    pub uri: String,
}

#[derive(Debug, serde::Serialize)]
pub struct ListItemsResponse {
    pub items: Vec<ListingEntry>,
}

#[derive(Debug, serde::Deserialize)]
pub struct DownloadUrlQuery {
    pub key: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

#[derive(Debug, serde::Serialize)]
pub struct DownloadUrlResponse {
    pub url: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct PresignUploadRequest {
    pub scribe_id: String,
    pub filename: String,
    /// Logical subfolder under the scribe's namespace.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

#[derive(Debug, serde::Serialize)]
pub struct PresignUploadResponse {
    pub key: String,
    pub url: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn default_expires_in() -> u64 {
    3600
}

fn default_prefix() -> String {
    "uploads".to_string()
}
