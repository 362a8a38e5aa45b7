use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

/// Endpoint used when `USE_LOCALSTACK=true` selects the local S3 emulator.
pub const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub aws_region: String,
    pub s3_bucket: String,
    pub use_localstack: bool,
}

impl StorageConfig {
    /// Override endpoint, set only when targeting the LocalStack emulator.
    pub fn endpoint_url(&self) -> Option<&'static str> {
        self.use_localstack.then_some(LOCALSTACK_ENDPOINT)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                allowed_origins: parse_allowed_origins(
                    &env::var("ALLOWED_ORIGINS").unwrap_or_default(),
                ),
            },
            storage: StorageConfig {
                aws_access_key_id: require("AWS_ACCESS_KEY_ID")?,
                aws_secret_access_key: require("AWS_SECRET_ACCESS_KEY")?,
                aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                s3_bucket: require("S3_BUCKET")?,
                use_localstack: env::var("USE_LOCALSTACK")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()?,
            },
        })
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{name} must be set"))
}

/// Normalize the allowed-origins setting into a fixed list.
///
/// Accepts a JSON array string, a comma-separated list, the wildcard `*`,
/// or nothing at all (treated as `*`). A malformed JSON array falls through
/// to the comma/wildcard rules.
pub fn parse_allowed_origins(raw: &str) -> Vec<String> {
    let s = raw.trim();
    if s.starts_with('[') {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(s) {
            return items
                .iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => s.trim().to_string(),
                    other => other.to_string(),
                })
                .collect();
        }
    }
    if s.is_empty() || s == "*" {
        return vec!["*".to_string()];
    }
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origins_wildcard_and_empty() {
        assert_eq!(parse_allowed_origins("*"), vec!["*"]);
        assert_eq!(parse_allowed_origins(""), vec!["*"]);
        assert_eq!(parse_allowed_origins("   "), vec!["*"]);
    }

    #[test]
    fn test_origins_comma_list() {
        assert_eq!(
            parse_allowed_origins("http://a.example, http://b.example ,"),
            vec!["http://a.example", "http://b.example"]
        );
    }

    #[test]
    fn test_origins_json_array() {
        assert_eq!(
            parse_allowed_origins(r#"["http://a.example", " http://b.example "]"#),
            vec!["http://a.example", "http://b.example"]
        );
    }

    #[test]
    fn test_origins_malformed_json_falls_back() {
        // Unclosed bracket is not valid JSON; treated as a comma list
        assert_eq!(
            parse_allowed_origins("[http://a.example"),
            vec!["[http://a.example"]
        );
    }
}
