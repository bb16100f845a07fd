use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::services::ApprovalGate;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CATALOG_URL: &str = "https://theinquilab.com/BikolpoBackend/products/";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FETCH_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;
pub const DEFAULT_SUGGEST_LIMIT: usize = 10;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const CACHE_DIR_NAME: &str = "bikolpo";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_catalog_url() -> String {
    sanitize_catalog_url(&env::var("CATALOG_URL").unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string()))
}

pub fn get_cache_dir() -> PathBuf {
    match env::var("CACHE_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
        _ => dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join(CACHE_DIR_NAME),
    }
}

pub fn get_cache_ttl() -> Duration {
    Duration::from_secs(parse_env_or("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS))
}

pub fn get_fetch_timeout() -> Duration {
    Duration::from_secs(parse_env_or("FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS))
}

pub fn get_fetch_retries() -> u32 {
    parse_env_or("FETCH_RETRIES", DEFAULT_FETCH_RETRIES)
}

pub fn get_suggest_limit() -> usize {
    parse_env_or("SUGGEST_LIMIT", DEFAULT_SUGGEST_LIMIT)
}

pub fn get_related_approval() -> ApprovalGate {
    env::var("RELATED_APPROVAL")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

/// Snapshot of every setting the binary needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog_url: String,
    pub cache_dir: PathBuf,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
    pub fetch_retries: u32,
    pub retry_backoff: Duration,
    pub suggest_limit: usize,
    pub related_approval: ApprovalGate,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            catalog_url: get_catalog_url(),
            cache_dir: get_cache_dir(),
            cache_ttl: get_cache_ttl(),
            fetch_timeout: get_fetch_timeout(),
            fetch_retries: get_fetch_retries(),
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            suggest_limit: get_suggest_limit(),
            related_approval: get_related_approval(),
        }
    }
}

fn parse_env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring unparsable setting");
                default
            }
        },
        Err(_) => default,
    }
}

pub fn sanitize_catalog_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_CATALOG_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
