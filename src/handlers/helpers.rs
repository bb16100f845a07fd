use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::error::{CatalogError, LookupError};
use crate::models::{AppState, OriginFilter, Product};

/// Handler failure mapped onto an HTTP status with a JSON body.
#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    Lookup(LookupError),
    BadRequest(String),
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        ApiError::Catalog(e)
    }
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        ApiError::Lookup(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Catalog(e) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()),
            ApiError::Lookup(e) => (StatusCode::NOT_FOUND, e.to_string()),
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct OriginQuery {
    pub origin: Option<String>,
}

impl OriginQuery {
    pub fn filter(&self) -> OriginFilter {
        self.origin
            .as_deref()
            .and_then(|o| o.parse().ok())
            .unwrap_or_default()
    }
}

pub async fn load_catalog(state: &AppState) -> Result<Vec<Product>, CatalogError> {
    state.catalog.load_catalog().await
}
