use askama::Template;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::models::{AppState, CatalogStats};
use crate::services::filter_by_origin;
use crate::templates::{ProductRow, ProductsPageTemplate};

use super::helpers::{load_catalog, OriginQuery};

pub async fn root_get(State(state): State<AppState>, Query(q): Query<OriginQuery>) -> Response {
    let filter = q.filter();
    let (status, page) = match load_catalog(&state).await {
        Ok(products) => (
            StatusCode::OK,
            ProductsPageTemplate {
                stats: CatalogStats::from_products(&products),
                active_filter: filter.as_param().to_string(),
                rows: filter_by_origin(&products, &filter).iter().map(ProductRow::from).collect(),
                error: None,
            },
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            ProductsPageTemplate {
                stats: CatalogStats::default(),
                active_filter: filter.as_param().to_string(),
                rows: Vec::new(),
                error: Some(format!("Failed to load products: {}", e)),
            },
        ),
    };
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(%e, "Failed to render products page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
