use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::models::{AppState, CatalogStats, Product};
use crate::search::Suggestion;
use crate::services::{check_product, filter_by_origin, ProductReport};

use super::helpers::{load_catalog, ApiError, OriginQuery};

#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Deserialize, Debug)]
pub struct CheckQuery {
    #[serde(default)]
    pub name: String,
}

pub async fn products_get(
    State(state): State<AppState>,
    Query(q): Query<OriginQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = load_catalog(&state).await?;
    Ok(Json(filter_by_origin(&products, &q.filter())))
}

pub async fn search_get(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    if q.q.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }
    let before = state.catalog.fetched_at();
    let products = load_catalog(&state).await?;
    // A refetch during the load moves the stamp; that snapshot is not kept.
    let stamp = before.filter(|b| state.catalog.fetched_at() == Some(*b));
    let index = state.search_index.get_or_build(stamp, &products);
    let limit = q.limit.unwrap_or(state.suggest_limit);
    Ok(Json(index.suggest_scored(&q.q, Some(limit))))
}

pub async fn check_get(
    State(state): State<AppState>,
    Query(q): Query<CheckQuery>,
) -> Result<Json<ProductReport>, ApiError> {
    if q.name.trim().is_empty() {
        return Err(ApiError::BadRequest("missing 'name' parameter".into()));
    }
    let products = load_catalog(&state).await?;
    let report = check_product(&products, &q.name, state.related_approval)?;
    Ok(Json(report))
}

pub async fn stats_get(State(state): State<AppState>) -> Result<Json<CatalogStats>, ApiError> {
    let products = load_catalog(&state).await?;
    Ok(Json(CatalogStats::from_products(&products)))
}
