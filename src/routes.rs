use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root_get))
        .route("/api/products", get(handlers::products_get))
        .route("/api/search", get(handlers::search_get))
        .route("/api/check", get(handlers::check_get))
        .route("/api/stats", get(handlers::stats_get))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
