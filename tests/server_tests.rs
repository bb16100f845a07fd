mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use bikolpo::cache::{CatalogLoader, ManualClock, MemoryStore};
use bikolpo::models::{AppState, Origin, Product};
use bikolpo::routes::build_router;
use bikolpo::search::IndexSnapshot;
use bikolpo::services::ApprovalGate;

use common::{mixed_catalog, FakeSource};

fn app(source: FakeSource) -> axum::Router {
    let loader = CatalogLoader::with_clock(
        source,
        MemoryStore::new(),
        ManualClock::new(1_700_000_000_000),
        Duration::from_secs(60),
    );
    build_router(AppState {
        catalog: Arc::new(loader),
        related_approval: ApprovalGate::WhenPresent,
        suggest_limit: 10,
        search_index: Arc::new(IndexSnapshot::new()),
    })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_products_endpoint_filters_by_origin() {
    let (status, body) = get(app(FakeSource::new(mixed_catalog())), "/api/products?origin=IN").await;
    assert_eq!(status, StatusCode::OK);
    let products: serde_json::Value = serde_json::from_str(&body).unwrap();
    let names: Vec<&str> = products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Milk Powder", "Toothpaste"]);
}

#[tokio::test]
async fn test_search_endpoint() {
    let (status, body) = get(app(FakeSource::new(mixed_catalog())), "/api/search?q=milk&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    let hits: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["product"]["name"], "Milk Powder");

    let (_, empty) = get(app(FakeSource::new(mixed_catalog())), "/api/search?q=%20").await;
    assert_eq!(empty, "[]");
}

#[tokio::test]
async fn test_check_endpoint() {
    let (status, body) = get(app(FakeSource::new(mixed_catalog())), "/api/check?name=Milk%20Powder").await;
    assert_eq!(status, StatusCode::OK);
    let report: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(report["verdict"], "flagged");
    assert_eq!(report["related"][0]["name"], "Local Milk");

    let (status, _) = get(app(FakeSource::new(mixed_catalog())), "/api/check?name=Nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(app(FakeSource::new(mixed_catalog())), "/api/check").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_endpoint() {
    let (status, body) = get(app(FakeSource::new(mixed_catalog())), "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    let stats: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(stats["total"], 6);
    assert_eq!(stats["bangladesh"], 4);
    assert_eq!(stats["india"], 2);
}

#[tokio::test]
async fn test_unavailable_catalog_maps_to_503() {
    let source = FakeSource::new(mixed_catalog());
    source.set_failing(true);
    let (status, body) = get(app(source.clone()), "/api/products").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Catalog unavailable"));

    let (status, page) = get(app(source), "/").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(page.contains("Failed to load products"));
}

#[tokio::test]
async fn test_products_page_renders_table() {
    let (status, page) = get(app(FakeSource::new(mixed_catalog())), "/?origin=BD").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Local Milk"));
    assert!(!page.contains("Toothpaste"));
    assert!(page.contains(r#"<option value="BD" selected>"#));
}

#[tokio::test]
async fn test_search_index_follows_refreshed_catalog() {
    let source = FakeSource::new(mixed_catalog());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let loader = CatalogLoader::with_clock(source.clone(), MemoryStore::new(), clock.clone(), Duration::from_secs(60));
    let app = build_router(AppState {
        catalog: Arc::new(loader),
        related_approval: ApprovalGate::default(),
        suggest_limit: 10,
        search_index: Arc::new(IndexSnapshot::new()),
    });

    let (_, body) = get(app.clone(), "/api/search?q=doi").await;
    assert_eq!(body, "[]");
    let (_, body) = get(app.clone(), "/api/search?q=ghee").await;
    assert!(body.contains("Ghee"));
    assert_eq!(source.calls(), 1);

    let mut refreshed = mixed_catalog();
    refreshed.push(Product::new(7, "Mishti Doi", Origin::Bangladesh, "Dairy"));
    source.replace(refreshed);
    clock.advance(Duration::from_secs(61));

    let (status, body) = get(app, "/api/search?q=doi").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Mishti Doi"));
    assert_eq!(source.calls(), 2);
}
