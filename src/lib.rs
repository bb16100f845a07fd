//! Product origin lookup: fetch a product catalog, cache it locally with a
//! time-based expiry, fuzzy-search it and suggest locally sourced
//! alternatives for flagged products.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod search;
pub mod services;
pub mod session;
pub mod templates;
pub mod utils;

pub use cache::CatalogLoader;
pub use error::{CatalogError, LookupError, SourceError, StoreError};
pub use models::{Origin, Product, ProductId, RelatedRef, Verdict};
pub use search::SearchIndex;
