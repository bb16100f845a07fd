// Remote catalog access
pub mod client;
pub mod products;

// Re-export commonly used items
pub use client::{set_silent, CatalogSource, HttpCatalogSource};
pub use products::parse_catalog_payload;
