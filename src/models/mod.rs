pub mod product_id;
pub mod origin;
pub mod product;
pub mod catalog_stats;
pub mod app_state;

pub use product_id::ProductId;
pub use origin::{Origin, OriginFilter, Verdict};
pub use product::{Product, RelatedRef};
pub use catalog_stats::CatalogStats;
pub use app_state::AppState;
