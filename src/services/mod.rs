// Catalog services built on top of a loaded product list
pub mod related;
pub mod lookup;

pub use related::{resolve_related, ApprovalGate};
pub use lookup::{check_product, filter_by_origin, find_product, ProductReport};
