pub mod helpers;
pub mod catalog;
pub mod pages;

pub use catalog::{check_get, products_get, search_get, stats_get};
pub use pages::root_get;
