pub mod products_page_template;

pub use products_page_template::{ProductRow, ProductsPageTemplate};
