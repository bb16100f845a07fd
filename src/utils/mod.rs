// JSON utilities
pub mod json_converter;

// Terminal output
pub mod table;

pub use json_converter::value_to_short_string;
pub use table::{new_table, product_table, related_table};
