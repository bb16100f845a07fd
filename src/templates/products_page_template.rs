use askama::Template;

use crate::models::{CatalogStats, Product, Verdict};

/// One pre-formatted table row.
pub struct ProductRow {
    pub name: String,
    pub origin: String,
    pub symbol: &'static str,
    pub category: String,
    pub barcode: String,
    pub css_class: &'static str,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        let verdict = p.verdict();
        Self {
            name: p.name.clone(),
            origin: p.origin.display_name().to_string(),
            symbol: verdict.symbol(),
            category: p.category.clone(),
            barcode: p.barcode.clone().unwrap_or_else(|| "N/A".into()),
            css_class: match verdict {
                Verdict::Flagged => "flagged",
                Verdict::Alternative => "alternative",
                Verdict::Unknown => "",
            },
        }
    }
}

#[derive(Template)]
#[template(path = "products.html")]
pub struct ProductsPageTemplate {
    pub stats: CatalogStats,
    pub active_filter: String,
    pub rows: Vec<ProductRow>,
    pub error: Option<String>,
}
