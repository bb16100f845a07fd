use serde::Serialize;

use super::related::{resolve_related, ApprovalGate};
use crate::error::LookupError;
use crate::models::{OriginFilter, Product, Verdict};

/// Everything the result view shows for one product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductReport {
    pub product: Product,
    pub verdict: Verdict,
    pub related: Vec<Product>,
}

/// Find a product by exact name, then case-insensitive name, then barcode.
pub fn find_product<'a>(catalog: &'a [Product], name: &str) -> Option<&'a Product> {
    let wanted = name.trim();
    if wanted.is_empty() {
        return None;
    }
    catalog
        .iter()
        .find(|p| p.name == wanted)
        .or_else(|| catalog.iter().find(|p| p.name.eq_ignore_ascii_case(wanted)))
        .or_else(|| catalog.iter().find(|p| p.barcode.as_deref() == Some(wanted)))
}

pub fn check_product(catalog: &[Product], name: &str, gate: ApprovalGate) -> Result<ProductReport, LookupError> {
    let product = find_product(catalog, name).ok_or_else(|| LookupError::ProductNotFound(name.trim().to_string()))?;
    let related = resolve_related(product, catalog, gate);
    tracing::debug!(id = %product.id, related = related.len(), "Resolved product");
    Ok(ProductReport {
        product: product.clone(),
        verdict: product.verdict(),
        related,
    })
}

pub fn filter_by_origin(products: &[Product], filter: &OriginFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|p| filter.matches(&p.origin))
        .cloned()
        .collect()
}
