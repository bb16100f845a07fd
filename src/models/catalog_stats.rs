use serde::Serialize;

use crate::models::origin::Origin;
use crate::models::product::Product;

/// Per-origin counts shown above the product table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub bangladesh: usize,
    pub india: usize,
    pub other: usize,
}

impl CatalogStats {
    pub fn from_products(products: &[Product]) -> Self {
        let mut stats = CatalogStats { total: products.len(), ..Default::default() };
        for p in products {
            match p.origin {
                Origin::Bangladesh => stats.bangladesh += 1,
                Origin::India => stats.india += 1,
                Origin::Other(_) => stats.other += 1,
            }
        }
        stats
    }
}
