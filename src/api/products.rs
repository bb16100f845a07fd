use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::error::SourceError;
use crate::models::{Origin, Product, ProductId, RelatedRef};
use crate::utils::value_to_short_string;

/// Product record as the backend sends it. Every field is optional so that
/// partial records embedded in `related_product` decode too.
#[derive(Deserialize, Debug, Default)]
struct RawProduct {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    url: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "originCountry")]
    origin_country: Option<String>,
    #[serde(default)]
    barcode: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default, alias = "related_products", alias = "relatedProductRefs")]
    related_product: Option<Vec<RawRelated>>,
    #[serde(default)]
    approved: Option<bool>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawRelated {
    Embedded(Box<RawProduct>),
    Reference(Value),
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum CatalogPayload {
    List(Vec<RawProduct>),
    Envelope { results: Vec<RawProduct> },
}

/// Decode a catalog response body into normalized products.
///
/// Accepts a bare array or an object with a `results` array. Records without
/// an identifier are dropped, and so are later records repeating an id.
pub fn parse_catalog_payload(body: &str) -> Result<Vec<Product>, SourceError> {
    let payload: CatalogPayload =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    let raw = match payload {
        CatalogPayload::List(items) => items,
        CatalogPayload::Envelope { results } => results,
    };

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());
    for item in raw {
        let Some(product) = normalize(item) else {
            tracing::warn!("Skipping catalog record without an identifier");
            continue;
        };
        if !seen.insert(product.id.clone()) {
            tracing::warn!(id = %product.id, "Skipping duplicate catalog record");
            continue;
        }
        out.push(product);
    }
    Ok(out)
}

fn normalize(raw: RawProduct) -> Option<Product> {
    let id = raw
        .id
        .as_ref()
        .and_then(ProductId::from_value)
        .or_else(|| raw.url.as_ref().and_then(ProductId::from_value))?;

    let related = raw
        .related_product
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| match r {
            RawRelated::Embedded(inner) => normalize(*inner).map(|p| RelatedRef::Embedded(Box::new(p))),
            RawRelated::Reference(v) => ProductId::from_value(&v).map(RelatedRef::Reference),
        })
        .collect();

    Some(Product {
        id,
        name: raw.name.unwrap_or_default().trim().to_string(),
        origin: Origin::parse(raw.origin_country.as_deref().unwrap_or_default()),
        barcode: non_empty(raw.barcode.as_ref().map(value_to_short_string)),
        category: raw.category.as_ref().map(value_to_short_string).unwrap_or_default().trim().to_string(),
        details: non_empty(raw.details),
        related,
        approved: raw.approved,
    })
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
