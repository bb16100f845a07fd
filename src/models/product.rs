use serde::{Deserialize, Serialize};

use crate::models::origin::{Origin, Verdict};
use crate::models::product_id::ProductId;

/// A catalog record after ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub origin: Origin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<RelatedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

/// An entry of a product's curated related list: either a pointer into the
/// catalog or a record embedded in the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelatedRef {
    Reference(ProductId),
    Embedded(Box<Product>),
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: &str, origin: Origin, category: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            origin,
            barcode: None,
            category: category.to_string(),
            details: None,
            related: Vec::new(),
            approved: None,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.origin.verdict()
    }

    pub fn with_barcode(mut self, barcode: &str) -> Self {
        self.barcode = Some(barcode.to_string());
        self
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }

    pub fn with_related(mut self, related: Vec<RelatedRef>) -> Self {
        self.related = related;
        self
    }

    pub fn with_approved(mut self, approved: bool) -> Self {
        self.approved = Some(approved);
        self
    }
}
