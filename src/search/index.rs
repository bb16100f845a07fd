use serde::Serialize;

use super::fuzzy::{field_score, DEFAULT_THRESHOLD};
use crate::models::Product;

/// A ranked search hit.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub product: Product,
    pub score: f64,
}

struct IndexedFields {
    // name, barcode, category, details; absent fields are skipped
    fields: Vec<Vec<char>>,
}

/// Prepared lowercase copies of every searchable field in the catalog.
pub struct SearchIndex {
    products: Vec<Product>,
    entries: Vec<IndexedFields>,
    threshold: f64,
}

fn normalize(text: &str) -> Vec<char> {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .chars()
        .collect()
}

impl SearchIndex {
    pub fn build(products: &[Product]) -> Self {
        let entries = products
            .iter()
            .map(|p| {
                let fields = [
                    Some(p.name.as_str()),
                    p.barcode.as_deref(),
                    Some(p.category.as_str()),
                    p.details.as_deref(),
                ]
                .into_iter()
                .flatten()
                .map(normalize)
                .filter(|f| !f.is_empty())
                .collect();
                IndexedFields { fields }
            })
            .collect();
        tracing::debug!(count = products.len(), "Built search index");
        Self {
            products: products.to_vec(),
            entries,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Ranked products for a partial query, best match first.
    pub fn suggest(&self, query: &str) -> Vec<Product> {
        self.suggest_scored(query, None)
            .into_iter()
            .map(|s| s.product)
            .collect()
    }

    /// Like [`suggest`](Self::suggest) but keeps scores and caps the list.
    /// Blank queries yield nothing rather than the whole catalog.
    pub fn suggest_scored(&self, query: &str, limit: Option<usize>) -> Vec<Suggestion> {
        let pattern = normalize(query);
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(usize, f64)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                let best = entry
                    .fields
                    .iter()
                    .map(|f| field_score(&pattern, f))
                    .fold(1.0_f64, f64::min);
                (best <= self.threshold).then_some((i, best))
            })
            .collect();
        // Stable: equal scores keep catalog order.
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        if let Some(limit) = limit {
            hits.truncate(limit);
        }

        hits.into_iter()
            .map(|(i, score)| Suggestion {
                product: self.products[i].clone(),
                score,
            })
            .collect()
    }
}
