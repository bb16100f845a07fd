use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use crate::models::{Product, ProductId, RelatedRef};

/// How the `approved` flag on curated related products is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalGate {
    /// Ignore the flag entirely.
    Off,
    /// Drop entries explicitly marked `approved: false`.
    WhenPresent,
    /// Keep only entries marked `approved: true`; unflagged records are
    /// not surfaced.
    #[default]
    Strict,
}

impl ApprovalGate {
    pub fn admits(&self, product: &Product) -> bool {
        match self {
            ApprovalGate::Off => true,
            ApprovalGate::WhenPresent => product.approved != Some(false),
            ApprovalGate::Strict => product.approved == Some(true),
        }
    }
}

impl FromStr for ApprovalGate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" | "none" => Ok(ApprovalGate::Off),
            "when-present" | "when_present" => Ok(ApprovalGate::WhenPresent),
            "strict" | "required" | "default" => Ok(ApprovalGate::Strict),
            other => Err(format!("unknown approval gate '{}'", other)),
        }
    }
}

/// Alternatives to show for `selected`.
///
/// Curated entries come first (references resolved against `catalog`,
/// embedded records used as-is, both filtered by `gate`), followed by every
/// other product in the same category. The result never contains `selected`
/// and holds each identifier once, in first-seen order.
pub fn resolve_related(selected: &Product, catalog: &[Product], gate: ApprovalGate) -> Vec<Product> {
    let by_id: HashMap<&ProductId, &Product> = catalog.iter().map(|p| (&p.id, p)).collect();

    let curated = selected.related.iter().filter_map(|r| match r {
        RelatedRef::Reference(id) => {
            let found = by_id.get(id).copied();
            if found.is_none() {
                tracing::debug!(%id, "Dropping unresolvable related reference");
            }
            found
        }
        RelatedRef::Embedded(product) => Some(product.as_ref()),
    })
    .filter(|p| gate.admits(p));

    let same_category = catalog
        .iter()
        .filter(|p| !selected.category.is_empty() && p.category == selected.category);

    let mut seen: HashSet<ProductId> = HashSet::new();
    seen.insert(selected.id.clone());
    let mut out = Vec::new();
    for product in curated.chain(same_category) {
        if seen.insert(product.id.clone()) {
            out.push(product.clone());
        }
    }
    out
}
