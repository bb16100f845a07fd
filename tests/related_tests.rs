mod common;

use std::collections::HashSet;

use bikolpo::models::{Origin, Product, ProductId, RelatedRef};
use bikolpo::services::{resolve_related, ApprovalGate};

use common::mixed_catalog;

fn ids(products: &[Product]) -> Vec<ProductId> {
    products.iter().map(|p| p.id.clone()).collect()
}

#[test]
fn test_never_includes_selected_and_no_duplicates() {
    let catalog = mixed_catalog();
    for gate in [ApprovalGate::Off, ApprovalGate::WhenPresent, ApprovalGate::Strict] {
        for selected in &catalog {
            let related = resolve_related(selected, &catalog, gate);
            assert!(related.iter().all(|p| p.id != selected.id));
            let unique: HashSet<_> = related.iter().map(|p| p.id.clone()).collect();
            assert_eq!(unique.len(), related.len());
        }
    }
}

#[test]
fn test_curated_first_then_same_category() {
    let catalog = mixed_catalog();
    let related = resolve_related(&catalog[0], &catalog, ApprovalGate::WhenPresent);
    // 2 and 5 are curated, 2 and 6 share the category; 2 appears once.
    assert_eq!(ids(&related), vec![2.into(), 5.into(), 6.into()]);
}

#[test]
fn test_strict_gate_drops_unapproved_curated_entries() {
    let catalog = mixed_catalog();
    let related = resolve_related(&catalog[0], &catalog, ApprovalGate::Strict);
    // 2 has no flag so it is not curated, but still shows as a same-category match.
    assert_eq!(ids(&related), vec![5.into(), 2.into(), 6.into()]);
}

#[test]
fn test_default_gate_hides_unflagged_curated_entries() {
    let selected = Product::new("a", "Coke", Origin::India, "Soft Drinks")
        .with_related(vec![RelatedRef::Reference("b".into()), RelatedRef::Reference("c".into())]);
    let catalog = vec![
        selected.clone(),
        Product::new("b", "Mojo", Origin::Bangladesh, "Cola"),
        Product::new("c", "Speed", Origin::Bangladesh, "Energy").with_approved(true),
    ];
    let related = resolve_related(&selected, &catalog, ApprovalGate::default());
    assert_eq!(ids(&related), vec!["c".into()]);

    let lenient = resolve_related(&selected, &catalog, ApprovalGate::WhenPresent);
    assert_eq!(ids(&lenient), vec!["b".into(), "c".into()]);
}

#[test]
fn test_self_reference_is_dropped() {
    let selected = Product::new(1, "Biscuit", Origin::India, "Snacks")
        .with_related(vec![RelatedRef::Reference(1.into()), RelatedRef::Reference(2.into())]);
    let catalog = vec![selected.clone(), Product::new(2, "Chanachur", Origin::Bangladesh, "Snacks")];
    let related = resolve_related(&selected, &catalog, ApprovalGate::Off);
    assert_eq!(ids(&related), vec![2.into()]);
}

#[test]
fn test_embedded_records_and_unresolvable_refs() {
    let embedded = Product::new("https://x/p/77/", "Pran Juice", Origin::Bangladesh, "Drinks").with_approved(true);
    let rejected = Product::new("https://x/p/78/", "Other Juice", Origin::Bangladesh, "Drinks").with_approved(false);
    let selected = Product::new("https://x/p/1/", "Frooti", Origin::India, "Beverages").with_related(vec![
        RelatedRef::Embedded(Box::new(embedded)),
        RelatedRef::Embedded(Box::new(rejected)),
        RelatedRef::Reference("https://x/p/404/".into()),
    ]);
    let catalog = vec![selected.clone()];

    let related = resolve_related(&selected, &catalog, ApprovalGate::WhenPresent);
    assert_eq!(ids(&related), vec!["https://x/p/77/".into()]);

    let ungated = resolve_related(&selected, &catalog, ApprovalGate::Off);
    assert_eq!(ungated.len(), 2);
}

#[test]
fn test_empty_when_nothing_related() {
    let selected = Product::new(1, "Lonely", Origin::India, "");
    let catalog = vec![selected.clone(), Product::new(2, "Also empty", Origin::Bangladesh, "")];
    assert!(resolve_related(&selected, &catalog, ApprovalGate::default()).is_empty());
}
