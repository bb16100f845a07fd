use std::sync::{Arc, Mutex, PoisonError};

use super::index::SearchIndex;
use crate::models::Product;

/// Keeps the last built [`SearchIndex`] together with the cache timestamp
/// of the catalog it was built from.
///
/// Callers pass a stamp only when it was the same before and after loading
/// the products, so an index is never filed under another catalog's stamp.
#[derive(Default)]
pub struct IndexSnapshot {
    current: Mutex<Option<(i64, Arc<SearchIndex>)>>,
}

impl IndexSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index for `products`, reused while `fetched_at` matches the stored
    /// stamp. Without a stamp the index is built and not kept.
    pub fn get_or_build(&self, fetched_at: Option<i64>, products: &[Product]) -> Arc<SearchIndex> {
        let Some(stamp) = fetched_at else {
            return Arc::new(SearchIndex::build(products));
        };
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached, index)) = current.as_ref() {
            if *cached == stamp {
                return index.clone();
            }
        }
        let index = Arc::new(SearchIndex::build(products));
        *current = Some((stamp, index.clone()));
        index
    }
}
