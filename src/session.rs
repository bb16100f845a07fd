//! Presentation state for one lookup session: the query echo, the latest
//! suggestion list and the currently selected product.
use std::sync::Arc;

use crate::models::Product;
use crate::search::SearchIndex;
use crate::services::{check_product, ApprovalGate, ProductReport};

pub struct SearchSession {
    index: Arc<SearchIndex>,
    gate: ApprovalGate,
    input: String,
    suggestions: Vec<Product>,
    selected: Option<ProductReport>,
    search_performed: bool,
}

impl SearchSession {
    pub fn new(index: Arc<SearchIndex>, gate: ApprovalGate) -> Self {
        Self {
            index,
            gate,
            input: String::new(),
            suggestions: Vec::new(),
            selected: None,
            search_performed: false,
        }
    }

    pub fn index(&self) -> &Arc<SearchIndex> {
        &self.index
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[Product] {
        &self.suggestions
    }

    pub fn selected(&self) -> Option<&ProductReport> {
        self.selected.as_ref()
    }

    pub fn search_performed(&self) -> bool {
        self.search_performed
    }

    /// Record a keystroke. Suggestions are recomputed separately, after the
    /// debounce window, and handed back through `apply_suggestions`.
    pub fn on_input(&mut self, value: &str) {
        self.input = value.to_string();
        self.search_performed = true;
    }

    /// Store a debounced result. Results for a query the user has already
    /// typed past are discarded.
    pub fn apply_suggestions(&mut self, query: &str, suggestions: Vec<Product>) -> bool {
        if query != self.input {
            tracing::debug!(query, current = %self.input, "Discarding stale suggestions");
            return false;
        }
        self.suggestions = suggestions;
        true
    }

    /// Pick a product by exact name. Clears the suggestion list and the input
    /// echo first; an unknown name leaves nothing selected.
    pub fn select(&mut self, name: &str) -> Option<&ProductReport> {
        self.suggestions.clear();
        self.input.clear();
        match check_product(self.index.products(), name, self.gate) {
            Ok(report) => self.selected = Some(report),
            Err(e) => {
                tracing::info!(%e, "Selection no longer resolvable");
                self.selected = None;
            }
        }
        self.selected.as_ref()
    }

    /// Select the n-th entry (0-based) of the current suggestion list.
    pub fn select_suggestion(&mut self, position: usize) -> Option<&ProductReport> {
        let name = self.suggestions.get(position)?.name.clone();
        self.select(&name)
    }

    pub fn close(&mut self) {
        self.selected = None;
    }
}
