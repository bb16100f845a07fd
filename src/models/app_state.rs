use std::sync::Arc;

use crate::cache::LoadCatalog;
use crate::search::IndexSnapshot;
use crate::services::ApprovalGate;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn LoadCatalog>,
    pub related_approval: ApprovalGate,
    pub suggest_limit: usize,
    pub search_index: Arc<IndexSnapshot>,
}
