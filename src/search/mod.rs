//! Fuzzy suggestion index over the loaded catalog.

mod debounce;
mod fuzzy;
mod index;
mod snapshot;

pub use debounce::Debouncer;
pub use fuzzy::{field_score, DEFAULT_THRESHOLD};
pub use index::{SearchIndex, Suggestion};
pub use snapshot::IndexSnapshot;
