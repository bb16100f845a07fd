//! Read-through catalog cache with time-based expiry.
//!
//! The loader is the only component that touches persisted cache state. It
//! answers from the store while the entry is younger than the TTL and
//! otherwise fetches from the [`CatalogSource`](crate::api::CatalogSource),
//! overwriting the entry on success.

mod clock;
mod loader;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use loader::{CacheStatus, CatalogLoader, LoadCatalog, CACHE_KEY, CACHE_TIMESTAMP_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
