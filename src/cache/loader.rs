use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt};
use tokio::sync::Mutex;

use super::clock::{Clock, SystemClock};
use super::store::KeyValueStore;
use crate::api::CatalogSource;
use crate::error::{CatalogError, StoreError};
use crate::models::Product;

pub const CACHE_KEY: &str = "productsData";
pub const CACHE_TIMESTAMP_KEY: &str = "productsData_timestamp";

/// What the store currently holds, as reported by `bikolpo cache status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    pub fetched_at_millis: Option<i64>,
    pub age: Option<Duration>,
    pub fresh: bool,
}

/// Object-safe view of a loader so the HTTP layer does not need to know the
/// concrete source, store and clock.
pub trait LoadCatalog: Send + Sync {
    fn load_catalog(&self) -> BoxFuture<'_, Result<Vec<Product>, CatalogError>>;

    /// Epoch millis of the stored catalog, if there is one.
    fn fetched_at(&self) -> Option<i64>;
}

pub struct CatalogLoader<S, K, C = SystemClock> {
    source: S,
    store: K,
    clock: C,
    ttl: Duration,
    // Held across the whole read-or-fetch sequence.
    in_flight: Mutex<()>,
}

impl<S, K> CatalogLoader<S, K, SystemClock>
where
    S: CatalogSource,
    K: KeyValueStore,
{
    pub fn new(source: S, store: K, ttl: Duration) -> Self {
        Self::with_clock(source, store, SystemClock, ttl)
    }
}

impl<S, K, C> CatalogLoader<S, K, C>
where
    S: CatalogSource,
    K: KeyValueStore,
    C: Clock,
{
    pub fn with_clock(source: S, store: K, clock: C, ttl: Duration) -> Self {
        Self {
            source,
            store,
            clock,
            ttl,
            in_flight: Mutex::new(()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the catalog, from the cache while it is fresh and from the
    /// source otherwise. An expired entry is never served as a fallback.
    pub async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let _guard = self.in_flight.lock().await;

        if let Some(products) = self.read_fresh() {
            tracing::info!(count = products.len(), "Using cached catalog");
            return Ok(products);
        }

        tracing::info!("Fetching catalog from source");
        let products = self.source.fetch_all().await.map_err(|e| {
            tracing::error!(%e, "Catalog unavailable");
            CatalogError::Unavailable(e)
        })?;

        match self.write(&products) {
            Ok(()) => tracing::info!(count = products.len(), "Catalog cached"),
            Err(e) => tracing::error!(%e, "Failed to persist catalog cache"),
        }
        Ok(products)
    }

    /// Drop both cache entries so the next load goes to the source.
    pub fn invalidate(&self) -> Result<(), StoreError> {
        self.store.remove(CACHE_KEY)?;
        self.store.remove(CACHE_TIMESTAMP_KEY)?;
        tracing::info!("Catalog cache cleared");
        Ok(())
    }

    pub fn cache_status(&self) -> CacheStatus {
        let fetched_at = self.read_timestamp();
        let age = fetched_at.and_then(|ts| self.age_of(ts));
        CacheStatus {
            fetched_at_millis: fetched_at,
            age,
            fresh: age.is_some_and(|a| a < self.ttl),
        }
    }

    fn age_of(&self, fetched_at: i64) -> Option<Duration> {
        let elapsed = self.clock.now_millis().checked_sub(fetched_at)?;
        // A timestamp from the future is treated as unusable.
        u64::try_from(elapsed).ok().map(Duration::from_millis)
    }

    fn read_timestamp(&self) -> Option<i64> {
        let raw = match self.store.get(CACHE_TIMESTAMP_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(%e, "Failed to read cache timestamp");
                return None;
            }
        };
        match std::str::from_utf8(&raw).ok().and_then(|s| s.trim().parse::<i64>().ok()) {
            Some(ts) => Some(ts),
            None => {
                tracing::warn!("Ignoring unparsable cache timestamp");
                None
            }
        }
    }

    fn read_fresh(&self) -> Option<Vec<Product>> {
        let fetched_at = self.read_timestamp()?;
        match self.age_of(fetched_at) {
            Some(age) if age < self.ttl => {}
            _ => {
                tracing::info!(fetched_at, "Cached catalog expired");
                return None;
            }
        }

        let payload = match self.store.get(CACHE_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(%e, "Failed to read cached catalog");
                return None;
            }
        };
        match serde_json::from_slice(&payload) {
            Ok(products) => Some(products),
            Err(e) => {
                tracing::warn!(%e, "Ignoring undecodable cached catalog");
                None
            }
        }
    }

    fn write(&self, products: &[Product]) -> Result<(), StoreError> {
        let payload = serde_json::to_vec(products)
            .map_err(|e| StoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        // Payload first: a crash in between leaves an old timestamp, which at
        // worst forces one extra fetch.
        self.store.set(CACHE_KEY, &payload)?;
        self.store
            .set(CACHE_TIMESTAMP_KEY, self.clock.now_millis().to_string().as_bytes())?;
        Ok(())
    }
}

impl<S, K, C> LoadCatalog for CatalogLoader<S, K, C>
where
    S: CatalogSource,
    K: KeyValueStore,
    C: Clock,
{
    fn load_catalog(&self) -> BoxFuture<'_, Result<Vec<Product>, CatalogError>> {
        self.load().boxed()
    }

    fn fetched_at(&self) -> Option<i64> {
        self.read_timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, MemoryStore};
    use crate::error::SourceError;
    use crate::models::{Origin, Product};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedSource {
        calls: AtomicUsize,
    }

    impl CatalogSource for FixedSource {
        async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Product::new(1, "Soap", Origin::Bangladesh, "Care")])
        }
    }

    #[tokio::test]
    async fn test_future_timestamp_is_stale() {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(10_000));
        let loader = CatalogLoader::with_clock(
            FixedSource { calls: AtomicUsize::new(0) },
            store.clone(),
            clock.clone(),
            Duration::from_secs(60),
        );
        store.set(CACHE_KEY, b"[]").unwrap();
        store.set(CACHE_TIMESTAMP_KEY, b"99999999").unwrap();

        let products = loader.load().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.get(CACHE_TIMESTAMP_KEY).unwrap().as_deref(), Some(&b"10000"[..]));
    }

    #[tokio::test]
    async fn test_garbage_entry_is_a_miss() {
        let store = Arc::new(MemoryStore::new());
        let loader = CatalogLoader::with_clock(
            FixedSource { calls: AtomicUsize::new(0) },
            store.clone(),
            ManualClock::new(10_000),
            Duration::from_secs(60),
        );
        store.set(CACHE_KEY, b"{not json").unwrap();
        store.set(CACHE_TIMESTAMP_KEY, b"9999").unwrap();

        assert_eq!(loader.load().await.unwrap().len(), 1);
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cache_status() {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(100_000));
        let loader = CatalogLoader::with_clock(
            FixedSource { calls: AtomicUsize::new(0) },
            store.clone(),
            clock.clone(),
            Duration::from_secs(60),
        );
        assert_eq!(loader.ttl(), Duration::from_secs(60));
        assert_eq!(loader.cache_status(), CacheStatus { fetched_at_millis: None, age: None, fresh: false });

        store.set(CACHE_TIMESTAMP_KEY, b"90000").unwrap();
        let status = loader.cache_status();
        assert_eq!(status.age, Some(Duration::from_secs(10)));
        assert!(status.fresh);

        clock.advance(Duration::from_secs(60));
        assert!(!loader.cache_status().fresh);

        loader.invalidate().unwrap();
        assert!(store.is_empty());
    }
}
