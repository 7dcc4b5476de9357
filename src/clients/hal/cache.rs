//! Response caching for GET requests.
//!
//! The cache stores raw response bodies keyed by the resolved URL plus query
//! parameters. Any successful mutation evicts everything: HAL relations make
//! it impractical to know which cached documents a write touched.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Identity of a cached GET.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Resolved request URL.
    pub url: String,
    /// Query parameters in request order.
    pub params: Vec<(String, String)>,
}

impl CacheKey {
    /// Creates a cache key.
    pub fn new(url: impl Into<String>, params: &[(String, String)]) -> Self {
        Self {
            url: url.into(),
            params: params.to_vec(),
        }
    }
}

/// Storage for GET response bodies.
///
/// Implementations must be safe to share between tasks.
pub trait ResourceCache: Send + Sync + Debug {
    /// Returns a live entry.
    fn get(&self, key: &CacheKey) -> Option<Value>;

    /// Stores an entry, replacing any previous one.
    fn put(&self, key: CacheKey, value: Value);

    /// Removes one entry.
    fn evict(&self, key: &CacheKey);

    /// Removes every entry.
    fn evict_all(&self);
}

/// A cache that stores nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCache;

impl ResourceCache for NoopCache {
    fn get(&self, _key: &CacheKey) -> Option<Value> {
        None
    }

    fn put(&self, _key: CacheKey, _value: Value) {}

    fn evict(&self, _key: &CacheKey) {}

    fn evict_all(&self) {}
}

#[derive(Clone, Debug)]
struct CachedEntry {
    value: Value,
    stored_at: DateTime<Utc>,
}

/// An in-process cache with a fixed entry lifetime.
///
/// Expired entries are dropped on lookup, and every insert prunes all
/// entries past their lifetime.
///
/// # Example
///
/// ```rust
/// use hateoas_client::clients::{CacheKey, InMemoryCache, ResourceCache};
/// use serde_json::json;
///
/// let cache = InMemoryCache::new(chrono::Duration::seconds(60));
/// let key = CacheKey::new("http://localhost/api/products/1", &[]);
/// cache.put(key.clone(), json!({"name": "Chair"}));
/// assert_eq!(cache.get(&key), Some(json!({"name": "Chair"})));
/// ```
#[derive(Debug)]
pub struct InMemoryCache {
    lifetime: Duration,
    entries: Mutex<HashMap<CacheKey, CachedEntry>>,
}

impl InMemoryCache {
    /// Creates an empty cache whose entries live for `lifetime`.
    #[must_use]
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the entry lifetime.
    #[must_use]
    pub const fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Returns the number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, CachedEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<Value> {
        let mut entries = self.entries();
        match entries.get(key) {
            Some(entry) if now - entry.stored_at < self.lifetime => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put_at(&self, key: CacheKey, value: Value, now: DateTime<Utc>) {
        let mut entries = self.entries();
        entries.retain(|_, entry| now - entry.stored_at < self.lifetime);
        entries.insert(
            key,
            CachedEntry {
                value,
                stored_at: now,
            },
        );
    }
}

impl ResourceCache for InMemoryCache {
    fn get(&self, key: &CacheKey) -> Option<Value> {
        self.get_at(key, Utc::now())
    }

    fn put(&self, key: CacheKey, value: Value) {
        self.put_at(key, value, Utc::now());
    }

    fn evict(&self, key: &CacheKey) {
        self.entries().remove(key);
    }

    fn evict_all(&self) {
        self.entries().clear();
    }
}
