//! Capability views a generated cache exposes.
//!
//! Every view is a façade over the *same* underlying cache state: a write through the map view is visible through
//! the default view and vice versa. Views are handed out as `Arc` trait objects so one argument vector can own
//! several of them at once.
//!
//! Optional capabilities return `None` when the cache was not configured for them (an unbounded cache has no
//! eviction view, a cache without write expiry has no write-expiration view).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Key type of the caches under test.
pub type Key = i32;

/// Value type of the caches under test.
pub type Value = i32;

/// A source of monotonic nanoseconds.
pub trait Ticker: Send + Sync + fmt::Debug {
    fn read(&self) -> u64;
}

/// Map-like view over a cache.
pub trait MapView: Send + Sync + fmt::Debug {
    fn get(&self, key: Key) -> Option<Value>;
    /// Insert and return the previous value.
    fn insert(&self, key: Key, value: Value) -> Option<Value>;
    fn remove(&self, key: Key) -> Option<Value>;
    fn contains_key(&self, key: Key) -> bool {
        self.get(key).is_some()
    }
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn clear(&self);
}

/// Size-bounded eviction control.
pub trait Eviction: Send + Sync + fmt::Debug {
    fn maximum(&self) -> u64;
    /// Change the bound; entries beyond it are evicted immediately.
    fn set_maximum(&self, maximum: u64);
    fn is_weighted(&self) -> bool {
        false
    }
}

/// Expiration control for one flavour (access-based or write-based).
pub trait Expiration: Send + Sync + fmt::Debug {
    fn expires_after(&self) -> Duration;
    fn set_expires_after(&self, duration: Duration);
    /// Time since the entry was last accessed or written, depending on the flavour.
    fn age_of(&self, key: Key) -> Option<Duration>;
}

/// The default view of a generated cache.
pub trait Cache: Send + Sync + fmt::Debug {
    /// True when missing entries are loaded on `get`.
    fn is_loading(&self) -> bool;

    fn get_if_present(&self, key: Key) -> Option<Value>;
    /// Return the cached value, loading it when this is a loading cache.
    fn get(&self, key: Key) -> Option<Value>;
    fn put(&self, key: Key, value: Value);
    fn invalidate(&self, key: Key);
    fn estimated_size(&self) -> u64;

    fn as_map(&self) -> Arc<dyn MapView>;
    fn eviction(&self) -> Option<Arc<dyn Eviction>>;
    fn expire_after_access(&self) -> Option<Arc<dyn Expiration>>;
    fn expire_after_write(&self) -> Option<Arc<dyn Expiration>>;
}
