//! In-memory reference cache implementing every capability view.
//!
//! This is the cache the bundled generator produces. It is deliberately simple: a `BTreeMap` behind a mutex,
//! FIFO eviction by write time, and expiration evaluated lazily against the scenario's [`FakeTicker`].
//!
//! All views hold the same `Arc<Shared>`, so a mutation through one is visible through every other.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use cache_scenarios_core::views::{Cache, Eviction, Expiration, Key, MapView, Ticker, Value};

use crate::scenario::{Compute, Configuration, FakeTicker};

#[derive(Debug, Clone, Copy)]
struct Entry {
    value: Value,
    written: u64,
    accessed: u64,
}

#[derive(Debug, Default)]
struct State {
    entries: BTreeMap<Key, Entry>,
    maximum: Option<u64>,
    expire_after_access: Option<Duration>,
    expire_after_write: Option<Duration>,
}

impl State {
    fn is_expired(&self, entry: &Entry, now: u64) -> bool {
        let stale = |since: u64, limit: Option<Duration>| limit.is_some_and(|limit| elapsed(since, now) >= limit);
        stale(entry.accessed, self.expire_after_access) || stale(entry.written, self.expire_after_write)
    }

    fn expire(&mut self, now: u64) {
        let expired: Vec<Key> = self
            .entries
            .iter()
            .filter(|(_, entry)| self.is_expired(entry, now))
            .map(|(key, _)| *key)
            .collect();
        for key in expired {
            self.entries.remove(&key);
        }
    }

    /// Evict the oldest writes until the bound holds.
    fn evict(&mut self) {
        let Some(maximum) = self.maximum else {
            return;
        };
        while self.entries.len() as u64 > maximum {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(key, entry)| (entry.written, **key))
                .map(|(key, _)| *key);
            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

fn elapsed(since: u64, now: u64) -> Duration {
    Duration::from_nanos(now.saturating_sub(since))
}

#[derive(Debug)]
struct Shared {
    ticker: Arc<FakeTicker>,
    loading: bool,
    bounded: bool,
    access_expiry: bool,
    write_expiry: bool,
    state: Mutex<State>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock with expired entries already removed.
    fn lock_live(&self) -> (MutexGuard<'_, State>, u64) {
        let now = self.ticker.read();
        let mut state = self.lock();
        state.expire(now);
        (state, now)
    }

    fn read(&self, key: Key) -> Option<Value> {
        let (mut state, now) = self.lock_live();
        let entry = state.entries.get_mut(&key)?;
        entry.accessed = now;
        Some(entry.value)
    }

    fn write(&self, key: Key, value: Value) -> Option<Value> {
        let (mut state, now) = self.lock_live();
        let previous = state.entries.insert(
            key,
            Entry {
                value,
                written: now,
                accessed: now,
            },
        );
        state.evict();
        previous.map(|entry| entry.value)
    }

    fn remove(&self, key: Key) -> Option<Value> {
        let (mut state, _) = self.lock_live();
        state.entries.remove(&key).map(|entry| entry.value)
    }

    fn len(&self) -> usize {
        let (state, _) = self.lock_live();
        state.entries.len()
    }
}

/// The loader used by loading caches: the value of `key` is `-key`.
fn load(key: Key) -> Value {
    key.wrapping_neg()
}

/// A cache configured from one scenario [`Configuration`].
#[derive(Debug, Clone)]
pub struct ReferenceCache {
    shared: Arc<Shared>,
}

impl ReferenceCache {
    pub fn new(configuration: &Configuration, ticker: Arc<FakeTicker>) -> Self {
        let state = State {
            entries: BTreeMap::new(),
            maximum: configuration.maximum_size.bound(),
            expire_after_access: configuration.expire_after_access.duration(),
            expire_after_write: configuration.expire_after_write.duration(),
        };
        let shared = Shared {
            ticker,
            loading: configuration.compute == Compute::Loading,
            bounded: state.maximum.is_some(),
            access_expiry: state.expire_after_access.is_some(),
            write_expiry: state.expire_after_write.is_some(),
            state: Mutex::new(state),
        };
        Self {
            shared: Arc::new(shared),
        }
    }
}

impl Cache for ReferenceCache {
    fn is_loading(&self) -> bool {
        self.shared.loading
    }

    fn get_if_present(&self, key: Key) -> Option<Value> {
        self.shared.read(key)
    }

    fn get(&self, key: Key) -> Option<Value> {
        if let Some(value) = self.shared.read(key) {
            return Some(value);
        }
        if !self.shared.loading {
            return None;
        }
        let value = load(key);
        self.shared.write(key, value);
        Some(value)
    }

    fn put(&self, key: Key, value: Value) {
        self.shared.write(key, value);
    }

    fn invalidate(&self, key: Key) {
        self.shared.remove(key);
    }

    fn estimated_size(&self) -> u64 {
        self.shared.len() as u64
    }

    fn as_map(&self) -> Arc<dyn MapView> {
        Arc::new(MapHandle(Arc::clone(&self.shared)))
    }

    fn eviction(&self) -> Option<Arc<dyn Eviction>> {
        if !self.shared.bounded {
            return None;
        }
        Some(Arc::new(EvictionHandle(Arc::clone(&self.shared))))
    }

    fn expire_after_access(&self) -> Option<Arc<dyn Expiration>> {
        if !self.shared.access_expiry {
            return None;
        }
        Some(Arc::new(ExpirationHandle {
            shared: Arc::clone(&self.shared),
            flavour: Flavour::Access,
        }))
    }

    fn expire_after_write(&self) -> Option<Arc<dyn Expiration>> {
        if !self.shared.write_expiry {
            return None;
        }
        Some(Arc::new(ExpirationHandle {
            shared: Arc::clone(&self.shared),
            flavour: Flavour::Write,
        }))
    }
}

#[derive(Debug)]
struct MapHandle(Arc<Shared>);

impl MapView for MapHandle {
    fn get(&self, key: Key) -> Option<Value> {
        self.0.read(key)
    }

    fn insert(&self, key: Key, value: Value) -> Option<Value> {
        self.0.write(key, value)
    }

    fn remove(&self, key: Key) -> Option<Value> {
        self.0.remove(key)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn clear(&self) {
        self.0.lock().entries.clear();
    }
}

#[derive(Debug)]
struct EvictionHandle(Arc<Shared>);

impl Eviction for EvictionHandle {
    fn maximum(&self) -> u64 {
        self.0.lock().maximum.unwrap_or(u64::MAX)
    }

    fn set_maximum(&self, maximum: u64) {
        let mut state = self.0.lock();
        state.maximum = Some(maximum);
        state.evict();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavour {
    Access,
    Write,
}

#[derive(Debug)]
struct ExpirationHandle {
    shared: Arc<Shared>,
    flavour: Flavour,
}

impl Expiration for ExpirationHandle {
    fn expires_after(&self) -> Duration {
        let state = self.shared.lock();
        let setting = match self.flavour {
            Flavour::Access => state.expire_after_access,
            Flavour::Write => state.expire_after_write,
        };
        setting.unwrap_or(Duration::MAX)
    }

    fn set_expires_after(&self, duration: Duration) {
        let mut state = self.shared.lock();
        match self.flavour {
            Flavour::Access => state.expire_after_access = Some(duration),
            Flavour::Write => state.expire_after_write = Some(duration),
        }
    }

    fn age_of(&self, key: Key) -> Option<Duration> {
        let (state, now) = self.shared.lock_live();
        let entry = state.entries.get(&key)?;
        let since = match self.flavour {
            Flavour::Access => entry.accessed,
            Flavour::Write => entry.written,
        };
        Some(elapsed(since, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Expire, Maximum, Population};

    fn configuration(maximum: Maximum, access: Expire, write: Expire, compute: Compute) -> Configuration {
        Configuration {
            population: Population::Empty,
            maximum_size: maximum,
            expire_after_access: access,
            expire_after_write: write,
            compute,
        }
    }

    fn unbounded() -> (ReferenceCache, Arc<FakeTicker>) {
        let ticker = Arc::new(FakeTicker::new());
        let config = configuration(Maximum::Disabled, Expire::Disabled, Expire::Disabled, Compute::Manual);
        (ReferenceCache::new(&config, Arc::clone(&ticker)), ticker)
    }

    #[test]
    fn test_map_view_shares_state() {
        let (cache, _) = unbounded();
        let map = cache.as_map();
        map.insert(1, 10);
        assert_eq!(cache.get_if_present(1), Some(10));

        cache.put(2, 20);
        assert_eq!(map.get(2), Some(20));
        assert_eq!(map.len(), 2);

        map.clear();
        assert_eq!(cache.estimated_size(), 0);
    }

    #[test]
    fn test_optional_views_follow_configuration() {
        let (cache, _) = unbounded();
        assert!(cache.eviction().is_none());
        assert!(cache.expire_after_access().is_none());
        assert!(cache.expire_after_write().is_none());

        let config = configuration(Maximum::Ten, Expire::OneMinute, Expire::Forever, Compute::Manual);
        let cache = ReferenceCache::new(&config, Arc::new(FakeTicker::new()));
        assert_eq!(cache.eviction().map(|e| e.maximum()), Some(10));
        assert_eq!(
            cache.expire_after_access().map(|e| e.expires_after()),
            Some(Duration::from_secs(60))
        );
        assert_eq!(cache.expire_after_write().map(|e| e.expires_after()), Some(Duration::MAX));
    }

    #[test]
    fn test_eviction_removes_oldest_writes() {
        let ticker = Arc::new(FakeTicker::new());
        let config = configuration(Maximum::Ten, Expire::Disabled, Expire::Disabled, Compute::Manual);
        let cache = ReferenceCache::new(&config, Arc::clone(&ticker));
        for key in 0..15 {
            ticker.advance(Duration::from_nanos(1));
            cache.put(key, key);
        }
        assert_eq!(cache.estimated_size(), 10);
        assert_eq!(cache.get_if_present(0), None);
        assert_eq!(cache.get_if_present(14), Some(14));

        cache.eviction().unwrap().set_maximum(1);
        assert_eq!(cache.estimated_size(), 1);
        assert_eq!(cache.get_if_present(14), Some(14));
    }

    #[test]
    fn test_write_expiration_uses_ticker() {
        let ticker = Arc::new(FakeTicker::new());
        let config = configuration(Maximum::Disabled, Expire::Disabled, Expire::OneMinute, Compute::Manual);
        let cache = ReferenceCache::new(&config, Arc::clone(&ticker));
        cache.put(1, 1);

        ticker.advance(Duration::from_secs(30));
        let expiration = cache.expire_after_write().unwrap();
        assert_eq!(expiration.age_of(1), Some(Duration::from_secs(30)));

        ticker.advance(Duration::from_secs(30));
        assert_eq!(cache.get_if_present(1), None);
    }

    #[test]
    fn test_access_expiration_resets_on_read() {
        let ticker = Arc::new(FakeTicker::new());
        let config = configuration(Maximum::Disabled, Expire::OneMinute, Expire::Disabled, Compute::Manual);
        let cache = ReferenceCache::new(&config, Arc::clone(&ticker));
        cache.put(1, 1);

        ticker.advance(Duration::from_secs(45));
        assert_eq!(cache.get_if_present(1), Some(1));
        ticker.advance(Duration::from_secs(45));
        assert_eq!(cache.get_if_present(1), Some(1));

        cache.expire_after_access().unwrap().set_expires_after(Duration::from_secs(10));
        ticker.advance(Duration::from_secs(10));
        assert_eq!(cache.get_if_present(1), None);
    }

    #[test]
    fn test_loading_cache_loads_on_miss() {
        let config = configuration(Maximum::Disabled, Expire::Disabled, Expire::Disabled, Compute::Loading);
        let cache = ReferenceCache::new(&config, Arc::new(FakeTicker::new()));
        assert!(cache.is_loading());
        assert_eq!(cache.get_if_present(3), None);
        assert_eq!(cache.get(3), Some(-3));
        assert_eq!(cache.get_if_present(3), Some(-3));

        let (manual, _) = unbounded();
        assert_eq!(manual.get(3), None);
    }
}
