//! Namespace Store Module
//!
//! One independently keyed, independently clearable map per category of
//! cached data.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Namespace ==
/// Typed TTL map for one category of cached data.
///
/// The namespace never consults the clock on its own; callers pass `now` so a
/// whole operation on the service observes a single instant.
#[derive(Debug)]
pub struct Namespace<K, V> {
    /// Name used in log lines
    name: &'static str,
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K, V> Namespace<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    /// Creates an empty namespace.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: HashMap::new(),
        }
    }

    /// Returns the namespace name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    // == Get ==
    /// Returns the live value for `key`.
    ///
    /// An expired entry is reported as absent but left in place; removing it
    /// is the sweeper's job.
    pub fn get<Q>(&self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| &entry.value)
    }

    /// Returns the live entry for `key`, including its timestamps.
    pub fn entry<Q>(&self, key: &Q, now: Instant) -> Option<&CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key).filter(|entry| !entry.is_expired_at(now))
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any previous entry and resetting
    /// its expiry to `now + ttl`.
    pub fn insert(&mut self, key: K, value: V, now: Instant, ttl: Duration) {
        self.entries.insert(key, CacheEntry::new(value, now, ttl));
    }

    // == Remove ==
    /// Removes `key`. Returns true if an entry (live or expired) was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Drops every entry and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries = HashMap::new();
        removed
    }

    // == Sweep ==
    /// Removes all entries expired at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired-but-unswept included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the namespace holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
