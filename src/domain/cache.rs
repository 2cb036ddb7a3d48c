// ============================================================================
// Amount Cache
// Time-bounded memo for expensive derived amounts (leaderboard totals, etc.)
// ============================================================================

use crate::numeric::Amount;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Entry {
    value: Amount,
    stored_at: DateTime<Utc>,
}

/// Keyed cache of amounts that expire after a fixed time-to-live.
///
/// Owned by whoever computes the values; there is no process-wide instance.
/// Reads take a shared lock, so concurrent lookups do not block each other.
#[derive(Debug)]
pub struct AmountCache<K> {
    /// How long an entry stays valid after it was stored
    ttl: Duration,

    entries: RwLock<HashMap<K, Entry>>,
}

impl<K: Eq + Hash + Clone> AmountCache<K> {
    /// Create an empty cache
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Time-to-live of each entry
    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now - entry.stored_at < self.ttl
    }

    /// Cached value for `key` if it is still fresh at `now`
    pub fn get_at(&self, key: &K, now: DateTime<Utc>) -> Option<Amount> {
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| entry.value.clone())
    }

    /// Cached value for `key` if it is still fresh
    pub fn get(&self, key: &K) -> Option<Amount> {
        self.get_at(key, Utc::now())
    }

    /// Store a value computed at `now`
    pub fn insert_at(&self, key: K, value: Amount, now: DateTime<Utc>) {
        self.entries.write().insert(
            key,
            Entry {
                value,
                stored_at: now,
            },
        );
    }

    /// Store a value computed now
    pub fn insert(&self, key: K, value: Amount) {
        self.insert_at(key, value, Utc::now());
    }

    /// Fresh cached value, or compute, store and return a new one.
    ///
    /// The computation runs without holding the lock; if two callers race,
    /// the later result wins. Errors are returned as-is and nothing is stored.
    pub fn get_or_try_insert_with_at<E, F>(
        &self,
        key: &K,
        now: DateTime<Utc>,
        compute: F,
    ) -> Result<Amount, E>
    where
        F: FnOnce() -> Result<Amount, E>,
    {
        if let Some(value) = self.get_at(key, now) {
            return Ok(value);
        }

        let value = compute()?;
        tracing::trace!("amount cache miss, storing recomputed value");
        self.insert_at(key.clone(), value.clone(), now);
        Ok(value)
    }

    /// [`get_or_try_insert_with_at`](Self::get_or_try_insert_with_at) at the current time
    pub fn get_or_try_insert_with<E, F>(&self, key: &K, compute: F) -> Result<Amount, E>
    where
        F: FnOnce() -> Result<Amount, E>,
    {
        self.get_or_try_insert_with_at(key, Utc::now(), compute)
    }

    /// Drop one entry; returns whether it was present
    pub fn invalidate(&self, key: &K) -> bool {
        self.entries.write().remove(key).is_some()
    }

    /// Drop every entry
    pub fn invalidate_all(&self) {
        let mut entries = self.entries.write();
        let dropped = entries.len();
        entries.clear();
        tracing::debug!(dropped, "amount cache cleared");
    }

    /// Drop entries that are stale at `now`; returns how many were removed
    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| now - entry.stored_at < self.ttl);
        before - entries.len()
    }

    /// Number of stored entries, fresh or not
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericError;
    use std::sync::Arc;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_fresh_and_stale() {
        let cache = AmountCache::new(Duration::seconds(60));
        let t0 = start();
        cache.insert_at("total", Amount::from_integer(5), t0);

        assert_eq!(
            cache.get_at(&"total", t0 + Duration::seconds(59)),
            Some(Amount::from_integer(5))
        );
        assert_eq!(cache.get_at(&"total", t0 + Duration::seconds(60)), None);
        assert_eq!(cache.get_at(&"missing", t0), None);
    }

    #[test]
    fn test_get_or_try_insert_with() {
        let cache = AmountCache::new(Duration::seconds(60));
        let t0 = start();
        let mut calls = 0;

        let first: Result<_, NumericError> = cache.get_or_try_insert_with_at(&1u64, t0, || {
            calls += 1;
            Ok(Amount::from_integer(10))
        });
        assert_eq!(first, Ok(Amount::from_integer(10)));

        let second: Result<_, NumericError> =
            cache.get_or_try_insert_with_at(&1u64, t0 + Duration::seconds(1), || {
                calls += 1;
                Ok(Amount::from_integer(99))
            });
        assert_eq!(second, Ok(Amount::from_integer(10)));
        assert_eq!(calls, 1);

        let expired: Result<_, NumericError> =
            cache.get_or_try_insert_with_at(&1u64, t0 + Duration::seconds(61), || {
                Ok(Amount::from_integer(99))
            });
        assert_eq!(expired, Ok(Amount::from_integer(99)));
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache: AmountCache<&str> = AmountCache::new(Duration::seconds(60));
        let result = cache.get_or_try_insert_with_at(&"ratio", start(), || {
            Amount::from_integer(1).checked_div_truncating(&Amount::zero())
        });
        assert_eq!(result, Err(NumericError::DivisionByZero));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate() {
        let cache = AmountCache::new(Duration::minutes(5));
        cache.insert("a", Amount::from_integer(1));
        cache.insert("b", Amount::from_integer(2));
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate(&"a"));
        assert!(!cache.invalidate(&"a"));
        assert_eq!(cache.get(&"b"), Some(Amount::from_integer(2)));

        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let cache = AmountCache::new(Duration::seconds(10));
        let t0 = start();
        cache.insert_at(1, Amount::from_integer(1), t0);
        cache.insert_at(2, Amount::from_integer(2), t0 + Duration::seconds(8));

        assert_eq!(cache.purge_expired_at(t0 + Duration::seconds(12)), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get_at(&2, t0 + Duration::seconds(12)).is_some());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(AmountCache::new(Duration::minutes(1)));
        let handles: Vec<_> = (0..4u64)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache.insert(i, Amount::from_integer(i as i64));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 4);
    }
}
