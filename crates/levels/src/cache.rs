//! Append-only memoization cache with at-most-once computation per key.
//!
//! Two locks per lookup: the map lock is held only long enough to fetch or
//! insert the entry slot, and the slot's own lock serializes computation.
//! Concurrent callers for the same uncached key therefore coalesce — the
//! loser blocks on the slot until the winner's result lands, then receives
//! the shared value instead of recomputing it.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

type Slot<V> = Arc<Mutex<Option<Arc<V>>>>;

/// Map from level index to an immutable, shared value.
///
/// Entries are never invalidated except by [`clear`](CoalescingCache::clear).
#[derive(Debug, Default)]
pub struct CoalescingCache<V> {
    entries: Mutex<HashMap<u64, Slot<V>>>,
}

impl<V> CoalescingCache<V> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key`, computing it at most once.
    ///
    /// The first caller for an uncached key runs `compute` while holding
    /// that key's slot lock; every concurrent caller for the same key
    /// blocks on the slot and receives the same `Arc`. A failed
    /// computation removes the entry, so a later call may retry; waiters
    /// blocked on the failing slot retry with their own closure.
    pub fn get_or_try_compute<E>(
        &self,
        key: u64,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        let slot = {
            let mut entries = self.entries.lock();
            Arc::clone(entries.entry(key).or_default())
        };

        let mut guard = slot.lock();
        if let Some(value) = guard.as_ref() {
            return Ok(Arc::clone(value));
        }
        match compute() {
            Ok(value) => {
                let value = Arc::new(value);
                *guard = Some(Arc::clone(&value));
                Ok(value)
            }
            Err(e) => {
                let _ = self.entries.lock().remove(&key);
                Err(e)
            }
        }
    }

    /// Number of entry slots, in-flight computations included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True when no entry slot exists.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drops every entry. A computation in flight finishes into its
    /// detached slot; the next request for that key recomputes.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
