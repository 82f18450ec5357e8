//! Memo tables for BDD operations.
//!
//! Every public operation of the [`Bdd`][crate::bdd::Bdd] manager creates its own
//! [`Cache`] and drops it on return, so nothing is shared across calls and there is
//! nothing to invalidate. Within one call, the cache guarantees that each distinct
//! subproblem is solved only once.
//!
//! The cache is a thin wrapper around [HashMap] with hit/miss counters, which
//! operations report through `log::debug!` once they finish.

use std::collections::HashMap;
use std::hash::Hash;

pub struct Cache<K, V> {
    map: HashMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K, V> Cache<K, V> {
    /// Creates a new cache with room for `2^bits` entries.
    ///
    /// The cache still grows beyond that when needed.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");
        Self {
            map: HashMap::with_capacity(1 << bits),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Returns the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq,
{
    /// Looks up a key in the cache.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.map.get(key) {
            Some(v) => {
                self.hits += 1;
                Some(v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts a key-value pair into the cache.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }
}
