//! Time-boxed price cache
//!
//! Holds recently fetched or computed prices (token prices, the SOL/USD
//! quote) for callers that own it and pass it by `&mut` into whatever needs
//! it. Nothing here is global.
//!
//! Entries expire `ttl_secs` after insertion. When the cache is full the
//! oldest insertion is evicted. Time is always passed in as unix seconds so
//! the policy can be driven deterministically.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use tracing::debug;

use crate::constants::{DEFAULT_PRICE_CACHE_CAPACITY, DEFAULT_PRICE_CACHE_TTL_SECS};

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    price: f64,
    inserted_at: u64,
}

#[derive(Debug, Clone)]
pub struct PriceCache<K: Hash + Eq + Clone> {
    entries: HashMap<K, CacheEntry>,
    /// front = oldest insertion
    insertion_order: VecDeque<K>,
    capacity: usize,
    ttl_secs: u64,
}

impl<K: Hash + Eq + Clone> Default for PriceCache<K> {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_CACHE_CAPACITY, DEFAULT_PRICE_CACHE_TTL_SECS)
    }
}

impl<K: Hash + Eq + Clone> PriceCache<K> {
    /// A capacity of zero is bumped to one.
    pub fn new(capacity: usize, ttl_secs: u64) -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            capacity: capacity.max(1),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &CacheEntry, now: u64) -> bool {
        now.saturating_sub(entry.inserted_at) >= self.ttl_secs
    }

    /// Fresh price for `key`, or `None` if missing or expired
    pub fn get(&self, key: &K, now: u64) -> Option<f64> {
        self.entries
            .get(key)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| entry.price)
    }

    pub fn insert(&mut self, key: K, price: f64, now: u64) {
        if self.entries.contains_key(&key) {
            self.insertion_order.retain(|k| k != &key);
        } else if self.entries.len() >= self.capacity {
            self.purge_expired(now);
            if self.entries.len() >= self.capacity {
                if let Some(oldest) = self.insertion_order.pop_front() {
                    self.entries.remove(&oldest);
                    debug!(capacity = self.capacity, "price cache full, evicted oldest entry");
                }
            }
        }

        self.entries.insert(
            key.clone(),
            CacheEntry {
                price,
                inserted_at: now,
            },
        );
        self.insertion_order.push_back(key);
    }

    /// Cached price, or compute and cache it
    pub fn get_or_insert_with<F>(&mut self, key: K, now: u64, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        if let Some(price) = self.get(&key, now) {
            return price;
        }
        let price = compute();
        self.insert(key, price, now);
        price
    }

    pub fn remove(&mut self, key: &K) -> Option<f64> {
        let entry = self.entries.remove(key)?;
        self.insertion_order.retain(|k| k != key);
        Some(entry.price)
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&mut self, now: u64) -> usize {
        let before = self.entries.len();
        let ttl_secs = self.ttl_secs;
        self.entries
            .retain(|_, entry| now.saturating_sub(entry.inserted_at) < ttl_secs);
        let entries = &self.entries;
        self.insertion_order.retain(|k| entries.contains_key(k));

        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, "purged expired price cache entries");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }
}
