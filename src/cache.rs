//! Bounded per-process caches that amortize repeated work within a batch. None of them are
//! required for correctness; they exist purely for speed, and a miss must always produce
//! the same answer a hit would have.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use crate::resolver::ResolvedAddress;

/// Unordered pair of normalized strings, used as the edit-distance cache key so `(a, b)` and
/// `(b, a)` share an entry.
fn distance_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// The four memoization caches. Shared across an [`crate::Engine`]'s clones via
/// `Arc`; each cache is its own `Mutex`, so a lookup against one never blocks a write to
/// another.
pub struct Caches {
    normalized: Mutex<LruCache<String, String>>,
    distances: Mutex<LruCache<(String, String), usize>>,
    cleaned: Mutex<LruCache<String, String>>,
    /// Unbounded by design: a plain map behind a mutex, not an `LruCache`.
    resolutions: Mutex<HashMap<String, ResolvedAddress>>,
}

impl Caches {
    pub fn new(normalize_cap: usize, distance_cap: usize, cleaned_cap: usize) -> Self {
        Self {
            normalized: Mutex::new(LruCache::new(cap(normalize_cap))),
            distances: Mutex::new(LruCache::new(cap(distance_cap))),
            cleaned: Mutex::new(LruCache::new(cap(cleaned_cap))),
            resolutions: Mutex::new(HashMap::new()),
        }
    }

    pub fn normalize_cached(&self, raw: &str) -> String {
        if let Some(hit) = self.normalized.lock().unwrap().get(raw) {
            return hit.clone();
        }
        let value = crate::normalizer::normalize(raw);
        self.normalized.lock().unwrap().put(raw.to_string(), value.clone());
        value
    }

    pub fn clean_cached(&self, raw: &str) -> String {
        if let Some(hit) = self.cleaned.lock().unwrap().get(raw) {
            return hit.clone();
        }
        let value = crate::normalizer::clean(raw);
        self.cleaned.lock().unwrap().put(raw.to_string(), value.clone());
        value
    }

    /// The true edit distance between two already-normalized strings, memoized.
    pub fn distance_cached(&self, a: &str, b: &str) -> usize {
        let key = distance_key(a, b);
        if let Some(hit) = self.distances.lock().unwrap().get(&key) {
            return *hit;
        }
        let value = crate::levenshtein::distance(a, b);
        self.distances.lock().unwrap().put(key, value);
        value
    }

    pub fn resolution_cached(&self, raw: &str) -> Option<ResolvedAddress> {
        self.resolutions.lock().unwrap().get(raw).cloned()
    }

    pub fn store_resolution(&self, raw: &str, resolved: ResolvedAddress) {
        self.resolutions
            .lock()
            .unwrap()
            .insert(raw.to_string(), resolved);
    }
}

fn cap(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap_or(NonZeroUsize::new(1).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_cache_hit_matches_fresh_computation() {
        let caches = Caches::new(10, 10, 10);
        let first = caches.normalize_cached("Đồng Tháp");
        let second = caches.normalize_cached("Đồng Tháp");
        assert_eq!(first, second);
        assert_eq!(first, crate::normalizer::normalize("Đồng Tháp"));
    }

    #[test]
    fn distance_cache_is_symmetric() {
        let caches = Caches::new(10, 10, 10);
        let ab = caches.distance_cached("dong thap", "dong thab");
        let ba = caches.distance_cached("dong thab", "dong thap");
        assert_eq!(ab, ba);
    }

    #[test]
    fn resolution_cache_round_trips() {
        let caches = Caches::new(10, 10, 10);
        assert!(caches.resolution_cached("raw").is_none());
        let resolved = ResolvedAddress {
            province: "Đồng Tháp".to_string(),
            district: String::new(),
            ward: String::new(),
        };
        caches.store_resolution("raw", resolved.clone());
        assert_eq!(caches.resolution_cached("raw"), Some(resolved));
    }
}
