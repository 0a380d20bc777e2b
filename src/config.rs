//! Named defaults for every tunable used by the resolver. Kept as documented constants, not
//! scattered literals, so [`ResolverConfig::default`] stays easy to audit.

use std::time::Duration;

/// Per-query wall-clock budget.
pub const DEFAULT_DEADLINE_MS: u64 = 90;

/// Maximum total edit distance the approximate trie search will explore.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Minimum similarity score, in percent, for a length-bucket candidate to be accepted.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 80.0;

/// A suffix candidate longer than this (in characters) is never looked up in the abbreviation
/// table.
pub const DEFAULT_ABBR_MAX_LEN: usize = 9;

/// Length-bucket search radius: candidates whose normalized length differs from the query's by
/// more than this are not considered.
pub const DEFAULT_LENGTH_SLACK: usize = 2;

/// Capacity of the normalized-text cache.
pub const DEFAULT_NORMALIZE_CACHE_CAPACITY: usize = 10_000;

/// Capacity of the pairwise edit-distance cache.
pub const DEFAULT_DISTANCE_CACHE_CAPACITY: usize = 1_000;

/// Capacity of the cleaned-address cache.
pub const DEFAULT_CLEANED_CACHE_CAPACITY: usize = 1_000;

/// Runtime-tunable parameters for an [`crate::Engine`]. Tests that want a tighter deadline or a
/// smaller cache construct their own.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub deadline: Duration,
    pub max_edit_distance: usize,
    pub similarity_threshold: f64,
    pub abbr_max_len: usize,
    pub length_slack: usize,
    pub normalize_cache_capacity: usize,
    pub distance_cache_capacity: usize,
    pub cleaned_cache_capacity: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_millis(DEFAULT_DEADLINE_MS),
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            abbr_max_len: DEFAULT_ABBR_MAX_LEN,
            length_slack: DEFAULT_LENGTH_SLACK,
            normalize_cache_capacity: DEFAULT_NORMALIZE_CACHE_CAPACITY,
            distance_cache_capacity: DEFAULT_DISTANCE_CACHE_CAPACITY,
            cleaned_cache_capacity: DEFAULT_CLEANED_CACHE_CAPACITY,
        }
    }
}
