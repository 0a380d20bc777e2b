//! Per-level fuzzy index, combining a length-bucketed pair list with an approximate-search
//! trie, built from the `*_names` reference files.

pub mod bucket;
pub mod trie;

use tracing::info;

pub use bucket::LengthBuckets;
pub use trie::ApproxTrie;

/// The length buckets and trie for one catalog level.
#[derive(Debug)]
pub struct LevelIndex {
    pub buckets: LengthBuckets,
    pub trie: ApproxTrie,
}

impl LevelIndex {
    pub fn build<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String> + Clone,
    {
        Self {
            buckets: LengthBuckets::build(names.clone()),
            trie: ApproxTrie::build(names),
        }
    }
}

/// The three per-level indexes, built once at startup alongside the catalog.
#[derive(Debug)]
pub struct FuzzyIndexes {
    pub province: LevelIndex,
    pub district: LevelIndex,
    pub ward: LevelIndex,
}

impl FuzzyIndexes {
    pub fn build(
        province_names: Vec<String>,
        district_names: Vec<String>,
        ward_names: Vec<String>,
    ) -> Self {
        let province = LevelIndex::build(province_names);
        let district = LevelIndex::build(district_names);
        let ward = LevelIndex::build(ward_names);
        info!(
            province_names = province.buckets.len(),
            province_nodes = province.trie.node_count(),
            district_names = district.buckets.len(),
            district_nodes = district.trie.node_count(),
            ward_names = ward.buckets.len(),
            ward_nodes = ward.trie.node_count(),
            "fuzzy index built"
        );
        Self { province, district, ward }
    }
}

/// Parses a `*_names` reference file: one canonical name per line, blank lines ignored.
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
