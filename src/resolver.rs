//! The hierarchical right-to-left resolver — the heart of the system.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::abbreviations::AbbreviationTable;
use crate::cache::Caches;
use crate::catalog::{Catalog, District, Province};
use crate::config::ResolverConfig;
use crate::fuzzy::FuzzyIndexes;
use crate::ranker::{rank, Candidates};

/// The sentinel province value returned when the timeout guard fires.
pub const OVERTIME_SENTINEL: &str = "overtime";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub province: String,
    pub district: String,
    pub ward: String,
}

impl ResolvedAddress {
    pub fn overtime() -> Self {
        Self {
            province: OVERTIME_SENTINEL.to_string(),
            district: String::new(),
            ward: String::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Builds the right-anchored suffix of `words` containing the last `count` words, joined with a
/// single space, preserving original casing (abbreviation lookup is case-sensitive).
fn suffix(words: &[&str], count: usize) -> String {
    words[words.len() - count..].join(" ")
}

/// Runs the full province → district → ward resolution over an already-`clean`ed address.
/// `cancelled` is checked once per suffix iteration, as a coarse resolver checkpoint —
/// cancellation guidance; it is a cooperative accelerant, not the sole cancellation mechanism
/// (see [`crate::timeout`] for the pre-emptible worker that enforces the deadline even if this
/// loop never checks the flag again).
pub fn resolve_tokens(
    cleaned: &str,
    catalog: &Catalog,
    abbreviations: &AbbreviationTable,
    fuzzy: &FuzzyIndexes,
    caches: &Caches,
    config: &ResolverConfig,
    cancelled: &AtomicBool,
) -> ResolvedAddress {
    let mut words: Vec<&str> = cleaned.split_whitespace().collect();

    let mut matched_province: Option<&Province> = None;
    let mut matched_district: Option<&District> = None;
    let mut result = ResolvedAddress::empty();

    // Province phase: always unscoped.
    'province: for i in 0..words.len() {
        if cancelled.load(Ordering::Relaxed) {
            return ResolvedAddress::empty();
        }
        let count = i + 1;
        let mut candidate = suffix(&words, count);
        if candidate.chars().count() <= config.abbr_max_len {
            if let Some(expanded) = abbreviations.expand(&candidate, config.abbr_max_len) {
                candidate = expanded.to_string();
            }
        }
        if let Some(canonical) = rank(
            &candidate,
            Candidates::Global(&fuzzy.province),
            caches,
            config.similarity_threshold,
            config.length_slack,
            config.max_edit_distance,
        ) {
            if let Some(province) = catalog.province_by_name(&canonical) {
                debug!(candidate, canonical, "province phase matched");
                result.province = canonical;
                matched_province = Some(province);
                words.truncate(words.len() - count);
                break 'province;
            }
        }
    }
    if matched_province.is_none() {
        debug!("province phase: no match");
    }

    // District phase: scoped to the matched province's children if any.
    'district: for i in 0..words.len() {
        if cancelled.load(Ordering::Relaxed) {
            return result;
        }
        let count = i + 1;
        let candidate = suffix(&words, count);
        let candidates = match matched_province {
            Some(p) => Candidates::Scoped(&p.district_pairs),
            None => Candidates::Global(&fuzzy.district),
        };
        if let Some(canonical) = rank(
            &candidate,
            candidates,
            caches,
            config.similarity_threshold,
            config.length_slack,
            config.max_edit_distance,
        ) {
            let found = match matched_province {
                Some(p) => p.districts().find(|d| d.name == canonical),
                // Unscoped district matches are accepted even though their true parent may
                // not be the guessed province; this is not re-checked against any province.
                None => catalog.district_by_name(&canonical),
            };
            if let Some(district) = found {
                debug!(candidate, canonical, "district phase matched");
                result.district = canonical;
                matched_district = Some(district);
                words.truncate(words.len() - count);
                break 'district;
            }
        }
    }
    if matched_district.is_none() {
        debug!("district phase: no match");
    }

    // Ward phase: scoped to the matched district's children if any.
    'ward: for i in 0..words.len() {
        if cancelled.load(Ordering::Relaxed) {
            return result;
        }
        let count = i + 1;
        let candidate = suffix(&words, count);
        let candidates = match matched_district {
            Some(d) => Candidates::Scoped(&d.ward_pairs),
            None => Candidates::Global(&fuzzy.ward),
        };
        if let Some(canonical) = rank(
            &candidate,
            candidates,
            caches,
            config.similarity_threshold,
            config.length_slack,
            config.max_edit_distance,
        ) {
            let found = match matched_district {
                Some(d) => d.wards().any(|w| w.name == canonical),
                None => catalog.ward_by_name(&canonical).is_some(),
            };
            if found {
                debug!(candidate, canonical, "ward phase matched");
                result.ward = canonical;
                break 'ward;
            }
        }
    }
    if result.ward.is_empty() {
        debug!("ward phase: no match");
    }

    result
}
