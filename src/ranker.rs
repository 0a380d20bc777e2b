//! Given a normalized query and a candidate set, picks the best canonical match.

use crate::cache::Caches;
use crate::fuzzy::LevelIndex;
use crate::levenshtein;

/// Either a small, hierarchy-scoped candidate set (a matched parent's children) or the full,
/// unscoped level index. Scoped candidates skip the trie fallback entirely and fall back to a
/// direct bounded scan instead, avoiding per-query trie construction.
pub enum Candidates<'a> {
    Scoped(&'a [(String, String)]),
    Global(&'a LevelIndex),
}

/// Runs the full ranking procedure and returns the winning canonical name, if any.
pub fn rank(
    query: &str,
    candidates: Candidates<'_>,
    caches: &Caches,
    similarity_threshold: f64,
    length_slack: usize,
    max_edit_distance: usize,
) -> Option<String> {
    let query_norm = caches.normalize_cached(query);
    let query_len = query_norm.chars().count();

    let pairs: Vec<&(String, String)> = match candidates {
        Candidates::Scoped(pairs) => pairs.iter().collect(),
        Candidates::Global(index) => index.buckets.candidates_near(query_len, length_slack),
    };

    // Step 2: exact normalized equality.
    if let Some((canonical, _)) = pairs.iter().find(|(_, norm)| *norm == query_norm) {
        return Some(canonical.clone());
    }

    // Step 3-4: length-bucketed scored candidates.
    let mut scored: Vec<(String, usize, f64)> = Vec::new();
    for (canonical, norm) in &pairs {
        let cand_len = norm.chars().count();
        if cand_len.abs_diff(query_len) > length_slack {
            continue;
        }
        let max_len = query_len.max(cand_len);
        if max_len == 0 {
            continue;
        }
        let dist = caches.distance_cached(&query_norm, norm);
        let similarity = (max_len.saturating_sub(dist)) as f64 / max_len as f64 * 100.0;
        if similarity >= similarity_threshold {
            scored.push((canonical.clone(), dist, similarity));
        }
    }

    if !scored.is_empty() {
        scored.sort_by(|a, b| {
            a.1.cmp(&b.1)
                .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
        });
        return Some(scored.remove(0).0);
    }

    // Step 5: trie fallback (global) or direct bounded scan (scoped).
    match candidates {
        Candidates::Global(index) => index
            .trie
            .search_similar(&query_norm, max_edit_distance)
            .into_iter()
            .next()
            .map(|(canonical, _)| canonical),
        Candidates::Scoped(scoped_pairs) => {
            let mut best: Option<(String, usize)> = None;
            for (canonical, norm) in scoped_pairs {
                if let Some(dist) = levenshtein::bounded_distance(&query_norm, norm, max_edit_distance) {
                    best = match best {
                        Some((_, best_dist)) if best_dist <= dist => best,
                        _ => Some((canonical.clone(), dist)),
                    };
                }
            }
            best.map(|(canonical, _)| canonical)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::fuzzy::LevelIndex;

    fn caches() -> Caches {
        Caches::new(100, 100, 100)
    }

    #[test]
    fn exact_match_wins_immediately() {
        let cfg = ResolverConfig::default();
        let index = LevelIndex::build(vec!["Đồng Tháp".to_string(), "Cần Thơ".to_string()]);
        let c = caches();
        let result = rank(
            "Đồng Tháp",
            Candidates::Global(&index),
            &c,
            cfg.similarity_threshold,
            cfg.length_slack,
            cfg.max_edit_distance,
        );
        assert_eq!(result.as_deref(), Some("Đồng Tháp"));
    }

    #[test]
    fn near_miss_within_threshold_matches() {
        let cfg = ResolverConfig::default();
        let index = LevelIndex::build(vec!["Phú Hoà".to_string()]);
        let c = caches();
        let result = rank(
            "Phu Hoa",
            Candidates::Global(&index),
            &c,
            cfg.similarity_threshold,
            cfg.length_slack,
            cfg.max_edit_distance,
        );
        assert_eq!(result.as_deref(), Some("Phú Hoà"));
    }

    #[test]
    fn no_candidate_returns_none() {
        let cfg = ResolverConfig::default();
        let index = LevelIndex::build(vec!["Đồng Tháp".to_string()]);
        let c = caches();
        let result = rank(
            "zzzzz qqqqq",
            Candidates::Global(&index),
            &c,
            cfg.similarity_threshold,
            cfg.length_slack,
            cfg.max_edit_distance,
        );
        assert_eq!(result, None);
    }

    #[test]
    fn tie_break_prefers_longer_match_at_equal_distance() {
        // Both candidates are edit-distance 1 from "an ba": one by substitution (same length),
        // one by insertion (one longer). Equal distance, so the longer one should win because
        // its similarity score is higher.
        let cfg = ResolverConfig::default();
        let pairs = vec![
            ("Short".to_string(), "xn ba".to_string()),
            ("Long".to_string(), "xan ba".to_string()),
        ];
        let c = caches();
        let result = rank(
            "an ba",
            Candidates::Scoped(&pairs),
            &c,
            50.0,
            cfg.length_slack,
            cfg.max_edit_distance,
        );
        assert_eq!(result.as_deref(), Some("Long"));
    }
}
