//! Length-bucketed (canonical, normalized) pairs, one set per catalog level.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct LengthBuckets {
    by_len: HashMap<usize, Vec<(String, String)>>,
}

impl LengthBuckets {
    /// Builds the index from a list of canonical names, normalizing each one exactly once.
    pub fn build<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut by_len: HashMap<usize, Vec<(String, String)>> = HashMap::new();
        for name in names {
            let normalized = crate::normalizer::normalize(&name);
            let len = normalized.chars().count();
            by_len.entry(len).or_default().push((name, normalized));
        }
        Self { by_len }
    }

    /// Every name in the index, flattened.
    pub fn all_pairs(&self) -> Vec<(String, String)> {
        self.by_len.values().flatten().cloned().collect()
    }

    /// Candidates whose normalized length is within `slack` of `len`.
    pub fn candidates_near(&self, len: usize, slack: usize) -> Vec<&(String, String)> {
        let lo = len.saturating_sub(slack);
        let hi = len + slack;
        (lo..=hi)
            .filter_map(|l| self.by_len.get(&l))
            .flatten()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_len.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_by_normalized_length() {
        let buckets = LengthBuckets::build(["Đồng Tháp".to_string(), "Cần Thơ".to_string()]);
        assert_eq!(buckets.len(), 2);
        // "dong thap" has length 9, "can tho" has length 7.
        assert_eq!(buckets.candidates_near(9, 0).len(), 1);
        assert_eq!(buckets.candidates_near(7, 0).len(), 1);
        assert_eq!(buckets.candidates_near(8, 1).len(), 2);
    }

    #[test]
    fn every_name_reachable_at_its_own_length() {
        let names = vec!["An Bình".to_string(), "Cao Lãnh".to_string(), "13".to_string()];
        let buckets = LengthBuckets::build(names.clone());
        for name in &names {
            let norm = crate::normalizer::normalize(name);
            let len = norm.chars().count();
            let found = buckets
                .candidates_near(len, 0)
                .into_iter()
                .any(|(canon, _)| canon == name);
            assert!(found, "{name} not reachable at its own length bucket");
        }
    }
}
