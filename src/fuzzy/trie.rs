//! Approximate-search trie: a character-trie over normalized names supporting bounded
//! edit-distance retrieval. Arena-backed, in the shape of an ordinary safe-Rust trie
//! (`Vec<Node>` of children maps), not a pointer-chasing tree.

use std::collections::HashMap;

#[derive(Debug, Default)]
struct Node {
    children: HashMap<char, usize>,
    /// Canonical spelling, set only on the node terminating a name's normalized key.
    canonical: Option<String>,
}

/// A character-trie over normalized catalog names for one level (province, district, or ward),
/// supporting `search_similar` within a bounded edit distance.
///
/// A per-node "suggestions" cache (an unused incidental optimization upstream) is intentionally omitted.
#[derive(Debug)]
pub struct ApproxTrie {
    nodes: Vec<Node>,
}

impl Default for ApproxTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl ApproxTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    pub fn build<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut trie = Self::new();
        for name in names {
            let normalized = crate::normalizer::normalize(&name);
            trie.insert(&normalized, &name);
        }
        trie
    }

    pub fn insert(&mut self, normalized: &str, canonical: &str) {
        let mut node_idx = 0;
        for c in normalized.chars() {
            node_idx = match self.nodes[node_idx].children.get(&c) {
                Some(&next) => next,
                None => {
                    self.nodes.push(Node::default());
                    let next = self.nodes.len() - 1;
                    self.nodes[node_idx].children.insert(c, next);
                    next
                }
            };
        }
        self.nodes[node_idx].canonical = Some(canonical.to_string());
    }

    /// Returns every (canonical, distance) pair reachable within `max_d` total edit distance of
    /// `query`, sorted by ascending distance. Ties are broken by canonical name for
    /// determinism.
    pub fn search_similar(&self, query: &str, max_d: usize) -> Vec<(String, usize)> {
        let query_chars: Vec<char> = query.chars().collect();
        let initial_row: Vec<usize> = (0..=query_chars.len()).collect();

        let mut results = Vec::new();
        self.search_node(0, &query_chars, &initial_row, max_d, &mut results);

        results.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        results
    }

    fn search_node(
        &self,
        node_idx: usize,
        query: &[char],
        prev_row: &[usize],
        max_d: usize,
        results: &mut Vec<(String, usize)>,
    ) {
        let node = &self.nodes[node_idx];

        if let Some(canonical) = &node.canonical {
            let dist = prev_row[query.len()];
            if dist <= max_d {
                results.push((canonical.clone(), dist));
            }
        }

        for (&c, &child_idx) in &node.children {
            let mut row = vec![prev_row[0] + 1];
            for (i, &qc) in query.iter().enumerate() {
                let cost = usize::from(qc != c);
                let value = (row[i] + 1) // insertion
                    .min(prev_row[i + 1] + 1) // deletion
                    .min(prev_row[i] + cost); // substitution / match
                row.push(value);
            }
            if *row.iter().min().unwrap() <= max_d {
                self.search_node(child_idx, query, &row, max_d, results);
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
