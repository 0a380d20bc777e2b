//! Shared bounded Levenshtein distance, used by both the candidate ranker and the approximate
//! trie. Returns the actual distance rather than a boolean, since similarity scoring needs the
//! number, not just "within bound".

/// Computes the Levenshtein distance between `a` and `b`, short-circuiting as soon as it is
/// provable that the distance exceeds `max`. Returns `None` in that case, `Some(distance)`
/// otherwise.
pub fn bounded_distance(a: &str, b: &str, max: usize) -> Option<usize> {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if (a_len as isize - b_len as isize).unsigned_abs() > max {
        return None;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();

    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            if dp[j + 1] < min_row {
                min_row = dp[j + 1];
            }
        }

        if min_row > max {
            return None;
        }
    }

    if dp[b_len] <= max {
        Some(dp[b_len])
    } else {
        None
    }
}

/// The true, unbounded edit distance. Used for the cache: caching the real distance
/// keeps the cache correct regardless of which bound a caller happens to apply afterward.
pub fn distance(a: &str, b: &str) -> usize {
    let cap = a.chars().count().max(b.chars().count());
    bounded_distance(a, b, cap).expect("cap is never smaller than the true distance")
}
