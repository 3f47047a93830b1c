//! # String Similarity Module
//!
//! Ratcliff/Obershelp similarity used for fuzzy ingredient name matching.
//! The score is the total length of all common contiguous blocks, doubled and
//! divided by the combined length of both strings, reported on a 0..100 scale.

/// Longest common contiguous block between two char slices.
///
/// Returns `(start_in_a, start_in_b, length)`. Ties resolve to the smallest
/// start in `a`, then the smallest start in `b`, so scores are deterministic.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    for i in 0..a.len() {
        if a.len() - i <= best.2 {
            break;
        }
        for j in 0..b.len() {
            if a[i] == b[j] {
                let mut k = 1;
                while i + k < a.len() && j + k < b.len() && a[i + k] == b[j + k] {
                    k += 1;
                }
                if k > best.2 {
                    best = (i, j, k);
                }
            }
        }
    }
    best
}

/// Total matched characters: the longest block plus recursive matches on the
/// unmatched left and right remainders.
fn matching_total(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (i, j, k) = longest_common_block(a, b);
    if k == 0 {
        return 0;
    }
    k + matching_total(&a[..i], &b[..j]) + matching_total(&a[i + k..], &b[j + k..])
}

/// Ratcliff/Obershelp similarity between two strings on a 0..100 scale.
///
/// Operates on characters, so multi-byte letters count once.
///
/// # Examples
///
/// ```rust
/// use groceries::similarity::similarity;
///
/// assert_eq!(similarity("salt", "salt"), 100.0);
/// assert!(similarity("chili", "chilli") > 90.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    let matched = matching_total(&a, &b);
    200.0 * matched as f64 / (a.len() + b.len()) as f64
}
