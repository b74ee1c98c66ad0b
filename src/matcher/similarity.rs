//! Substring-aware fuzzy similarity.
//!
//! `ratio` is the Indel-normalized similarity (Levenshtein restricted to
//! insertions and deletions), `100 * (total_len - indel_distance) / total_len`.
//! `partial_ratio` slides the shorter string over the longer one and keeps the
//! best window, including the shorter prefix and suffix windows at both edges.

use crate::model::FuzzyScore;
use rapidfuzz::distance::indel;

fn window_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let distance = indel::distance(a.iter().copied(), b.iter().copied());
    (100 * (total - distance)) as f64 / total as f64
}

/// Full-string similarity, 0..=100.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    window_ratio(&a, &b)
}

/// Best `ratio` of `needle` against the windows of `haystack`.
/// `needle` must not be longer than `haystack`.
fn best_window(needle: &[char], haystack: &[char]) -> f64 {
    let m = needle.len();
    let n = haystack.len();
    let mut best: f64 = 0.0;

    let windows = (1..m)
        .map(|i| &haystack[..i])
        .chain((0..=n - m).map(|i| &haystack[i..i + m]))
        .chain((n - m + 1..n).map(|i| &haystack[i..]));

    for window in windows {
        let score = window_ratio(needle, window);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }

    best
}

/// Partial-ratio similarity of two strings, 0..=100. Empty input scores 0.
pub fn partial_ratio(a: &str, b: &str) -> FuzzyScore {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return FuzzyScore(0.0);
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let mut score = best_window(short, long);

    if score < 100.0 && short.len() == long.len() {
        score = score.max(best_window(long, short));
    }

    FuzzyScore(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(ratio("pasta", "pasta"), 100.0);
        assert_eq!(partial_ratio("pasta", "pasta").0, 100.0);
    }

    #[test]
    fn ratio_counts_common_subsequence() {
        // indel("abcd", "abed") = 2 → 100 * 6 / 8
        assert_eq!(ratio("abcd", "abed"), 75.0);
    }

    #[test]
    fn contained_needle_scores_100() {
        assert_eq!(partial_ratio("gulasch", "rindergulasch mit klößen").0, 100.0);
    }

    #[test]
    fn argument_order_does_not_matter() {
        let forward = partial_ratio("spagetti", "spaghetti bolognese");
        let backward = partial_ratio("spaghetti bolognese", "spagetti");
        assert_eq!(forward, backward);
    }

    #[test]
    fn typo_inside_longer_item() {
        // best window "spaghett" shares 7 of 8 chars → 200 * 7 / 16
        let score = partial_ratio("spagetti", "spaghetti bolognese").0;
        assert_eq!(score, 87.5);
    }

    #[test]
    fn edge_window_beats_full_window() {
        // the suffix window "udel" holds all of "udel" from "nudeln"
        let score = partial_ratio("nudeln", "apfelstrudel").0;
        assert_eq!(score, 80.0);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(partial_ratio("", "pasta").0, 0.0);
        assert_eq!(partial_ratio("pasta", "").0, 0.0);
    }

    #[test]
    fn compares_unicode_scalars() {
        // ä and a differ; indel("käse", "kase") = 2
        assert_eq!(partial_ratio("käse", "kase").0, 75.0);
    }

    #[test]
    fn three_substitutions_in_twenty_chars_score_85() {
        let score = partial_ratio("abcdefghijklmnopqrst", "abcdexghijkymnopzrst").0;
        assert_eq!(score, 85.0);
    }
}
