//! Scoring of matched candidates by locality and boundary alignment.
//!
//! The cost of an alignment counts its contiguous runs: fewer, longer runs
//! rank better. Path mode halves the weight of runs that start at the string
//! head or right after a path separator, and strongly rewards matches that
//! begin inside the final path segment.

use crate::align;

const PATH_SEP: char = '/';

/// Ranker for one abbreviation; lower scores are better.
pub struct Ranker {
    abbrev: String,
    abbrev_len: usize,
    path_mode: bool,
}

impl Ranker {
    pub fn new(abbrev: &str, path_mode: bool) -> Ranker {
        Ranker {
            abbrev: abbrev.to_string(),
            abbrev_len: abbrev.chars().count(),
            path_mode,
        }
    }

    /// Score `candidate` by its cheapest alignment.
    ///
    /// Scans every enumerated alignment and keeps the minimal raw cost (ties
    /// go to the earliest in enumeration order). Returns 0 when nothing
    /// matches; callers must pair this with a matcher and never treat 0 as
    /// an existence verdict, since a strong match can also score low.
    pub fn rank(&self, candidate: &str) -> f64 {
        if self.abbrev_len == 0 {
            return 0.0;
        }
        let chars: Vec<char> = candidate.chars().collect();

        let mut best: Option<(f64, usize)> = None;
        for alignment in align::alignments(&self.abbrev, candidate) {
            let cost = run_cost(&chars, &alignment, self.path_mode);
            if best.is_none_or(|(c, _)| cost < c) {
                best = Some((cost, alignment[0]));
            }
        }
        let Some((cost, first)) = best else {
            return 0.0;
        };

        let mut score = self.normalize(cost, chars.len());
        if self.path_mode && first >= basename_start(&chars) {
            score /= 10.0;
        }
        score
    }

    /// Normalize a raw run cost into the final score scale.
    ///
    /// Division by the abbreviation length makes scores comparable across
    /// query sizes; the small exponent on the candidate length penalizes
    /// matches buried in very long strings.
    fn normalize(&self, cost: f64, candidate_len: usize) -> f64 {
        cost / self.abbrev_len as f64 * 100.0 * (candidate_len as f64).powf(0.05)
    }
}

/// Raw cost of one alignment: the summed weight of its contiguous runs.
///
/// A position starts a new run when it is not immediately after the previous
/// one. New runs weigh 1.0, or 0.5 in path mode when the run begins at the
/// string head or right after a path separator.
fn run_cost(chars: &[char], alignment: &[usize], path_mode: bool) -> f64 {
    let mut cost = 0.0;
    let mut prev: Option<usize> = None;
    for &i in alignment {
        if prev.is_none_or(|p| p + 1 != i) {
            let at_sep = path_mode && (i == 0 || chars[i - 1] == PATH_SEP);
            cost += if at_sep { 0.5 } else { 1.0 };
        }
        prev = Some(i);
    }
    cost
}

/// First character index of the final path segment (0 if no separator).
fn basename_start(chars: &[char]) -> usize {
    chars
        .iter()
        .rposition(|&c| c == PATH_SEP)
        .map(|i| i + 1)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_and_empty_abbrev_rank_zero() {
        assert_eq!(Ranker::new("xyz", false).rank("abc"), 0.0);
        assert_eq!(Ranker::new("", false).rank("abc"), 0.0);
        assert_eq!(Ranker::new("", true).rank(""), 0.0);
    }

    #[test]
    fn contiguous_runs_beat_scattered_ones() {
        let ranker = Ranker::new("ab", false);
        let tight = ranker.rank("abxx");
        let scattered = ranker.rank("a_bx");
        assert!(tight > 0.0);
        assert!(tight < scattered);
    }

    #[test]
    fn rank_selects_minimal_cost_alignment() {
        // Alignments of "ab" in "ab_a_b": [0,1] (one run), [0,5], [3,5].
        let abbrev = "ab";
        let candidate = "ab_a_b";
        let ranker = Ranker::new(abbrev, false);
        let chars: Vec<char> = candidate.chars().collect();

        let score = ranker.rank(candidate);
        assert!(score > 0.0);
        for alignment in align::alignments(abbrev, candidate) {
            let alt = ranker.normalize(run_cost(&chars, &alignment, false), chars.len());
            assert!(score <= alt + 1e-9);
        }
        let best = ranker.normalize(1.0, chars.len());
        assert!((score - best).abs() < 1e-9);
    }

    #[test]
    fn path_mode_halves_separator_anchored_runs() {
        let chars: Vec<char> = "src/abbrev_matcher.py".chars().collect();
        // "am" aligns at [4, 11]: 'a' after '/', 'm' after '_'.
        assert_eq!(run_cost(&chars, &[4, 11], false), 2.0);
        assert_eq!(run_cost(&chars, &[4, 11], true), 1.5);
        // Position 0 counts as separator-anchored in path mode.
        let plain: Vec<char> = "am".chars().collect();
        assert_eq!(run_cost(&plain, &[0, 1], true), 0.5);
    }

    #[test]
    fn basename_match_gets_tenfold_discount() {
        let candidate = "src/abbrev_matcher.py";
        let chars: Vec<char> = candidate.chars().collect();
        let ranker = Ranker::new("am", true);

        // The only alignment is [4, 11], starting inside the basename.
        let alignments: Vec<_> = align::alignments("am", candidate).collect();
        assert_eq!(alignments, vec![vec![4, 11]]);
        assert!(alignments[0][0] >= basename_start(&chars));

        let undiscounted = ranker.normalize(run_cost(&chars, &[4, 11], true), chars.len());
        let score = ranker.rank(candidate);
        assert!((score * 10.0 - undiscounted).abs() < 1e-9);
    }

    #[test]
    fn directory_matches_miss_the_discount() {
        // "s" only aligns at position 0, inside the directory component.
        let ranker = Ranker::new("s", true);
        let in_dir = ranker.rank("src/matcher.py");
        // Same shape but the match falls in the basename.
        let in_base = ranker.rank("lib/scorer.py");
        assert!(in_base < in_dir);
    }

    #[test]
    fn basename_start_handles_missing_separator() {
        let chars: Vec<char> = "README".chars().collect();
        assert_eq!(basename_start(&chars), 0);
        let chars: Vec<char> = "a/b/c".chars().collect();
        assert_eq!(basename_start(&chars), 4);
    }
}
