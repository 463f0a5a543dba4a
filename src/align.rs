//! Alignment enumeration: every way an abbreviation embeds into a candidate.
//!
//! An alignment is a strictly increasing list of character positions, one per
//! abbreviation character. The first abbreviation character may sit anywhere a
//! word starts, or at the very first candidate position regardless of
//! boundaries; each later character must either continue the previous run
//! (position immediately after the one before it) or start at a word boundary.
//!
//! Enumeration is depth-first and leftmost-first, so the sequence is
//! deterministic and restartable. It is exponential in pathological inputs;
//! abbreviations are interactive-length queries, and plain existence checks go
//! through a compiled pattern instead (see `matcher`).

use crate::boundary::is_word_start;

/// ASCII-case-insensitive character equality.
pub fn eq_fold(a: char, b: char) -> bool {
    a.to_ascii_lowercase() == b.to_ascii_lowercase()
}

/// Enumerate all alignments of `abbrev` inside `candidate`.
///
/// The empty abbreviation yields exactly one empty alignment for any
/// candidate. A non-empty abbreviation yields nothing against the empty
/// candidate.
pub fn alignments(abbrev: &str, candidate: &str) -> Alignments {
    let abbrev: Vec<char> = abbrev.chars().collect();
    let empty = abbrev.is_empty();
    Alignments {
        abbrev,
        chars: candidate.chars().collect(),
        stack: vec![Frame { next: 0, from: 0 }],
        chosen: Vec::new(),
        yielded_empty: !empty,
    }
}

/// Existence check: does at least one alignment exist?
///
/// Takes only the first enumerated alignment, so it stops at the first
/// depth-first success.
pub fn has_match(abbrev: &str, candidate: &str) -> bool {
    alignments(abbrev, candidate).next().is_some()
}

/// Scan state for one abbreviation character.
///
/// `from` is the position where no boundary is required (the start of the
/// remaining candidate slice); `next` is where the scan resumes.
struct Frame {
    next: usize,
    from: usize,
}

/// Iterator over alignments, produced by [`alignments`].
///
/// Holds an explicit stack of scan frames, one per abbreviation character
/// currently placed, replacing the recursive generator formulation.
pub struct Alignments {
    abbrev: Vec<char>,
    chars: Vec<char>,
    stack: Vec<Frame>,
    chosen: Vec<usize>,
    yielded_empty: bool,
}

impl Iterator for Alignments {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.abbrev.is_empty() {
            if self.yielded_empty {
                return None;
            }
            self.yielded_empty = true;
            return Some(Vec::new());
        }

        // Invariant at the top of each pass: chosen.len() == stack.len() - 1,
        // i.e. the topmost frame has not committed a position yet.
        loop {
            let depth = self.stack.len();
            let Some(frame) = self.stack.last_mut() else {
                return None;
            };
            let want = self.abbrev[depth - 1];

            let mut found = None;
            let mut i = frame.next;
            while i < self.chars.len() {
                if eq_fold(self.chars[i], want)
                    && (i == frame.from || is_word_start(self.chars[i - 1], self.chars[i]))
                {
                    found = Some(i);
                    break;
                }
                i += 1;
            }

            match found {
                None => {
                    self.stack.pop();
                    self.chosen.pop();
                }
                Some(i) => {
                    frame.next = i + 1;
                    self.chosen.push(i);
                    if self.chosen.len() == self.abbrev.len() {
                        let out = self.chosen.clone();
                        self.chosen.pop();
                        return Some(out);
                    }
                    self.stack.push(Frame {
                        next: i + 1,
                        from: i + 1,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(abbrev: &str, candidate: &str) -> Vec<Vec<usize>> {
        alignments(abbrev, candidate).collect()
    }

    #[test]
    fn empty_abbrev_yields_one_empty_alignment() {
        assert_eq!(collect("", ""), vec![Vec::<usize>::new()]);
        assert_eq!(collect("", "anything"), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn nonempty_abbrev_never_matches_empty_candidate() {
        assert!(collect("a", "").is_empty());
        assert!(collect("xyz", "").is_empty());
    }

    #[test]
    fn first_candidate_position_needs_no_boundary() {
        assert_eq!(collect("a", "abc"), vec![vec![0]]);
        // Mid-word occurrence without a boundary does not count.
        assert!(collect("b", "abc").is_empty());
    }

    #[test]
    fn later_positions_require_word_boundary() {
        // 'a' at 0 (first position) and at 2 (after '/').
        assert_eq!(collect("a", "a/a"), vec![vec![0], vec![2]]);
        // Continuing a run only works immediately after the previous character.
        assert_eq!(collect("ab", "ab"), vec![vec![0, 1]]);
        assert!(collect("ab", "aab").is_empty());
    }

    #[test]
    fn camelcase_positions_match_case_insensitively() {
        assert_eq!(collect("am", "abbrevMatcher"), vec![vec![0, 6]]);
        assert_eq!(collect("am", "abbrev_matcher"), vec![vec![0, 7]]);
        assert_eq!(collect("AM", "abbrev_matcher"), vec![vec![0, 7]]);
    }

    #[test]
    fn enumeration_is_depth_first_leftmost_first() {
        // a: positions 0 and 4; b: 2 continues neither, starts after '_'.
        assert_eq!(collect("ab", "a_b_ab"), vec![vec![0, 2], vec![4, 5]]);
    }

    #[test]
    fn enumeration_is_restartable() {
        let first = collect("ab", "a_b_ab");
        let second = collect("ab", "a_b_ab");
        assert_eq!(first, second);
    }

    #[test]
    fn alignments_are_strictly_increasing_and_case_fold_equal() {
        let abbrev = "am";
        let candidate = "Alarm_Manager/arm.py";
        let abbrev_chars: Vec<char> = abbrev.chars().collect();
        let chars: Vec<char> = candidate.chars().collect();
        let all: Vec<Vec<usize>> = collect(abbrev, candidate);
        assert!(!all.is_empty());
        for m in all {
            assert_eq!(m.len(), abbrev_chars.len());
            for w in m.windows(2) {
                assert!(w[0] < w[1]);
            }
            for (k, &i) in m.iter().enumerate() {
                assert!(eq_fold(chars[i], abbrev_chars[k]));
            }
        }
    }

    #[test]
    fn has_match_agrees_with_enumeration() {
        for (abbrev, candidate) in [
            ("abm", "abbrev_matcher.py"),
            ("abm", "grep_matcher.py"),
            ("abm", "README"),
            ("", ""),
            ("x", ""),
        ] {
            assert_eq!(
                has_match(abbrev, candidate),
                !collect(abbrev, candidate).is_empty()
            );
        }
    }
}
