//! Word-boundary classification for abbreviation matching.

/// Decide whether `curr` starts a new word given the character before it.
///
/// A position is a word start when any of these transitions occur:
/// - camelCase: uppercase after a non-uppercase character
/// - word start: lowercase after a non-alphabetic character
/// - numeric run start: digit after a non-digit
/// - punctuation boundary: non-alphanumeric differing from its predecessor
///   (a run of identical punctuation is a single boundary)
///
/// Only meaningful at positions > 0; position 0 has no predecessor and is
/// handled separately by the enumerator.
pub fn is_word_start(prev: char, curr: char) -> bool {
    (curr.is_ascii_uppercase() && !prev.is_ascii_uppercase())
        || (curr.is_ascii_lowercase() && !prev.is_ascii_alphabetic())
        || (curr.is_ascii_digit() && !prev.is_ascii_digit())
        || (!curr.is_ascii_alphanumeric() && curr != prev)
}
