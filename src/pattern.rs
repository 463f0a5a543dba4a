//! Regex synthesis: compile an abbreviation into an equivalent pattern.
//!
//! The synthesized pattern is anchored at the start of the candidate and is
//! equivalent to the enumerator for yes/no matching only; it cannot report
//! positions, so ranking always goes through `align`.

use clap::ValueEnum;

/// Surface dialect of the synthesized pattern.
///
/// Both dialects encode identical matching semantics and differ only in
/// group syntax and the start-of-line context marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Dialect {
    /// PCRE-like syntax with `(?:...)` groups, for general regex engines.
    #[default]
    General,
    /// Vim very-magic syntax with `%(...)` groups, led by `\v`.
    Vim,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::General => "general",
            Dialect::Vim => "vim",
        }
    }

    fn group(self, r: &str) -> String {
        match self {
            Dialect::General => format!("(?:{})", r),
            Dialect::Vim => format!("%({})", r),
        }
    }

    fn alternation(self, r1: &str, r2: &str) -> String {
        self.group(&format!("{}|{}", self.group(r1), self.group(r2)))
    }

    fn optional(self, r: &str) -> String {
        format!("{}?", self.group(r))
    }
}

/// Build the pattern for `abbrev` in the given dialect.
///
/// Each abbreviation character expands to the same two-alternative structure
/// the enumerator applies: match right here with no boundary, or skip ahead
/// to a word boundary. Alphabetic characters get an extra camelCase
/// alternative so an uppercase occurrence after a non-uppercase character
/// counts as a boundary.
pub fn synthesize(abbrev: &str, dialect: Dialect) -> String {
    let mut res = String::new();
    if dialect == Dialect::Vim {
        res.push_str("\\v");
    }
    res.push('^');
    for ch in abbrev.chars() {
        res.push_str(&char_pattern(ch, dialect));
    }
    res
}

/// Diagnostic-display form of a pattern: literal backslashes doubled.
///
/// Used when printing patterns for embedding in host command syntax, never
/// for matching.
pub fn display_form(pattern: &str) -> String {
    pattern.replace('\\', "\\\\")
}

fn char_pattern(ch: char, dialect: Dialect) -> String {
    if ch.is_ascii_alphabetic() {
        let lo = ch.to_ascii_lowercase();
        let up = ch.to_ascii_uppercase();
        let anycase = format!("{}[{}{}]", dialect.optional(".*[^a-zA-Z]"), lo, up);
        let camelcase = format!("{}{}", dialect.optional(".*[^A-Z]"), up);
        dialect.alternation(&anycase, &camelcase)
    } else if ch.is_ascii_digit() {
        format!("{}{}", dialect.optional(".*[^0-9]"), ch)
    } else {
        format!(".*{}", escape_literal(ch))
    }
}

/// Escape a literal non-alphanumeric character for either dialect.
///
/// ASCII punctuation is backslash-escaped (covers every metacharacter in
/// both dialects); everything else passes through unchanged.
fn escape_literal(ch: char) -> String {
    if ch.is_ascii_punctuation() {
        format!("\\{}", ch)
    } else {
        ch.to_string()
    }
}
