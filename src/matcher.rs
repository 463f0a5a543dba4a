//! Backend selection and the match-test facade.
//!
//! A `Matcher` answers "does this candidate match" either through a compiled
//! synthesized pattern (fast existence test) or through direct alignment
//! enumeration (always available, and the only path that can report
//! positions). The backends agree on every verdict; see the tests.

use clap::ValueEnum;

use crate::align;
use crate::output::Diagnostics;
use crate::pattern::{self, Dialect};

/// Backend engine choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    /// Try regex engines in preference order, fall back to direct enumeration
    #[default]
    Auto,
    /// The `regex` crate (requires the engine-regex build feature)
    Regex,
    /// The `regex-lite` crate (requires the engine-regex-lite build feature)
    RegexLite,
    /// Direct enumeration only, no compiled pattern
    None,
}

/// Engines consulted by auto selection, in order of preference.
pub const ENGINE_PREFERENCE: &[Engine] = &[Engine::Regex, Engine::RegexLite];

impl Engine {
    pub fn name(self) -> &'static str {
        match self {
            Engine::Auto => "auto",
            Engine::Regex => "regex",
            Engine::RegexLite => "regex-lite",
            Engine::None => "none",
        }
    }
}

/// Match-test facade over the selected backend.
///
/// Construction fixes the abbreviation and backend for the lifetime of the
/// matcher; candidates are supplied per call.
pub enum Matcher {
    #[cfg(feature = "engine-regex")]
    Regex(regex::Regex),
    #[cfg(feature = "engine-regex-lite")]
    RegexLite(regex_lite::Regex),
    Direct(String),
}

impl Matcher {
    /// Build a matcher for `abbrev` with the requested engine.
    ///
    /// Auto degrades through [`ENGINE_PREFERENCE`] with informational
    /// diagnostics only and always succeeds. Forcing an engine that is not
    /// compiled in, or whose pattern fails to compile, is an error.
    pub fn new(abbrev: &str, engine: Engine, diag: &Diagnostics) -> Result<Matcher, String> {
        match engine {
            Engine::Auto => {
                for &candidate in ENGINE_PREFERENCE {
                    match Self::compile(abbrev, candidate) {
                        Ok(Some(matcher)) => {
                            diag.info(&format!("using {} engine", candidate.name()));
                            return Ok(matcher);
                        }
                        Ok(None) => {
                            diag.info(&format!(
                                "{} engine not available in this build",
                                candidate.name()
                            ));
                        }
                        Err(e) => {
                            diag.info(&format!("{} engine rejected pattern: {}", candidate.name(), e));
                        }
                    }
                }
                diag.info("no regex engine available, using direct enumeration");
                Ok(Matcher::Direct(abbrev.to_string()))
            }
            Engine::None => Ok(Matcher::Direct(abbrev.to_string())),
            forced => match Self::compile(abbrev, forced)? {
                Some(matcher) => Ok(matcher),
                None => Err(format!(
                    "regex engine '{}' is not available in this build",
                    forced.name()
                )),
            },
        }
    }

    /// Compile the synthesized pattern with one specific engine.
    ///
    /// Returns `Ok(None)` when the engine is not compiled into this build.
    fn compile(abbrev: &str, engine: Engine) -> Result<Option<Matcher>, String> {
        let pat = pattern::synthesize(abbrev, Dialect::General);
        match engine {
            #[cfg(feature = "engine-regex")]
            Engine::Regex => regex::Regex::new(&pat)
                .map(|r| Some(Matcher::Regex(r)))
                .map_err(|e| format!("failed to compile pattern: {}", e)),
            #[cfg(feature = "engine-regex-lite")]
            Engine::RegexLite => regex_lite::Regex::new(&pat)
                .map(|r| Some(Matcher::RegexLite(r)))
                .map_err(|e| format!("failed to compile pattern: {}", e)),
            _ => {
                let _ = pat;
                Ok(None)
            }
        }
    }

    /// Test whether `candidate` matches the abbreviation.
    pub fn is_match(&self, candidate: &str) -> bool {
        match self {
            #[cfg(feature = "engine-regex")]
            Matcher::Regex(re) => re.is_match(candidate),
            #[cfg(feature = "engine-regex-lite")]
            Matcher::RegexLite(re) => re.is_match(candidate),
            Matcher::Direct(abbrev) => align::has_match(abbrev, candidate),
        }
    }

    /// Name of the backend actually in use.
    pub fn backend(&self) -> &'static str {
        match self {
            #[cfg(feature = "engine-regex")]
            Matcher::Regex(_) => "regex",
            #[cfg(feature = "engine-regex-lite")]
            Matcher::RegexLite(_) => "regex-lite",
            Matcher::Direct(_) => "direct",
        }
    }
}
