//! Configuration system for the abbrmatch CLI.
//!
//! Configuration is loaded from multiple sources with the following precedence:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ABBRMATCH_*)
//! 3. User global (~/.config/abbrmatch/config.yaml)
//! 4. Built-in defaults (lowest priority)
//!
//! This module provides:
//! - `Config` struct with all settings
//! - `EnvVar` registry for documentation
//! - Helper functions for env var parsing
//! - Config loading and merging

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ============================================================================
// Config Structs
// ============================================================================

/// Root configuration for the abbrmatch CLI.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Matching defaults (engine, ranking, dialect)
    pub matching: MatchingConfig,
    /// Behavior settings
    pub behavior: BehaviorConfig,
}

/// Default matching settings.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Default backend engine (auto/regex/regex-lite/none)
    pub engine: Option<String>,
    /// Default rank mode (off/general/path)
    pub rank: Option<String>,
    /// Default pattern dialect for --regex-only (general/vim)
    pub syntax: Option<String>,
}

/// Behavior defaults.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Default result-count limit (null = unlimited)
    pub limit: Option<usize>,
    /// Suppress warnings and hints
    pub quiet: bool,
}

// ============================================================================
// Environment Variable Registry
// ============================================================================

/// A documented environment variable.
pub struct EnvVar {
    pub name: &'static str,
    pub description: &'static str,
    pub default: &'static str,
    pub values: &'static str,
}

/// All environment variables recognized by abbrmatch.
pub const ENV_VARS: &[EnvVar] = &[
    EnvVar {
        name: "ABBRMATCH_ENGINE",
        description: "Default matching backend",
        default: "auto",
        values: "auto, regex, regex-lite, none",
    },
    EnvVar {
        name: "ABBRMATCH_RANK",
        description: "Default rank mode",
        default: "off",
        values: "off, general, path",
    },
    EnvVar {
        name: "ABBRMATCH_LIMIT",
        description: "Default result-count limit",
        default: "unset (unlimited)",
        values: "number",
    },
    EnvVar {
        name: "ABBRMATCH_QUIET",
        description: "Suppress warnings and hints",
        default: "false",
        values: "1, true, yes",
    },
];

/// Render the env var registry for the CLI long help.
pub fn env_help() -> String {
    let mut out = String::from("Environment variables:\n");
    for var in ENV_VARS {
        out.push_str(&format!(
            "  {:<18} {} [{}] (default: {})\n",
            var.name, var.description, var.values, var.default
        ));
    }
    out.push_str("\nFlags override environment variables, which override the user config\nfile (~/.config/abbrmatch/config.yaml).");
    out
}

// ============================================================================
// Environment Variable Helpers
// ============================================================================

/// Parse a boolean environment variable.
///
/// Returns `Some(true)` if the variable is set to a truthy value (1, true, yes),
/// `Some(false)` if set to a falsy value (0, false, no),
/// and `None` if unset or empty.
pub fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|v| {
        if v.is_empty() {
            return None;
        }
        let lower = v.to_lowercase();
        match lower.as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        }
    })
}

/// Parse a string environment variable.
///
/// Returns `Some(value)` if set and non-empty, `None` otherwise.
pub fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Parse a usize environment variable.
///
/// Returns `Some(value)` if set and parseable, `None` otherwise.
pub fn env_usize(name: &str) -> Option<usize> {
    env_string(name).and_then(|v| v.parse().ok())
}

// ============================================================================
// Config Loading
// ============================================================================

/// Load configuration from the user config file, if present.
///
/// Does not apply CLI flags or env vars; those are resolved at point of use
/// so precedence stays visible where each setting is consumed.
pub fn load_config() -> Config {
    user_config_path()
        .and_then(|p| load_file(&p))
        .unwrap_or_default()
}

/// Get the user config file path (~/.config/abbrmatch/config.yaml).
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("abbrmatch").join("config.yaml"))
}

/// Load a config file, returning None if it doesn't exist or can't be parsed.
pub fn load_file(path: &Path) -> Option<Config> {
    let content = fs::read_to_string(path).ok()?;
    serde_yaml::from_str(&content).ok()
}

/// Check whether hints and warnings should be suppressed.
pub fn is_quiet(config: &Config) -> bool {
    config.behavior.quiet || env_bool("ABBRMATCH_QUIET").unwrap_or(false)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to serialize env var tests
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_env<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock().unwrap();

        let originals: Vec<_> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var(*k).ok()))
            .collect();

        for (k, v) in vars {
            match v {
                Some(val) => unsafe { std::env::set_var(k, val) },
                None => unsafe { std::env::remove_var(k) },
            }
        }

        let result = f();

        for (k, original) in originals {
            match original {
                Some(val) => unsafe { std::env::set_var(k, val) },
                None => unsafe { std::env::remove_var(k) },
            }
        }

        result
    }

    #[test]
    fn test_env_bool_truthy() {
        with_env(&[("TEST_AM_BOOL", Some("1"))], || {
            assert_eq!(env_bool("TEST_AM_BOOL"), Some(true));
        });
        with_env(&[("TEST_AM_BOOL", Some("TRUE"))], || {
            assert_eq!(env_bool("TEST_AM_BOOL"), Some(true));
        });
        with_env(&[("TEST_AM_BOOL", Some("yes"))], || {
            assert_eq!(env_bool("TEST_AM_BOOL"), Some(true));
        });
    }

    #[test]
    fn test_env_bool_falsy_and_unset() {
        with_env(&[("TEST_AM_BOOL", Some("0"))], || {
            assert_eq!(env_bool("TEST_AM_BOOL"), Some(false));
        });
        with_env(&[("TEST_AM_BOOL", Some("no"))], || {
            assert_eq!(env_bool("TEST_AM_BOOL"), Some(false));
        });
        with_env(&[("TEST_AM_BOOL", None)], || {
            assert_eq!(env_bool("TEST_AM_BOOL"), None);
        });
        with_env(&[("TEST_AM_BOOL", Some("invalid"))], || {
            assert_eq!(env_bool("TEST_AM_BOOL"), None);
        });
    }

    #[test]
    fn test_env_string_and_usize() {
        with_env(&[("TEST_AM_STR", Some("hello"))], || {
            assert_eq!(env_string("TEST_AM_STR"), Some("hello".to_string()));
        });
        with_env(&[("TEST_AM_STR", Some(""))], || {
            assert_eq!(env_string("TEST_AM_STR"), None);
        });
        with_env(&[("TEST_AM_NUM", Some("42"))], || {
            assert_eq!(env_usize("TEST_AM_NUM"), Some(42));
        });
        with_env(&[("TEST_AM_NUM", Some("nope"))], || {
            assert_eq!(env_usize("TEST_AM_NUM"), None);
        });
    }

    #[test]
    fn test_config_parses_partial_yaml() {
        let config: Config = serde_yaml::from_str("matching:\n  engine: regex\n").unwrap();
        assert_eq!(config.matching.engine.as_deref(), Some("regex"));
        assert_eq!(config.matching.rank, None);
        assert_eq!(config.behavior.limit, None);
        assert!(!config.behavior.quiet);
    }

    #[test]
    fn test_is_quiet_from_config_or_env() {
        let mut config = Config::default();
        with_env(&[("ABBRMATCH_QUIET", None)], || {
            assert!(!is_quiet(&config));
        });
        config.behavior.quiet = true;
        with_env(&[("ABBRMATCH_QUIET", None)], || {
            assert!(is_quiet(&config));
        });
        let config = Config::default();
        with_env(&[("ABBRMATCH_QUIET", Some("1"))], || {
            assert!(is_quiet(&config));
        });
    }

    #[test]
    fn test_env_help_lists_every_var() {
        let help = env_help();
        for var in ENV_VARS {
            assert!(help.contains(var.name));
        }
    }
}
