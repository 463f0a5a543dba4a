//! Diagnostics and result output.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

/// Output format for filtered results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One matching line per input line, original content preserved
    #[default]
    Plain,
    /// Machine-readable JSON carrying query, engine and per-line scores
    Json,
    /// Machine-readable YAML carrying query, engine and per-line scores
    Yaml,
}

/// Stderr diagnostics with the `[abbrmatch]` prefix.
///
/// Warnings are always shown unless quiet; info needs --verbose, debug
/// needs --debug. Nothing here ever touches stdout, which is reserved for
/// results.
#[derive(Clone, Copy, Debug, Default)]
pub struct Diagnostics {
    pub verbose: bool,
    pub debug: bool,
    pub quiet: bool,
}

impl Diagnostics {
    /// Diagnostics that emit nothing, for embedded/library callers.
    pub fn silent() -> Self {
        Diagnostics {
            verbose: false,
            debug: false,
            quiet: true,
        }
    }

    pub fn info(&self, msg: &str) {
        if self.verbose || self.debug {
            eprintln!("{}", format!("[abbrmatch] {}", msg).dimmed());
        }
    }

    pub fn debug(&self, msg: &str) {
        if self.debug {
            eprintln!("{}", format!("[abbrmatch] {}", msg).dimmed());
        }
    }

    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{}", format!("[abbrmatch] {}", msg).yellow());
        }
    }
}

/// One matching line with its score when ranking was requested.
#[derive(Clone, Debug, Serialize)]
pub struct MatchRecord {
    pub line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Serialize)]
struct Report<'a> {
    query: &'a str,
    engine: &'a str,
    ranked: bool,
    matches: &'a [MatchRecord],
}

/// Print matching lines to stdout, one per line.
///
/// With `with_scores`, each line is prefixed by its computed score (the
/// debug+rank contract).
pub fn print_plain(records: &[MatchRecord], with_scores: bool) {
    for r in records {
        match (with_scores, r.score) {
            (true, Some(score)) => println!("{} {}", score, r.line),
            _ => println!("{}", r.line),
        }
    }
}

pub fn print_json(query: &str, engine: &str, ranked: bool, records: &[MatchRecord]) -> Result<(), String> {
    let report = Report {
        query,
        engine,
        ranked,
        matches: records,
    };
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("JSON serialization failed: {}", e))?;
    println!("{}", json);
    Ok(())
}

pub fn print_yaml(query: &str, engine: &str, ranked: bool, records: &[MatchRecord]) -> Result<(), String> {
    let report = Report {
        query,
        engine,
        ranked,
        matches: records,
    };
    let yaml =
        serde_yaml::to_string(&report).map_err(|e| format!("YAML serialization failed: {}", e))?;
    print!("{}", yaml);
    Ok(())
}
