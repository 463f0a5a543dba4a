//! Filter/sort driver and the host list-filtering boundary.

use std::cmp::Ordering;

use clap::ValueEnum;

use crate::matcher::{Engine, Matcher};
use crate::output::{Diagnostics, MatchRecord};
use crate::rank::Ranker;

/// Ranking mode for filtered results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RankMode {
    /// Keep input order, no scoring
    #[default]
    Off,
    /// Sort by match quality
    General,
    /// Sort by match quality with path-separator awareness
    #[value(alias = "file")]
    Path,
}

/// Driver options: ranking, order, result bound, host quoting.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    pub rank: RankMode,
    pub reverse: bool,
    pub limit: Option<usize>,
    pub quote: bool,
}

impl Options {
    /// Options for backends that cannot report alignments (external grep):
    /// abbreviation ranking is forced off and input order kept.
    pub fn without_ranking(self) -> Options {
        Options {
            rank: RankMode::Off,
            reverse: false,
            ..self
        }
    }
}

/// Filter `lines` through `matcher`, then rank, bound and quote per `opts`.
pub fn filter_lines(
    matcher: &Matcher,
    abbrev: &str,
    lines: Vec<String>,
    opts: &Options,
) -> Vec<MatchRecord> {
    let kept = lines
        .into_iter()
        .filter(|line| matcher.is_match(line))
        .map(|line| MatchRecord { line, score: None })
        .collect();
    rank_and_bound(kept, abbrev, opts)
}

/// Apply the rank/reverse/limit/quote pipeline to pre-filtered matches.
///
/// Split out from [`filter_lines`] so degraded backends (external grep) that
/// filter on their own still share the same post-processing.
pub fn rank_and_bound(mut kept: Vec<MatchRecord>, abbrev: &str, opts: &Options) -> Vec<MatchRecord> {
    if opts.rank != RankMode::Off {
        let ranker = Ranker::new(abbrev, opts.rank == RankMode::Path);
        for m in &mut kept {
            m.score = Some(ranker.rank(&m.line));
        }
        // Stable sort keeps input order on score ties.
        kept.sort_by(|a, b| {
            let ord = a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal);
            if opts.reverse { ord.reverse() } else { ord }
        });
    }
    if let Some(limit) = opts.limit {
        kept.truncate(limit);
    }
    if opts.quote {
        for m in &mut kept {
            m.line = quote_for_host(&m.line);
        }
    }
    kept
}

/// A candidate supplied by an embedding host: a bare line, or a record whose
/// `word` field carries the display string to match against.
pub enum Item {
    Word(String),
    Record {
        word: String,
        meta: serde_json::Value,
    },
}

impl Item {
    pub fn word(&self) -> &str {
        match self {
            Item::Word(word) => word,
            Item::Record { word, .. } => word,
        }
    }
}

/// Host list-filtering entry point.
///
/// Filters `items` with an auto-selected matcher, ranks them (path-aware when
/// `path_mode` is set), truncates to `limit`, and returns each surviving
/// string quoted for re-embedding in host command syntax.
pub fn filter_items(
    items: &[Item],
    abbrev: &str,
    limit: usize,
    path_mode: bool,
) -> Result<Vec<String>, String> {
    let matcher = Matcher::new(abbrev, Engine::Auto, &Diagnostics::silent())?;
    let ranker = Ranker::new(abbrev, path_mode);

    let mut kept: Vec<(f64, &str)> = items
        .iter()
        .map(Item::word)
        .filter(|word| matcher.is_match(word))
        .map(|word| (ranker.rank(word), word))
        .collect();
    kept.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    kept.truncate(limit);

    Ok(kept
        .into_iter()
        .map(|(_, word)| quote_for_host(word))
        .collect())
}

/// Wrap a result in double quotes, escaping backslashes and double quotes,
/// so the host can splice it into its own command syntax.
pub fn quote_for_host(line: &str) -> String {
    format!(
        "\"{}\"",
        line.replace('\\', "\\\\").replace('"', "\\\"")
    )
}
