use std::io;
use std::process;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::env::CompleteEnv;
use clap_complete::{Shell, generate};

use abbrmatch::filter::{self, RankMode};
use abbrmatch::matcher::{self, Engine};
use abbrmatch::output::{self, Diagnostics, MatchRecord, OutputFormat};
use abbrmatch::pattern::{self, Dialect};
use abbrmatch::{config, grep, input};

#[derive(Debug, Parser)]
#[command(name = "abbrmatch")]
#[command(version = env!("ABBRMATCH_VERSION"))]
#[command(about = "Filter and rank lines by fuzzy abbreviation match")]
#[command(
    long_about = "abbrmatch - Filter and rank candidate lines by fuzzy abbreviation match.\n\nReads candidate lines from stdin and keeps those where every abbreviation\ncharacter occurs in order, case-insensitively, aligned with word or camelCase\nboundaries. Matching runs through a synthesized regex on a fast engine when\none is compiled in, falling back to direct enumeration otherwise.\n\nExit status: 0 if at least one line matched, 1 if none, 2 on fatal errors."
)]
#[command(after_long_help = config::env_help())]
struct Cli {
    /// Abbreviation to match against each input line
    #[arg(required_unless_present = "completions")]
    abbrev: Option<String>,

    /// Matching backend (auto tries engines in preference order)
    #[arg(long, value_enum)]
    engine: Option<Engine>,

    /// Shorthand for --engine none
    #[arg(long, conflicts_with = "engine")]
    no_regex: bool,

    /// Rank matches by quality instead of keeping input order
    #[arg(long, value_enum)]
    rank: Option<RankMode>,

    /// Sort worst-first instead of best-first
    #[arg(long)]
    reverse: bool,

    /// Keep at most N results
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Quote results for re-embedding in host command syntax
    #[arg(long)]
    quote: bool,

    /// Print the synthesized regex (display-escaped) and exit
    #[arg(long)]
    regex_only: bool,

    /// Regex dialect for --regex-only output
    #[arg(long, value_enum)]
    syntax: Option<Dialect>,

    /// Route filtering through an external grep -E process (degraded mode;
    /// abbreviation ranking does not apply)
    #[arg(long, conflicts_with_all = ["engine", "no_regex", "regex_only", "rank"])]
    grep: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "plain")]
    format: OutputFormat,

    /// Explain backend selection and print per-line scores when ranking
    #[arg(short, long)]
    verbose: bool,

    /// Verbose plus synthesized patterns in both dialects
    #[arg(short, long)]
    debug: bool,

    /// Suppress warnings and hints
    #[arg(short, long)]
    quiet: bool,

    /// Generate shell completion script
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    // Handle dynamic shell completions
    CompleteEnv::with_factory(Cli::command).complete();

    // Use try_parse to catch errors and normalize exit code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Print the error (includes usage for missing args)
            let _ = e.print();
            // Exit with 0 for help/version, 2 for actual errors
            let exit_code = if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                0
            } else {
                2
            };
            process::exit(exit_code);
        }
    };

    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "abbrmatch", &mut io::stdout());
        return;
    }

    let config = config::load_config();

    match run(cli, &config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    }
}

/// Run the filter; Ok(true) means at least one line matched.
fn run(cli: Cli, config: &config::Config) -> Result<bool, String> {
    let abbrev = cli.abbrev.clone().unwrap_or_default();
    let diag = Diagnostics {
        verbose: cli.verbose,
        debug: cli.debug,
        quiet: cli.quiet || config::is_quiet(config),
    };

    if cli.regex_only {
        let syntax = resolve_value(cli.syntax, None, &config.matching.syntax, "syntax")?;
        let pattern = pattern::synthesize(&abbrev, syntax);
        println!("{}", pattern::display_form(&pattern));
        return Ok(true);
    }

    if diag.debug {
        for dialect in [Dialect::General, Dialect::Vim] {
            diag.debug(&format!(
                "{} regex: {}",
                dialect.name(),
                pattern::display_form(&pattern::synthesize(&abbrev, dialect))
            ));
        }
    }

    let engine = if cli.no_regex {
        Engine::None
    } else {
        resolve_value(
            cli.engine,
            config::env_string("ABBRMATCH_ENGINE"),
            &config.matching.engine,
            "engine",
        )?
    };
    let rank = resolve_value(
        cli.rank,
        config::env_string("ABBRMATCH_RANK"),
        &config.matching.rank,
        "rank",
    )?;
    let mut opts = filter::Options {
        rank,
        reverse: cli.reverse,
        limit: cli
            .limit
            .or_else(|| config::env_usize("ABBRMATCH_LIMIT"))
            .or(config.behavior.limit),
        quote: cli.quote,
    };
    // Ranking scores abbreviation alignments, which grep-matched lines need
    // not have; a configured rank mode is dropped rather than letting
    // non-matches sort first with score 0.
    if cli.grep && opts.rank != RankMode::Off {
        diag.warn("ranking is abbreviation-based, keeping input order in grep mode");
        opts = opts.without_ranking();
    }

    let lines = input::read_lines()?;
    if lines.is_empty() {
        diag.warn("no candidate lines on stdin");
    }

    let (results, backend) = if cli.grep {
        diag.info("using external grep, pattern is taken literally");
        let hits = grep::filter_grep(&abbrev, &lines)?;
        let kept: Vec<MatchRecord> = hits
            .into_iter()
            .map(|i| MatchRecord {
                line: lines[i].clone(),
                score: None,
            })
            .collect();
        (filter::rank_and_bound(kept, &abbrev, &opts), "grep")
    } else {
        let m = matcher::Matcher::new(&abbrev, engine, &diag)?;
        let backend = m.backend();
        (filter::filter_lines(&m, &abbrev, lines, &opts), backend)
    };

    let ranked = opts.rank != RankMode::Off;
    match cli.format {
        OutputFormat::Plain => {
            let with_scores = ranked && (diag.debug || diag.verbose);
            output::print_plain(&results, with_scores);
        }
        OutputFormat::Json => {
            output::print_json(&abbrev, backend, ranked, &results)?;
        }
        OutputFormat::Yaml => {
            output::print_yaml(&abbrev, backend, ranked, &results)?;
        }
    }

    Ok(!results.is_empty())
}

/// Resolve a ValueEnum setting: CLI flag > env var > config file > default.
fn resolve_value<T: ValueEnum + Default>(
    flag: Option<T>,
    env: Option<String>,
    configured: &Option<String>,
    what: &str,
) -> Result<T, String> {
    if let Some(v) = flag {
        return Ok(v);
    }
    let Some(s) = env.or_else(|| configured.clone()) else {
        return Ok(T::default());
    };
    T::from_str(&s, true).map_err(|_| {
        let allowed: Vec<String> = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|p| p.get_name().to_string())
            .collect();
        format!(
            "invalid {} '{}' (expected one of: {})",
            what,
            s,
            allowed.join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn grep_mode_rejects_rank_flag() {
        let err = Cli::try_parse_from(["abbrmatch", "am", "--grep", "--rank", "general"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn grep_mode_rejects_engine_flags() {
        for extra in [vec!["--engine", "regex"], vec!["--no-regex"]] {
            let mut argv = vec!["abbrmatch", "am", "--grep"];
            argv.extend(extra);
            assert!(Cli::try_parse_from(argv).is_err());
        }
    }
}
