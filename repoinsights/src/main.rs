//! # repoinsights
//!
//! A CLI tool that turns a git repository's history into a structured
//! analytics report.
//!
//! ## Overview
//!
//! repoinsights is built on top of repoinsightslib. It collects every report
//! section for the repository containing the given path, writes the full
//! report as JSON, and prints a short summary table.
//!
//! ## Features
//!
//! - **Commit cadence**: By month, ISO week, weekday and hour
//! - **People**: Contributors, automation vs. human authorship
//! - **Hotspots**: Largest and most frequently changed files, churn per month
//! - **Habits**: Streaks, work-time windows, commit message categories
//! - **Glob filtering**: Include/exclude files with glob patterns
//! - **Failure isolation**: A section that fails is skipped, not fatal
//!
//! ## Usage
//!
//! ```bash
//! # Analyze the repository in the current directory
//! repoinsights
//!
//! # Analyze another repository, writing the report elsewhere
//! repoinsights ../other-repo --output /tmp/other.json
//!
//! # Ignore vendored code
//! repoinsights . --exclude "vendor/**" --exclude "**/*.min.js"
//!
//! # Print the report JSON instead of the summary table
//! repoinsights . --format json --quiet
//! ```
//!
//! Set `RUST_LOG=repoinsightslib=debug` to see every history query.

mod render;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use repoinsightslib::{
    CollectOptions, Collector, FilterConfig, ProgressStatus, Section, SummaryTable,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Report file written when `--output` is not given.
const DEFAULT_OUTPUT: &str = "repo-insights.json";

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("repoinsights")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Git history analytics: commit cadence, churn, contributors and hotspots")
        .arg(
            Arg::new("path")
                .help("Path inside the repository to analyze (defaults to current directory)")
                .default_value("."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .default_value(DEFAULT_OUTPUT)
                .help("Where to write the JSON report"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("What to print on stdout: summary table or report JSON"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Do not print per-section progress"),
        )
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let path = matches
        .get_one::<String>("path")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let json_mode = matches.get_one::<String>("format").map(|s| s.as_str()) == Some("json");
    let quiet = matches.get_flag("quiet");

    let options = CollectOptions::new().filter(build_filter(matches)?);
    let collector = Collector::discover(path, options)?;
    info!(root = %collector.root().display(), "repository found");

    if !quiet {
        eprintln!("Collecting insights for {}", collector.root().display());
    }
    let report = collector.run(&mut |section: Section, status: &ProgressStatus| {
        if quiet {
            return;
        }
        if let Some(line) = render::progress_line(section, status) {
            eprintln!("{}", line);
        }
    });

    let json = serde_json::to_string_pretty(&report)?;
    fs::write(&output, &json)
        .with_context(|| format!("failed to write report to {}", output.display()))?;
    debug!("wrote {} bytes to {}", json.len(), output.display());

    if json_mode {
        println!("{}", json);
    } else {
        print!(
            "{}",
            render::render_summary_table(&SummaryTable::from_report(&report))
        );
        println!("\nReport written to {}", output.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let matches = build_command().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
