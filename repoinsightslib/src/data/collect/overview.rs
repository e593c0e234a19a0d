//! Repository overview: dates, counts and source totals.

use std::path::Path;

use chrono::SecondsFormat;
use tracing::debug;

use crate::data::parse::{count_lines, lines, parse_int_or_zero};
use crate::data::stats::OverviewSummary;
use crate::source::{char_count, is_source_file, line_count, FileReader};
use crate::Result;

use super::{manifest, Sources};

pub fn collect(sources: &Sources<'_>) -> Result<OverviewSummary> {
    let first_commit = lines(&sources.query(&["log", "--reverse", "--format=%ad", "--date=short"])?)
        .next()
        .unwrap_or_default()
        .to_string();
    let latest_commit = sources.query(&["log", "-1", "--format=%ad", "--date=short"])?;
    let total_commits = parse_int_or_zero(&sources.query(&["rev-list", "--count", "HEAD"])?);
    let total_branches = count_lines(&sources.query(&["branch", "-a"])?);
    let total_tags = count_lines(&sources.query(&["tag"])?);

    let files = sources.tracked_files()?;
    let totals = SourceTotals::over(sources.files, &files);

    Ok(OverviewSummary {
        project_name: manifest::project_name(sources.files, sources.root),
        first_commit,
        latest_commit: latest_commit.trim().to_string(),
        total_commits,
        total_branches,
        total_tags,
        total_files: files.len() as u64,
        total_source_files: totals.files,
        total_lines_of_code: totals.lines,
        total_characters: totals.characters,
        collected_at: sources
            .options
            .now
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Aggregate size of the source files among a set of tracked paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceTotals {
    pub files: u64,
    pub lines: u64,
    pub characters: u64,
}

impl SourceTotals {
    /// Sum over the source files in `files`. Every source file is counted;
    /// unreadable ones add no lines or characters.
    pub fn over(reader: &dyn FileReader, files: &[String]) -> Self {
        let mut totals = SourceTotals::default();
        for file in files.iter().filter(|f| is_source_file(f)) {
            totals.files += 1;
            match reader.read_to_string(Path::new(file)) {
                Ok(content) => {
                    totals.lines += line_count(&content);
                    totals.characters += char_count(&content);
                }
                Err(e) => debug!("skipping unreadable source file: {}", e),
            }
        }
        totals
    }
}
