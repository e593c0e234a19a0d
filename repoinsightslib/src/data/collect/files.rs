//! File-level breakdowns: extensions, directories, largest and hottest files.

use std::path::Path;

use tracing::debug;

use crate::data::parse;
use crate::data::stats::{DirectoryCount, FileChanges, FileSize, FileTypeCount};
use crate::source::{extension, is_source_file, line_count, FileReader};
use crate::Result;

use super::Sources;

/// Label used for files without an extension.
pub const NO_EXTENSION: &str = "(no ext)";

/// Tracked files per extension, most common first.
pub fn collect_file_types(sources: &Sources<'_>) -> Result<Vec<FileTypeCount>> {
    let files = sources.tracked_files()?;
    Ok(file_types(&files))
}

/// Tracked files per top-level (two segment) directory, most populated first.
pub fn collect_directories(sources: &Sources<'_>) -> Result<Vec<DirectoryCount>> {
    let files = sources.tracked_files()?;
    Ok(directories(&files))
}

/// Longest tracked source files by line count.
pub fn collect_largest(sources: &Sources<'_>) -> Result<Vec<FileSize>> {
    let files = sources.tracked_files()?;
    Ok(largest(
        sources.files,
        &files,
        sources.options.largest_files_limit,
    ))
}

/// Most frequently changed paths inside the hot window.
pub fn collect_hottest(sources: &Sources<'_>) -> Result<Vec<FileChanges>> {
    let since = format!("--since={}", sources.options.hot_since());
    let raw = sources.query(&["log", &since, "--pretty=format:", "--name-only"])?;
    let filter = &sources.options.file_filter;

    let counts = parse::tally(
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && filter.matches(line)),
    );

    Ok(top_n(counts, sources.options.hottest_files_limit)
        .into_iter()
        .map(|(file, changes)| FileChanges { file, changes })
        .collect())
}

pub fn file_types(files: &[String]) -> Vec<FileTypeCount> {
    let counts = parse::tally(
        files
            .iter()
            .map(|f| extension(f).unwrap_or(NO_EXTENSION)),
    );

    sort_desc(counts)
        .into_iter()
        .map(|(extension, count)| FileTypeCount { extension, count })
        .collect()
}

pub fn directories(files: &[String]) -> Vec<DirectoryCount> {
    let counts = parse::tally(files.iter().map(|f| directory_key(f)));

    sort_desc(counts)
        .into_iter()
        .map(|(directory, file_count)| DirectoryCount {
            directory,
            file_count,
        })
        .collect()
}

/// First two path segments, or the whole path for top-level files.
pub fn directory_key(path: &str) -> &str {
    match path.match_indices('/').nth(1) {
        Some((idx, _)) => &path[..idx],
        None => path,
    }
}

pub fn largest(reader: &dyn FileReader, files: &[String], limit: usize) -> Vec<FileSize> {
    let sizes: Vec<(String, u64)> = files
        .iter()
        .filter(|f| is_source_file(f))
        .filter_map(|f| match reader.read_to_string(Path::new(f)) {
            Ok(content) => Some((f.clone(), line_count(&content))),
            Err(e) => {
                debug!("skipping unreadable file: {}", e);
                None
            }
        })
        .collect();

    top_n(sizes, limit)
        .into_iter()
        .map(|(file, lines)| FileSize { file, lines })
        .collect()
}

/// Stable sort by count, descending.
fn sort_desc(mut counts: Vec<(String, u64)>) -> Vec<(String, u64)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Full descending sort, then truncate.
fn top_n(counts: Vec<(String, u64)>, limit: usize) -> Vec<(String, u64)> {
    let mut sorted = sort_desc(counts);
    sorted.truncate(limit);
    sorted
}
