//! Line and record parsers shared by the collectors.
//!
//! All functions here are pure and never fail: empty input gives empty
//! output, blank lines are skipped, and malformed numbers count as zero.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::stats::{ChurnBucket, ContributorRecord};

/// Marker injected in front of each commit in the month-tagged numstat stream.
pub const MONTH_MARKER: &str = "COMMIT_MONTH:";

static SHORTLOG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\t(.+?)(?:\s+<(.+)>)?$").expect("valid regex"));

/// Non-empty lines of a blob, in order.
pub fn lines(blob: &str) -> impl Iterator<Item = &str> {
    blob.lines().filter(|line| !line.is_empty())
}

/// Count identical non-empty lines, keeping first-seen order.
pub fn count_keys(blob: &str) -> Vec<(String, u64)> {
    tally(lines(blob))
}

/// Count occurrences of each key, keeping first-seen order.
pub fn tally<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<(String, u64)> {
    let mut order: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for key in keys {
        match index.get(key) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(key, order.len());
                order.push((key.to_string(), 1));
            }
        }
    }

    order
}

/// Same as [`count_keys`] but sorted by key ascending.
///
/// Month and ISO-week keys are year-first and zero-padded, so lexicographic
/// order is chronological.
pub fn count_keys_sorted(blob: &str) -> Vec<(String, u64)> {
    let mut counts = count_keys(blob);
    counts.sort_by(|a, b| a.0.cmp(&b.0));
    counts
}

/// Parse the leading decimal digits of `text`, or 0 if there are none.
pub fn parse_int_or_zero(text: &str) -> u64 {
    let text = text.trim();
    let digits = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(text, |(idx, _)| &text[..idx]);
    digits.parse().unwrap_or(0)
}

/// Accumulate a `git log --numstat --format=COMMIT_MONTH:<month>` stream into
/// per-month added/deleted totals, sorted by month.
///
/// Binary rows (`-\t-\tpath`) and rows without exactly three tab-separated
/// fields are ignored. Rows that appear before any marker are credited to a
/// month with an empty name.
pub fn parse_numstat_months(blob: &str) -> Vec<ChurnBucket> {
    let mut buckets: Vec<ChurnBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut current: Option<usize> = None;

    for line in blob.lines() {
        if let Some(month) = line.strip_prefix(MONTH_MARKER) {
            current = Some(bucket_index(&mut buckets, &mut index, month));
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != 3 || parts[0] == "-" {
            continue;
        }

        let slot = match current {
            Some(slot) => slot,
            None => {
                let slot = bucket_index(&mut buckets, &mut index, "");
                current = Some(slot);
                slot
            }
        };
        buckets[slot].added += parse_int_or_zero(parts[0]);
        buckets[slot].deleted += parse_int_or_zero(parts[1]);
    }

    buckets.sort_by(|a, b| a.month.cmp(&b.month));
    buckets
}

fn bucket_index(
    buckets: &mut Vec<ChurnBucket>,
    index: &mut HashMap<String, usize>,
    month: &str,
) -> usize {
    *index.entry(month.to_string()).or_insert_with(|| {
        buckets.push(ChurnBucket {
            month: month.to_string(),
            added: 0,
            deleted: 0,
        });
        buckets.len() - 1
    })
}

/// Parse `git shortlog -sne` output. Lines that don't look like
/// `<count>\t<name> <email>` are dropped.
pub fn parse_shortlog(blob: &str) -> Vec<ContributorRecord> {
    lines(blob)
        .filter_map(|line| {
            let caps = SHORTLOG_LINE.captures(line.trim())?;
            Some(ContributorRecord {
                commits: parse_int_or_zero(&caps[1]),
                name: caps[2].trim().to_string(),
                email: caps.get(3).map_or(String::new(), |m| m.as_str().to_string()),
            })
        })
        .collect()
}

/// Count non-empty lines (one record per line).
pub fn count_lines(blob: &str) -> u64 {
    lines(blob).count() as u64
}
