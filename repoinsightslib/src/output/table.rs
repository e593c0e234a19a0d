//! Table-ready summary of a report.
//!
//! This module provides `SummaryTable`, a presentation-ready data structure
//! that can be printed directly or serialized to JSON.
//!
//! The data flow is:
//! 1. Raw query output (history text, file contents)
//! 2. AggregateReport (typed sections)
//! 3. SummaryTable (formatted strings for display)
//!
//! SummaryTable is a pure presentation layer - it only picks headline
//! figures and formats them. All computation happens in the collectors.

use serde::{Deserialize, Serialize};

use crate::pipeline::{AggregateReport, Section};

/// Text shown for a figure whose section failed.
pub const UNAVAILABLE: &str = "n/a";

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label ("Commits", "Longest streak", etc.)
    pub label: String,
    /// Values for each column after the label (as strings, ready for display)
    pub values: Vec<String>,
}

impl TableRow {
    fn new(label: &str, value: impl Into<String>) -> Self {
        TableRow {
            label: label.to_string(),
            values: vec![value.into()],
        }
    }
}

/// Table-ready headline figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTable {
    /// Title, usually the project name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Column headers: [label_header, value_header]
    pub headers: Vec<String>,
    /// Data rows
    pub rows: Vec<TableRow>,
    /// Section coverage footer
    pub footer: TableRow,
    /// Names of sections that failed, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
}

impl SummaryTable {
    /// Build the table from a report. Figures from failed sections show as
    /// [`UNAVAILABLE`].
    pub fn from_report(report: &AggregateReport) -> Self {
        let mut rows = Vec::new();

        let overview = report.overview.as_ref();
        rows.push(TableRow::new(
            "Commits",
            or_unavailable(overview.map(|o| o.total_commits.to_string())),
        ));
        rows.push(TableRow::new(
            "History",
            or_unavailable(overview.map(|o| format!("{} → {}", o.first_commit, o.latest_commit))),
        ));
        rows.push(TableRow::new(
            "Branches / tags",
            or_unavailable(overview.map(|o| format!("{} / {}", o.total_branches, o.total_tags))),
        ));
        rows.push(TableRow::new(
            "Files (source)",
            or_unavailable(overview.map(|o| format!("{} ({})", o.total_files, o.total_source_files))),
        ));
        rows.push(TableRow::new(
            "Lines of code",
            or_unavailable(overview.map(|o| o.total_lines_of_code.to_string())),
        ));

        rows.push(TableRow::new(
            "Contributors",
            or_unavailable(report.contributors.as_ref().map(|c| {
                match c.first() {
                    Some(top) => format!("{} (top: {}, {} commits)", c.len(), top.name, top.commits),
                    None => "0".to_string(),
                }
            })),
        ));
        rows.push(TableRow::new(
            "Top file type",
            or_unavailable(report.file_types.as_ref().map(|types| {
                types
                    .first()
                    .map_or("-".to_string(), |t| format!("{} ({})", t.extension, t.count))
            })),
        ));
        rows.push(TableRow::new(
            "Hottest file",
            or_unavailable(report.hottest_files.as_ref().map(|files| {
                files
                    .first()
                    .map_or("-".to_string(), |f| format!("{} ({} changes)", f.file, f.changes))
            })),
        ));

        let streaks = report.streaks.as_ref();
        rows.push(TableRow::new(
            "Longest streak",
            or_unavailable(streaks.map(|s| match s.longest_streak.days {
                0 => "0 days".to_string(),
                days => format!(
                    "{} days ({} → {})",
                    days, s.longest_streak.start, s.longest_streak.end
                ),
            })),
        ));
        rows.push(TableRow::new(
            "Activity rate",
            or_unavailable(streaks.map(|s| {
                format!(
                    "{}% ({} of {} days)",
                    s.activity_rate_percent, s.active_days, s.total_days
                )
            })),
        ));

        rows.push(TableRow::new(
            "Human commits",
            or_unavailable(
                report
                    .ai_contributions
                    .as_ref()
                    .map(|a| format!("{} of {}", a.human_commits, a.total_commits)),
            ),
        ));
        rows.push(TableRow::new(
            "Merged pull requests",
            or_unavailable(report.milestones.as_ref().map(|m| m.len().to_string())),
        ));
        rows.push(TableRow::new(
            "Peak window",
            or_unavailable(report.work_patterns.as_ref().map(|w| w.peak_window.clone())),
        ));
        rows.push(TableRow::new(
            "Tests",
            or_unavailable(report.test_info.as_ref().map(|t| {
                format!("{} files, ~{} cases", t.test_files, t.estimated_tests)
            })),
        ));
        rows.push(TableRow::new(
            "Dependencies",
            or_unavailable(
                report
                    .dependencies
                    .as_ref()
                    .map(|d| format!("{} ({} dev)", d.total, d.dev)),
            ),
        ));
        rows.push(TableRow::new(
            "Printed pages",
            or_unavailable(report.fun_facts.as_ref().map(|f| {
                format!("{} (~{} novels)", f.printed_pages, f.novel_equivalent)
            })),
        ));

        let missing = report.missing_sections();
        let footer = TableRow::new(
            "Sections",
            format!(
                "{} of {} collected",
                Section::ALL.len() - missing.len(),
                Section::ALL.len()
            ),
        );
        let legend = (!missing.is_empty()).then(|| {
            let names: Vec<&str> = missing.iter().map(|s| s.name()).collect();
            format!("Unavailable: {}", names.join(", "))
        });

        SummaryTable {
            title: overview.map(|o| o.project_name.clone()),
            headers: vec!["Metric".to_string(), "Value".to_string()],
            rows,
            footer,
            legend,
        }
    }
}

fn or_unavailable(value: Option<String>) -> String {
    value.unwrap_or_else(|| UNAVAILABLE.to_string())
}
