//! Record types produced by the collectors.
//!
//! Every type here serializes with the camelCase field names downstream
//! renderers read, so renaming a field is a breaking change to the report
//! format even when the Rust name stays the same.

use serde::{Deserialize, Serialize};

/// Aggregate scalars describing the repository as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSummary {
    /// Manifest package name, or the work tree directory name
    pub project_name: String,
    /// Date (`YYYY-MM-DD`) of the oldest commit
    pub first_commit: String,
    /// Date (`YYYY-MM-DD`) of the newest commit
    pub latest_commit: String,
    pub total_commits: u64,
    pub total_branches: u64,
    pub total_tags: u64,
    /// Tracked files after filtering
    pub total_files: u64,
    /// Tracked source files after filtering (never more than `total_files`)
    pub total_source_files: u64,
    pub total_lines_of_code: u64,
    pub total_characters: u64,
    /// RFC 3339 timestamp of the run
    pub collected_at: String,
}

/// Commits in one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: String,
    pub count: u64,
}

/// Commits in one ISO week (`YYYY-Www`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekCount {
    pub week: String,
    pub count: u64,
}

/// Commits on one day of the week (`Mon`..`Sun`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub day: String,
    pub count: u64,
}

/// Commits in one hour of the day (`00`..`23`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: String,
    pub count: u64,
}

/// One contributor as reported by shortlog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRecord {
    pub commits: u64,
    pub name: String,
    pub email: String,
}

/// Number of tracked files with a given extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeCount {
    pub extension: String,
    pub count: u64,
}

/// Number of tracked files below a (two-level) directory prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryCount {
    pub directory: String,
    pub file_count: u64,
}

/// A source file and its line count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSize {
    pub file: String,
    pub lines: u64,
}

/// A file and how often it changed inside the hot window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChanges {
    pub file: String,
    pub changes: u64,
}

/// Added and deleted lines in one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnBucket {
    pub month: String,
    pub added: u64,
    pub deleted: u64,
}

impl ChurnBucket {
    /// Net change for the month.
    pub fn net(&self) -> i64 {
        self.added as i64 - self.deleted as i64
    }

    /// Churn for the month (added + deleted).
    pub fn churn(&self) -> u64 {
        self.added + self.deleted
    }
}

/// Cumulative net lines at the end of a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGrowthPoint {
    pub month: String,
    pub net_lines: i64,
}

/// Number of commit subjects that fell into one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePattern {
    #[serde(rename = "type")]
    pub category: String,
    pub count: u64,
}

/// Longest run of consecutive active days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub days: u64,
    pub start: String,
    pub end: String,
}

/// The single day with the most commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusiestDay {
    pub date: String,
    pub commits: u64,
}

/// Activity streaks and rates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub longest_streak: Streak,
    pub busiest_day: BusiestDay,
    /// Distinct days with at least one commit
    pub active_days: u64,
    /// Days from the first to the last active day, inclusive
    pub total_days: u64,
    /// `round(active_days / total_days * 100)`
    #[serde(rename = "activityRate")]
    pub activity_rate_percent: u64,
}

/// Commits credited to one automation identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCount {
    #[serde(rename = "name")]
    pub source: String,
    #[serde(rename = "commits")]
    pub commit_count: u64,
}

/// Split of commits between humans and automation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionSummary {
    #[serde(rename = "total")]
    pub total_commits: u64,
    #[serde(rename = "human")]
    pub human_commits: u64,
    #[serde(rename = "aiBreakdown")]
    pub breakdown: Vec<SourceCount>,
    #[serde(rename = "coAuthored")]
    pub co_authored_count: u64,
}

/// A merged pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub date: String,
    #[serde(rename = "pr")]
    pub pull_request_number: u64,
    #[serde(rename = "branch")]
    pub branch_name: String,
    #[serde(rename = "label")]
    pub human_label: String,
}

/// When in the week and day commits happen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPatterns {
    pub weekday: u64,
    pub weekend: u64,
    pub weekend_pct: u64,
    pub early_bird: u64,
    pub business_hrs: u64,
    pub evening: u64,
    pub night_owl: u64,
    /// Label of the busiest time window
    pub peak_window: String,
}

/// Test files found among tracked paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestInventory {
    pub test_files: u64,
    pub total_test_lines: u64,
    pub estimated_tests: u64,
    pub file_list: Vec<String>,
}

/// Summary of the dependency manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySummary {
    pub production: u64,
    pub dev: u64,
    pub total: u64,
    pub top_deps: Vec<String>,
    pub top_dev_deps: Vec<String>,
}

/// Figures derived from the overview for the report's lighter side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunFacts {
    pub printed_pages: u64,
    pub total_words: u64,
    /// Novels of 80,000 words, one decimal place
    pub novel_equivalent: f64,
    pub typing_hours: u64,
    pub avg_commit_size: u64,
    pub lines_per_day: u64,
}
