//! # repoinsightslib
//!
//! A git history analytics library that turns a repository into a structured
//! report of commit cadence, contributors, churn, hotspots and work habits.
//!
//! ## Overview
//!
//! The library asks a history source (normally the `git` executable) a fixed
//! set of questions, parses the text it gets back, and assembles one typed
//! record per report section:
//!
//! - **Activity**: Commits by month, ISO week, weekday and hour
//! - **People**: Contributors, human vs. automation authorship, co-authorship
//! - **Files**: Extensions, directories, largest and most frequently changed files
//! - **Churn**: Lines added and deleted per month, cumulative growth
//! - **Habits**: Streaks, work-time windows, commit message categories
//! - **Project**: Merged pull requests, tests, dependency manifest, fun facts
//!
//! ## Pipeline
//!
//! 1. **source**: history queries (`HistorySource`), file reads (`FileReader`),
//!    path filtering (`FilterConfig`)
//! 2. **data**: parsers and per-section collectors producing typed records
//! 3. **pipeline**: the `Collector` that runs every section with failure
//!    isolation and progress reporting, producing an `AggregateReport`
//! 4. **output**: `SummaryTable` for a human-readable overview
//!
//! A section that fails (for example because a query errors out) is left out
//! of the report; every other section is still collected.
//!
//! ## Example
//!
//! ```rust,no_run
//! use repoinsightslib::{CollectOptions, Collector, FilterConfig, NoopObserver};
//!
//! let filter = FilterConfig::new().exclude("vendor/**").unwrap();
//! let collector = Collector::discover(".", CollectOptions::new().filter(filter)).unwrap();
//! let report = collector.run(&mut NoopObserver);
//!
//! if let Some(overview) = &report.overview {
//!     println!("{} commits", overview.total_commits);
//! }
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```

pub mod data;
pub mod error;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod source;

pub use data::stats::{
    AttributionSummary, ChurnBucket, CodeGrowthPoint, ContributorRecord, DependencySummary,
    FunFacts, Milestone, OverviewSummary, StreakSummary, TestInventory, WorkPatterns,
};
pub use error::InsightsError;
pub use options::CollectOptions;
pub use output::{SummaryTable, TableRow};
pub use pipeline::{
    AggregateReport, Collector, NoopObserver, ProgressObserver, ProgressStatus, Section,
};
pub use source::{discover_root, FileReader, FilterConfig, FsReader, GitCli, HistorySource};

/// Result type for repoinsightslib operations
pub type Result<T> = std::result::Result<T, InsightsError>;
