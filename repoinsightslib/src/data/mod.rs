//! Data collection: parse query output and build report sections.
//!
//! This module handles the second stage of the pipeline - turning raw history
//! text and file contents into typed records. It provides:
//!
//! - **Parsing**: Line and record parsers shared by the collectors (`parse`)
//! - **Statistics**: Record types with their report field names (`stats`)
//! - **Collecting**: One collector per report section (`collect`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use repoinsightslib::data::collect::{streaks, Sources};
//!
//! let summary = streaks::collect(&sources)?;
//! println!("Longest streak: {} days", summary.longest_streak.days);
//! ```

pub mod collect;
pub mod parse;
pub mod stats;

pub use collect::Sources;
pub use stats::{
    AttributionSummary, BusiestDay, ChurnBucket, CodeGrowthPoint, ContributorRecord, DayCount,
    DependencySummary, DirectoryCount, FileChanges, FileSize, FileTypeCount, FunFacts, HourCount,
    MessagePattern, Milestone, MonthCount, OverviewSummary, SourceCount, Streak, StreakSummary,
    TestInventory, WeekCount, WorkPatterns,
};
