//! Input options for a collection run.
//!
//! This module contains the configuration that controls what the collectors
//! look at and how much they keep.

use chrono::{DateTime, Months, Utc};

use crate::source::{FilterConfig, DEFAULT_MAX_QUERY_BYTES};

/// Number of entries kept in the largest-files list.
pub const DEFAULT_LARGEST_FILES: usize = 25;
/// Number of entries kept in the hottest-files list.
pub const DEFAULT_HOTTEST_FILES: usize = 30;
/// Length of the trailing window for hottest files, in calendar months.
pub const DEFAULT_HOT_WINDOW_MONTHS: u32 = 12;

/// Options for collecting repository insights.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Filter applied to tracked paths before file-based collectors see them
    pub file_filter: FilterConfig,
    /// Maximum entries in `largestFiles`
    pub largest_files_limit: usize,
    /// Maximum entries in `hottestFiles`
    pub hottest_files_limit: usize,
    /// Trailing window (calendar months) for `hottestFiles`
    pub hot_window_months: u32,
    /// Cap on the stdout of a single history query
    pub max_query_bytes: usize,
    /// Reference time for `collectedAt` and the hot-file window
    pub now: DateTime<Utc>,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            file_filter: FilterConfig::new(),
            largest_files_limit: DEFAULT_LARGEST_FILES,
            hottest_files_limit: DEFAULT_HOTTEST_FILES,
            hot_window_months: DEFAULT_HOT_WINDOW_MONTHS,
            max_query_bytes: DEFAULT_MAX_QUERY_BYTES,
            now: Utc::now(),
        }
    }
}

impl CollectOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Set how many largest files to keep.
    pub fn largest_files(mut self, limit: usize) -> Self {
        self.largest_files_limit = limit;
        self
    }

    /// Set how many hottest files to keep.
    pub fn hottest_files(mut self, limit: usize) -> Self {
        self.hottest_files_limit = limit;
        self
    }

    /// Set the hot-file window in calendar months.
    pub fn hot_window_months(mut self, months: u32) -> Self {
        self.hot_window_months = months;
        self
    }

    /// Set the per-query output cap.
    pub fn max_query_bytes(mut self, bytes: usize) -> Self {
        self.max_query_bytes = bytes;
        self
    }

    /// Pin the reference time (useful for reproducible output).
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// First day of the hot-file window, formatted for `git log --since`.
    ///
    /// The same day of the month, `hot_window_months` earlier. Days past the
    /// end of the target month clamp to its last day.
    pub fn hot_since(&self) -> String {
        self.now
            .checked_sub_months(Months::new(self.hot_window_months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
            .format("%Y-%m-%d")
            .to_string()
    }
}
