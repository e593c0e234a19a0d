//! Per-section collectors.
//!
//! Each submodule owns one analytical concern. A collector takes the
//! [`Sources`] of a run, issues its own history queries, and returns one typed
//! record. Collectors never look at each other's output; the only exception,
//! fun facts, receives the overview explicitly from the orchestrator.
//!
//! The text-crunching part of every collector is a separate pure function
//! taking raw query output, so it can be exercised without a repository.

pub mod activity;
pub mod attribution;
pub mod churn;
pub mod contributors;
pub mod files;
pub mod fun_facts;
pub mod manifest;
pub mod messages;
pub mod milestones;
pub mod overview;
pub mod patterns;
pub mod streaks;
pub mod testinfo;

use std::path::Path;

use crate::options::CollectOptions;
use crate::source::{FileReader, HistorySource};
use crate::Result;

use super::parse;

/// Everything a collector may read from.
#[derive(Clone, Copy)]
pub struct Sources<'a> {
    /// Answers history queries
    pub history: &'a dyn HistorySource,
    /// Reads tracked files
    pub files: &'a dyn FileReader,
    /// Work tree root (used for naming the project)
    pub root: &'a Path,
    /// Run configuration
    pub options: &'a CollectOptions,
}

impl<'a> Sources<'a> {
    /// Bundle the sources of a run.
    pub fn new(
        history: &'a dyn HistorySource,
        files: &'a dyn FileReader,
        root: &'a Path,
        options: &'a CollectOptions,
    ) -> Self {
        Self {
            history,
            files,
            root,
            options,
        }
    }

    /// Run a history query.
    pub fn query(&self, args: &[&str]) -> Result<String> {
        self.history.query(args)
    }

    /// Tracked paths (`git ls-files`) that pass the configured file filter.
    pub fn tracked_files(&self) -> Result<Vec<String>> {
        let raw = self.query(&["ls-files"])?;
        Ok(self
            .options
            .file_filter
            .apply(parse::lines(&raw))
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}
