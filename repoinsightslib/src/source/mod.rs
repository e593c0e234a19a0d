//! Source access: where the raw text comes from.
//!
//! This module handles the first stage of the pipeline - obtaining raw text
//! about the repository. It provides:
//!
//! - **History queries**: `HistorySource` and the `git`-backed `GitCli`
//! - **File reading**: `FileReader` and the disk-backed `FsReader`
//! - **Path filtering**: include/exclude globs and source-file detection
//!
//! ## Example
//!
//! ```rust,ignore
//! use repoinsightslib::source::{FsReader, GitCli, HistorySource};
//!
//! let git = GitCli::discover(".")?;
//! let reader = FsReader::new(git.root());
//! let subjects = git.query(&["log", "--format=%s"])?;
//! ```

pub mod files;
pub mod filter;
pub mod history;

#[cfg(test)]
pub(crate) mod fixture;

pub use files::{char_count, line_count, FileReader, FsReader};
pub use filter::{extension, file_name, is_source_file, FilterConfig, SOURCE_EXTENSIONS};
pub use history::{discover_root, GitCli, HistorySource, DEFAULT_MAX_QUERY_BYTES};
