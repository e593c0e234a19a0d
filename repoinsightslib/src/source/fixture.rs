//! In-memory sources for collector tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::InsightsError;
use crate::Result;

use super::files::FileReader;
use super::history::HistorySource;

/// History source answering from canned outputs keyed by the joined argument list.
#[derive(Debug, Default)]
pub struct FixtureHistory {
    responses: HashMap<String, std::result::Result<String, String>>,
}

impl FixtureHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `args` (space-joined) with `output`.
    pub fn with(mut self, args: &str, output: &str) -> Self {
        self.responses
            .insert(args.to_string(), Ok(output.trim().to_string()));
        self
    }

    /// Fail `args` (space-joined) with `message`.
    pub fn failing(mut self, args: &str, message: &str) -> Self {
        self.responses
            .insert(args.to_string(), Err(message.to_string()));
        self
    }
}

impl HistorySource for FixtureHistory {
    fn query(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        match self.responses.get(&command) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(message)) => Err(InsightsError::Query {
                command,
                message: message.clone(),
            }),
            None => Err(InsightsError::Query {
                message: "no fixture for query".to_string(),
                command,
            }),
        }
    }
}

/// File reader answering from an in-memory map.
#[derive(Debug, Default)]
pub struct FixtureReader {
    files: HashMap<PathBuf, String>,
}

impl FixtureReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }
}

impl FileReader for FixtureReader {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| InsightsError::FileRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no fixture"),
            })
    }
}
