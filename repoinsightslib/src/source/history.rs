//! History query adapter.
//!
//! Every collector asks for repository history through [`HistorySource`]:
//! one call, one fully materialized text blob. The production implementation,
//! [`GitCli`], shells out to `git` inside an explicitly configured work tree
//! root, so nothing depends on the process working directory.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::error::InsightsError;
use crate::Result;

/// Default cap on the stdout of a single query (50 MiB).
pub const DEFAULT_MAX_QUERY_BYTES: usize = 50 * 1024 * 1024;

/// Something that can answer history queries with raw text.
pub trait HistorySource {
    /// Run a query (git arguments, without the leading `git`) and return its
    /// standard output trimmed of leading and trailing whitespace.
    fn query(&self, args: &[&str]) -> Result<String>;
}

impl<T: HistorySource + ?Sized> HistorySource for &T {
    fn query(&self, args: &[&str]) -> Result<String> {
        (**self).query(args)
    }
}

/// History source backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
    max_output: usize,
}

impl GitCli {
    /// Create an adapter rooted at an already-known work tree root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_output: DEFAULT_MAX_QUERY_BYTES,
        }
    }

    /// Discover the work tree root containing `path` and create an adapter for it.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(discover_root(path)?))
    }

    /// Set the maximum number of stdout bytes accepted from one query.
    pub fn max_output(mut self, bytes: usize) -> Self {
        self.max_output = bytes;
        self
    }

    /// The work tree root every query runs in.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl HistorySource for GitCli {
    fn query(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        debug!(root = %self.root.display(), "git {}", command);
        let failed = |message: String| InsightsError::Query {
            command: command.clone(),
            message,
        };

        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(e.to_string()))?;

        // stderr must be drained while stdout is read
        let stderr_reader = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });

        let mut stdout = Vec::new();
        let read = match child.stdout.take() {
            Some(pipe) => pipe
                .take(self.max_output as u64 + 1)
                .read_to_end(&mut stdout)
                .map(|_| ()),
            None => Ok(()),
        };

        if let Err(e) = read {
            let _ = child.kill();
            let _ = child.wait();
            return Err(failed(e.to_string()));
        }

        if stdout.len() > self.max_output {
            let _ = child.kill();
            let _ = child.wait();
            warn!("git {} exceeded the {} byte output limit", command, self.max_output);
            return Err(InsightsError::OutputTooLarge {
                command,
                limit: self.max_output,
            });
        }

        let status = child.wait().map_err(|e| failed(e.to_string()))?;
        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
            warn!("git {} exited with {}: {}", command, status, stderr);
            return Err(failed(if stderr.is_empty() {
                status.to_string()
            } else {
                stderr
            }));
        }

        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }
}

/// Find the root of the git work tree that contains `path`.
pub fn discover_root(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();

    let repo = gix::discover(path).map_err(|e| {
        debug!("repository discovery failed for {}: {}", path.display(), e);
        InsightsError::NotARepository(path.to_path_buf())
    })?;

    let root = repo
        .work_dir()
        .ok_or_else(|| InsightsError::NotARepository(path.to_path_buf()))?;

    Ok(std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()))
}
