//! Authorship-source attribution: how many commits came from known
//! automation identities rather than people.
//!
//! Matches are counted per identity and subtracted from the total without
//! checking for overlap, so a commit whose author matches two patterns is
//! subtracted twice. The human count saturates at zero.

use crate::data::parse::{count_lines, parse_int_or_zero};
use crate::data::stats::{AttributionSummary, SourceCount};
use crate::Result;

use super::Sources;

/// A known automation identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// Name reported in the breakdown
    pub name: &'static str,
    /// Substring matched against the author name (`git log --author`)
    pub author_pattern: &'static str,
    /// Search every ref instead of only the current branch
    pub all_branches: bool,
}

/// Identities checked, in reporting order.
pub const IDENTITIES: &[Identity] = &[
    Identity {
        name: "Claude",
        author_pattern: "Claude",
        all_branches: false,
    },
    Identity {
        name: "Cursor",
        author_pattern: "Cursor",
        all_branches: true,
    },
    Identity {
        name: "Copilot",
        author_pattern: "copilot",
        all_branches: false,
    },
    Identity {
        name: "CodeRabbit",
        author_pattern: "coderabbitai",
        all_branches: false,
    },
    Identity {
        name: "Dependabot",
        author_pattern: "dependabot",
        all_branches: false,
    },
    Identity {
        name: "Renovate",
        author_pattern: "renovate",
        all_branches: false,
    },
    Identity {
        name: "GitHub Actions",
        author_pattern: "github-actions",
        all_branches: false,
    },
];

/// Trailer searched for to count co-authored commits.
pub const CO_AUTHOR_TRAILER: &str = "Co-Authored-By";

impl Identity {
    /// `git log` arguments listing this identity's commits one per line.
    pub fn query_args(&self) -> Vec<String> {
        let mut args = vec!["log".to_string()];
        if self.all_branches {
            args.push("--all".to_string());
        }
        args.push(format!("--author={}", self.author_pattern));
        args.push("--oneline".to_string());
        args
    }
}

pub fn collect(sources: &Sources<'_>) -> Result<AttributionSummary> {
    let total = parse_int_or_zero(&sources.query(&["rev-list", "--count", "HEAD"])?);

    let mut matches = Vec::with_capacity(IDENTITIES.len());
    for identity in IDENTITIES {
        let args = identity.query_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let count = count_lines(&sources.query(&args)?);
        matches.push((identity.name, count));
    }

    let grep = format!("--grep={}", CO_AUTHOR_TRAILER);
    let co_authored = count_lines(&sources.query(&["log", "--all", &grep, "--oneline"])?);

    Ok(summarize(total, &matches, co_authored))
}

/// Assemble the summary from per-identity match counts.
pub fn summarize(total: u64, matches: &[(&str, u64)], co_authored: u64) -> AttributionSummary {
    let breakdown: Vec<SourceCount> = matches
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(name, count)| SourceCount {
            source: name.to_string(),
            commit_count: *count,
        })
        .collect();
    let automated: u64 = breakdown.iter().map(|s| s.commit_count).sum();

    AttributionSummary {
        total_commits: total,
        human_commits: total.saturating_sub(automated),
        breakdown,
        co_authored_count: co_authored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CollectOptions;
    use crate::source::fixture::{FixtureHistory, FixtureReader};
    use std::path::Path;

    fn history_with(total: &str, dependabot: &str, co_authored: &str) -> FixtureHistory {
        let mut history = FixtureHistory::new()
            .with("rev-list --count HEAD", total)
            .with("log --all --grep=Co-Authored-By --oneline", co_authored);
        for identity in IDENTITIES {
            let output = if identity.name == "Dependabot" {
                dependabot
            } else {
                ""
            };
            history = history.with(&identity.query_args().join(" "), output);
        }
        history
    }

    #[test]
    fn test_dependabot_scenario() {
        let history = history_with("10", "a1 bump x\nb2 bump y\nc3 bump z", "");
        let files = FixtureReader::new();
        let options = CollectOptions::new();
        let sources = Sources::new(&history, &files, Path::new("/repo"), &options);

        let summary = collect(&sources).unwrap();

        assert_eq!(summary.total_commits, 10);
        assert_eq!(summary.human_commits, 7);
        assert_eq!(
            summary.breakdown,
            vec![SourceCount {
                source: "Dependabot".to_string(),
                commit_count: 3
            }]
        );
        assert_eq!(summary.co_authored_count, 0);
    }

    #[test]
    fn test_co_authorship_is_independent() {
        let history = history_with("5", "", "a1 pair work\nb2 more pairing");
        let files = FixtureReader::new();
        let options = CollectOptions::new();
        let sources = Sources::new(&history, &files, Path::new("/repo"), &options);

        let summary = collect(&sources).unwrap();

        assert_eq!(summary.human_commits, 5);
        assert!(summary.breakdown.is_empty());
        assert_eq!(summary.co_authored_count, 2);
    }

    #[test]
    fn test_query_args() {
        let cursor = IDENTITIES.iter().find(|i| i.name == "Cursor").unwrap();
        assert_eq!(
            cursor.query_args(),
            vec!["log", "--all", "--author=Cursor", "--oneline"]
        );

        let claude = IDENTITIES.iter().find(|i| i.name == "Claude").unwrap();
        assert_eq!(
            claude.query_args(),
            vec!["log", "--author=Claude", "--oneline"]
        );
    }

    #[test]
    fn test_human_count_saturates() {
        let summary = summarize(3, &[("Claude", 2), ("Cursor", 2)], 0);

        assert_eq!(summary.human_commits, 0);
        assert_eq!(summary.breakdown.len(), 2);
    }

    #[test]
    fn test_human_plus_automation_equals_total() {
        let summary = summarize(20, &[("Claude", 4), ("Renovate", 0), ("Dependabot", 1)], 3);
        let automated: u64 = summary.breakdown.iter().map(|s| s.commit_count).sum();

        assert_eq!(summary.human_commits + automated, summary.total_commits);
        assert_eq!(summary.breakdown.len(), 2);
    }

    #[test]
    fn test_failing_identity_query_fails_section() {
        let history = FixtureHistory::new().with("rev-list --count HEAD", "4");
        let files = FixtureReader::new();
        let options = CollectOptions::new();
        let sources = Sources::new(&history, &files, Path::new("/repo"), &options);

        assert!(collect(&sources).is_err());
    }
}
