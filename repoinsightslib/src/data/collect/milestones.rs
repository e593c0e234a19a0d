//! Milestones: merged pull requests, labelled from their branch names.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::parse::{lines, parse_int_or_zero};
use crate::data::stats::Milestone;
use crate::Result;

use super::Sources;

/// Marker a merge subject must contain to count as a pull request merge.
pub const PULL_REQUEST_MARKER: &str = "pull request";

static BRANCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"from\s+\S+/(\S+)").expect("valid regex"));
static PR_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\d+)").expect("valid regex"));

/// Capitalization fixes applied after title-casing, in order.
const ACRONYMS: &[(&str, &str)] = &[
    (r"\bV(\d)", "v$1"),
    (r"\bCve\b", "CVE"),
    (r"\bE2e\b", "E2E"),
    (r"\bUx\b", "UX"),
    (r"\bAws\b", "AWS"),
    (r"\bS3\b", "S3"),
    (r"\bApi\b", "API"),
    (r"\bLlm\b", "LLM"),
    (r"\bAi\b", "AI"),
];

static ACRONYM_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    ACRONYMS
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("valid acronym regex"),
                *replacement,
            )
        })
        .collect()
});

pub fn collect(sources: &Sources<'_>) -> Result<Vec<Milestone>> {
    let raw = sources.query(&[
        "log",
        "--merges",
        "--format=%ad%x09%s",
        "--date=format:%Y-%m-%d",
    ])?;
    Ok(from_merge_lines(&raw))
}

/// Parse `<date>\t<subject>` merge lines into milestones.
pub fn from_merge_lines(raw: &str) -> Vec<Milestone> {
    lines(raw)
        .filter(|line| line.contains(PULL_REQUEST_MARKER))
        .filter_map(parse_merge_line)
        .collect()
}

fn parse_merge_line(line: &str) -> Option<Milestone> {
    let (date, subject) = line.split_once('\t').unwrap_or((line, ""));

    let branch = BRANCH
        .captures(subject)
        .map_or(String::new(), |c| c[1].to_string());
    let pull_request_number = PR_NUMBER
        .captures(subject)
        .map_or(0, |c| parse_int_or_zero(&c[1]));
    let label = humanize_branch(&branch);

    if label.is_empty() || label.to_lowercase().contains("docstring") {
        return None;
    }

    Some(Milestone {
        date: date.to_string(),
        pull_request_number,
        branch_name: branch,
        human_label: label,
    })
}

/// Turn a branch name into a title: separators become spaces, each word is
/// capitalized, then known acronyms are fixed up.
pub fn humanize_branch(branch: &str) -> String {
    let spaced = branch.replace(['-', '_'], " ");

    let mut titled = String::with_capacity(spaced.len());
    let mut prev_is_word = false;
    for c in spaced.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            titled.extend(c.to_uppercase());
        } else {
            titled.push(c);
        }
        prev_is_word = is_word;
    }

    ACRONYM_RULES
        .iter()
        .fold(titled, |label, (pattern, replacement)| {
            pattern.replace_all(&label, *replacement).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_merge() {
        let raw = "2024-05-01\tMerge pull request #42 from octo/feature/add-api-v2-client\n\
                   2024-04-30\tMerge branch 'main' into dev\n\
                   2024-04-29\tMerge pull request #7 from octo/fix_e2e-ux";

        let milestones = from_merge_lines(raw);

        assert_eq!(milestones.len(), 2);
        assert_eq!(milestones[0].date, "2024-05-01");
        assert_eq!(milestones[0].pull_request_number, 42);
        assert_eq!(milestones[0].branch_name, "add-api-v2-client");
        assert_eq!(milestones[0].human_label, "Add API v2 Client");
        assert_eq!(milestones[1].pull_request_number, 7);
        assert_eq!(milestones[1].human_label, "Fix E2E UX");
    }

    #[test]
    fn test_unresolvable_label_is_dropped() {
        let raw = "2024-05-01\tMerge pull request #3 without a source branch\n\
                   2024-05-02\tMerge pull request #4 from octo/add-docstrings";

        assert!(from_merge_lines(raw).is_empty());
    }

    #[test]
    fn test_missing_pr_number_defaults_to_zero() {
        let milestones = from_merge_lines("2024-01-01\tMerge pull request from octo/llm-ai-tools");

        assert_eq!(milestones[0].pull_request_number, 0);
        assert_eq!(milestones[0].human_label, "LLM AI Tools");
    }

    #[test]
    fn test_humanize_branch() {
        assert_eq!(humanize_branch("aws-s3-upload"), "AWS S3 Upload");
        assert_eq!(humanize_branch("patch-cve_2024"), "Patch CVE 2024");
        assert_eq!(humanize_branch("v3-release"), "v3 Release");
        assert_eq!(humanize_branch("already Title"), "Already Title");
        assert_eq!(humanize_branch("api-apis"), "API Apis");
        assert_eq!(humanize_branch(""), "");
    }

    #[test]
    fn test_empty_history() {
        assert!(from_merge_lines("").is_empty());
    }
}
