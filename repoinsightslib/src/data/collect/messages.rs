//! Commit subject classification.
//!
//! Subjects are lower-cased, trimmed, and run through [`RULES`] top to bottom;
//! the first rule whose pattern matches decides the category. A subject no
//! rule matches is [`Category::Other`]. The rule order is the precedence
//! order, so e.g. "fix flaky test" is a bug fix rather than testing.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::parse::lines;
use crate::data::stats::MessagePattern;
use crate::Result;

use super::Sources;

/// Closed set of message categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Features,
    BugFixes,
    Improvements,
    CodeReview,
    Refactoring,
    Performance,
    Testing,
    Docs,
    Security,
    Merges,
    Other,
}

impl Category {
    /// Every category, in the order ties are reported.
    pub const ALL: [Category; 11] = [
        Category::Features,
        Category::BugFixes,
        Category::Improvements,
        Category::CodeReview,
        Category::Refactoring,
        Category::Performance,
        Category::Testing,
        Category::Docs,
        Category::Security,
        Category::Merges,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Features => "Features",
            Category::BugFixes => "Bug Fixes",
            Category::Improvements => "Improvements",
            Category::CodeReview => "Code Review",
            Category::Refactoring => "Refactoring",
            Category::Performance => "Performance",
            Category::Testing => "Testing",
            Category::Docs => "Docs",
            Category::Security => "Security",
            Category::Merges => "Merges",
            Category::Other => "Other",
        }
    }

    fn index(self) -> usize {
        Category::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or(Category::ALL.len() - 1)
    }
}

/// One classification rule.
pub struct Rule {
    pub category: Category,
    pub pattern: Regex,
}

/// Rules in precedence order, applied to lower-cased trimmed subjects.
const RULE_TABLE: &[(Category, &str)] = &[
    (Category::Merges, r"^merge"),
    (Category::CodeReview, r"^cr\b|^cr\s"),
    (
        Category::BugFixes,
        r"\bfix(ed|es|ing)?\b|\bbug\b|\bresolve[ds]?\b|\bpatch\b|\bcorrect(ed)?\b|\bhotfix\b",
    ),
    (
        Category::Features,
        r"^add(ed|ing|s)?\b|\bcreate[ds]?\b|\bimplement(ed)?\b|\bnew\b|\bintroduc|\bbuilt?\b|^feat[(:]",
    ),
    (
        Category::Performance,
        r"\boptimiz|\bperformance\b|\bspeed\b|\bfast(er)?\b|\bcach(e|ing)\b|^perf[(:]",
    ),
    (
        Category::Improvements,
        r"\bimprov(e|ed|ing|ement)\b|\benhance[ds]?\b|\bredesign|\bstreamline|\bpolish|\bbetter\b|\bupgrade[ds]?\b|\bmodularize|\bupdate[ds]?\b",
    ),
    (
        Category::Refactoring,
        r"\brefactor|\brestructur|\breorganiz|\bclean(ed|up| up)?\b|\bsimplif|\bconsolidat|\bremov(e|ed|ing)\b",
    ),
    (
        Category::Security,
        r"\bsecur(ity|e)?\b|\bauth\b|\bpermission|\bvalidat",
    ),
    (Category::Testing, r"\btest(s|ing)?\b|\bspec\b|\be2e\b|\buat\b"),
    (Category::Docs, r"\bdoc(s|umentation)?\b|\breadme\b|\bchangelog\b"),
    (
        Category::Improvements,
        r"\blint\b|\bformat|\bbump\b|\bdepend|\bversion\b",
    ),
];

/// Compiled classification rules. Word boundaries are ASCII-only: any
/// non-ASCII letter next to a keyword counts as a boundary.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    RULE_TABLE
        .iter()
        .map(|(category, pattern)| Rule {
            category: *category,
            pattern: Regex::new(&pattern.replace(r"\b", r"(?-u:\b)"))
                .expect("valid classification regex"),
        })
        .collect()
});

/// Classify a single commit subject.
pub fn classify(subject: &str) -> Category {
    let subject = subject.trim().to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.pattern.is_match(&subject))
        .map_or(Category::Other, |rule| rule.category)
}

/// Category counts for the subjects of every commit on the current branch.
pub fn collect(sources: &Sources<'_>) -> Result<Vec<MessagePattern>> {
    let raw = sources.query(&["log", "--format=%s"])?;
    Ok(patterns(lines(&raw)))
}

/// Count categories, drop empty ones, most common first.
pub fn patterns<'a>(subjects: impl IntoIterator<Item = &'a str>) -> Vec<MessagePattern> {
    let mut counts = [0u64; Category::ALL.len()];
    for subject in subjects {
        if subject.is_empty() {
            continue;
        }
        counts[classify(subject).index()] += 1;
    }

    let mut result: Vec<MessagePattern> = Category::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(category, count)| MessagePattern {
            category: category.label().to_string(),
            count,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result
}
