//! Fun facts derived from the overview.

use chrono::NaiveDate;

use crate::data::stats::{FunFacts, OverviewSummary};

const LINES_PER_PAGE: f64 = 50.0;
const CHARS_PER_WORD: f64 = 5.0;
const WORDS_PER_NOVEL: f64 = 80_000.0;
/// One word per second.
const WORDS_PER_HOUR: f64 = 3_600.0;

/// Compute fun facts. Without an overview every figure is zero.
pub fn collect(overview: Option<&OverviewSummary>) -> FunFacts {
    let Some(overview) = overview else {
        return FunFacts::default();
    };

    let lines = overview.total_lines_of_code as f64;
    let words = (overview.total_characters as f64 / CHARS_PER_WORD).round();

    FunFacts {
        printed_pages: (lines / LINES_PER_PAGE).round() as u64,
        total_words: words as u64,
        novel_equivalent: (words / WORDS_PER_NOVEL * 10.0).round() / 10.0,
        typing_hours: (words / WORDS_PER_HOUR).round() as u64,
        avg_commit_size: match overview.total_commits {
            0 => 0,
            commits => (lines / commits as f64).round() as u64,
        },
        lines_per_day: (lines / project_days(overview) as f64).round() as u64,
    }
}

/// Days between the first and latest commit, at least 1.
fn project_days(overview: &OverviewSummary) -> i64 {
    let parse = |date: &str| NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok();
    match (parse(&overview.first_commit), parse(&overview.latest_commit)) {
        (Some(first), Some(latest)) => (latest - first).num_days().max(1),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overview(lines: u64, chars: u64, commits: u64, first: &str, latest: &str) -> OverviewSummary {
        OverviewSummary {
            total_lines_of_code: lines,
            total_characters: chars,
            total_commits: commits,
            first_commit: first.to_string(),
            latest_commit: latest.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_fun_facts() {
        let facts = collect(Some(&overview(10_000, 400_000, 200, "2024-01-01", "2024-01-11")));

        assert_eq!(facts.printed_pages, 200);
        assert_eq!(facts.total_words, 80_000);
        assert_eq!(facts.novel_equivalent, 1.0);
        assert_eq!(facts.typing_hours, 22);
        assert_eq!(facts.avg_commit_size, 50);
        assert_eq!(facts.lines_per_day, 1_000);
    }

    #[test]
    fn test_novel_equivalent_one_decimal() {
        let facts = collect(Some(&overview(0, 1_000_000, 0, "", "")));

        assert_eq!(facts.total_words, 200_000);
        assert_eq!(facts.novel_equivalent, 2.5);
    }

    #[test]
    fn test_without_overview() {
        assert_eq!(collect(None), FunFacts::default());
    }

    #[test]
    fn test_zero_commits_and_same_day() {
        let facts = collect(Some(&overview(120, 0, 0, "2024-05-05", "2024-05-05")));

        assert_eq!(facts.avg_commit_size, 0);
        assert_eq!(facts.lines_per_day, 120);
    }

    #[test]
    fn test_unparseable_dates_use_one_day() {
        let facts = collect(Some(&overview(90, 0, 3, "garbage", "2024-05-05")));

        assert_eq!(facts.lines_per_day, 90);
        assert_eq!(facts.avg_commit_size, 30);
    }
}
