//! Monthly churn and cumulative code growth from `git log --numstat`.

use crate::data::parse::{parse_numstat_months, MONTH_MARKER};
use crate::data::stats::{ChurnBucket, CodeGrowthPoint};
use crate::Result;

use super::Sources;

fn month_tagged_numstat(sources: &Sources<'_>) -> Result<String> {
    let format = format!("--format={}%ad", MONTH_MARKER);
    sources.query(&["log", "--numstat", &format, "--date=format:%Y-%m"])
}

/// Lines added and deleted per month, sorted by month.
pub fn collect_churn(sources: &Sources<'_>) -> Result<Vec<ChurnBucket>> {
    Ok(parse_numstat_months(&month_tagged_numstat(sources)?))
}

/// Running net line total per month, sorted by month.
pub fn collect_growth(sources: &Sources<'_>) -> Result<Vec<CodeGrowthPoint>> {
    Ok(growth(&parse_numstat_months(&month_tagged_numstat(sources)?)))
}

/// Cumulative `added - deleted` over buckets already sorted by month.
pub fn growth(buckets: &[ChurnBucket]) -> Vec<CodeGrowthPoint> {
    buckets
        .iter()
        .scan(0i64, |total, bucket| {
            *total += bucket.net();
            Some(CodeGrowthPoint {
                month: bucket.month.clone(),
                net_lines: *total,
            })
        })
        .collect()
}
