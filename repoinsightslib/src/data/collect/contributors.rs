//! Contributor ranking from `git shortlog`.

use crate::data::parse::parse_shortlog;
use crate::data::stats::ContributorRecord;
use crate::Result;

use super::Sources;

/// Contributors across all refs, most commits first.
pub fn collect(sources: &Sources<'_>) -> Result<Vec<ContributorRecord>> {
    let raw = sources.query(&["shortlog", "-sne", "--all"])?;
    Ok(rank(parse_shortlog(&raw)))
}

/// Sort by commit count, descending. Ties keep their input order.
pub fn rank(mut contributors: Vec<ContributorRecord>) -> Vec<ContributorRecord> {
    contributors.sort_by(|a, b| b.commits.cmp(&a.commits));
    contributors
}
