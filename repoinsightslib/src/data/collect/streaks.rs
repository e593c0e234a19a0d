//! Activity streaks: longest run of consecutive commit days, busiest day and
//! activity rate.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::data::parse::lines;
use crate::data::stats::{BusiestDay, Streak, StreakSummary};
use crate::Result;

use super::Sources;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn collect(sources: &Sources<'_>) -> Result<StreakSummary> {
    let raw = sources.query(&["log", "--format=%ad", "--date=format:%Y-%m-%d"])?;
    Ok(summarize(lines(&raw)))
}

/// Build the streak summary from one `YYYY-MM-DD` date per commit.
///
/// Dates may repeat and come in any order. Lines that are not dates are
/// ignored.
pub fn summarize<'a>(dates: impl IntoIterator<Item = &'a str>) -> StreakSummary {
    let mut days: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut per_day: Vec<(NaiveDate, u64)> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for raw in dates {
        let Ok(date) = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) else {
            continue;
        };
        days.insert(date);
        match index.get(&date) {
            Some(&i) => per_day[i].1 += 1,
            None => {
                index.insert(date, per_day.len());
                per_day.push((date, 1));
            }
        }
    }

    let (Some(&first), Some(&last)) = (days.first(), days.last()) else {
        return StreakSummary::default();
    };

    let active_days = days.len() as u64;
    let total_days = (last - first).num_days() as u64 + 1;

    StreakSummary {
        longest_streak: longest_streak(&days),
        busiest_day: busiest_day(&per_day),
        active_days,
        total_days,
        activity_rate_percent: (active_days as f64 / total_days as f64 * 100.0).round() as u64,
    }
}

/// Longest run of consecutive days. Earlier runs win ties.
fn longest_streak(days: &BTreeSet<NaiveDate>) -> Streak {
    let mut best: Option<(u64, NaiveDate, NaiveDate)> = None;
    let mut current: Option<(u64, NaiveDate, NaiveDate)> = None;

    for &day in days {
        current = match current {
            Some((len, start, end)) if (day - end).num_days() == 1 => Some((len + 1, start, day)),
            _ => {
                if let Some(run) = current {
                    if best.is_none_or(|b| run.0 > b.0) {
                        best = Some(run);
                    }
                }
                Some((1, day, day))
            }
        };
    }
    if let Some(run) = current {
        if best.is_none_or(|b| run.0 > b.0) {
            best = Some(run);
        }
    }

    best.map_or_else(Streak::default, |(days, start, end)| Streak {
        days,
        start: start.format(DATE_FORMAT).to_string(),
        end: end.format(DATE_FORMAT).to_string(),
    })
}

/// Day with the most commits. Ties go to the day seen first in log order.
fn busiest_day(per_day: &[(NaiveDate, u64)]) -> BusiestDay {
    per_day
        .iter()
        .fold(None::<&(NaiveDate, u64)>, |best, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        })
        .map_or_else(BusiestDay::default, |(date, commits)| BusiestDay {
            date: date.format(DATE_FORMAT).to_string(),
            commits: *commits,
        })
}
