//! Commit histograms over time: month, ISO week, day of week, hour of day.

use crate::data::parse::{count_keys, count_keys_sorted, parse_int_or_zero};
use crate::data::stats::{DayCount, HourCount, MonthCount, WeekCount};
use crate::Result;

use super::Sources;

/// Day labels indexed by ISO weekday number minus one.
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Commits per `YYYY-MM`, sorted by month.
pub fn collect_by_month(sources: &Sources<'_>) -> Result<Vec<MonthCount>> {
    let raw = sources.query(&["log", "--format=%ad", "--date=format:%Y-%m"])?;
    Ok(months_from_lines(&raw))
}

/// Commits per ISO week `YYYY-Www`, sorted by week.
pub fn collect_by_week(sources: &Sources<'_>) -> Result<Vec<WeekCount>> {
    let raw = sources.query(&["log", "--format=%ad", "--date=format:%Y-W%V"])?;
    Ok(weeks_from_lines(&raw))
}

/// Commits per day of week, always seven buckets from Monday.
pub fn collect_by_day_of_week(sources: &Sources<'_>) -> Result<Vec<DayCount>> {
    let raw = sources.query(&["log", "--format=%ad", "--date=format:%u"])?;
    Ok(weekdays_from_lines(&raw))
}

/// Commits per hour of day, always 24 zero-filled buckets.
pub fn collect_by_hour(sources: &Sources<'_>) -> Result<Vec<HourCount>> {
    let raw = sources.query(&["log", "--format=%ad", "--date=format:%H"])?;
    Ok(hours_from_lines(&raw))
}

pub fn months_from_lines(raw: &str) -> Vec<MonthCount> {
    count_keys_sorted(raw)
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}

pub fn weeks_from_lines(raw: &str) -> Vec<WeekCount> {
    count_keys_sorted(raw)
        .into_iter()
        .map(|(week, count)| WeekCount { week, count })
        .collect()
}

/// Lines are ISO weekday numbers (1 = Monday). Anything else is ignored.
pub fn weekdays_from_lines(raw: &str) -> Vec<DayCount> {
    let mut counts = [0u64; 7];
    for (key, count) in count_keys(raw) {
        let day = parse_int_or_zero(&key) as usize;
        if (1..=7).contains(&day) {
            counts[day - 1] += count;
        }
    }

    WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(day, count)| DayCount {
            day: day.to_string(),
            count,
        })
        .collect()
}

/// Lines are two-digit hours. Keys outside `00`..`23` are ignored.
pub fn hours_from_lines(raw: &str) -> Vec<HourCount> {
    let counts = count_keys(raw);
    (0..24)
        .map(|h| {
            let hour = format!("{:02}", h);
            let count = counts
                .iter()
                .find(|(key, _)| *key == hour)
                .map_or(0, |(_, c)| *c);
            HourCount { hour, count }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_sorted_and_sparse() {
        let months = months_from_lines("2024-03\n2024-01\n2024-03\n2023-12");

        assert_eq!(
            months,
            vec![
                MonthCount {
                    month: "2023-12".to_string(),
                    count: 1
                },
                MonthCount {
                    month: "2024-01".to_string(),
                    count: 1
                },
                MonthCount {
                    month: "2024-03".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_weeks_sorted() {
        let weeks = weeks_from_lines("2024-W02\n2024-W01\n2024-W02");

        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].week, "2024-W01");
        assert_eq!(weeks[1].count, 2);
    }

    #[test]
    fn test_weekdays_fixed_domain() {
        let days = weekdays_from_lines("1\n1\n7\n9\nx");

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].day, "Mon");
        assert_eq!(days[0].count, 2);
        assert_eq!(days[6].day, "Sun");
        assert_eq!(days[6].count, 1);
        assert_eq!(days.iter().map(|d| d.count).sum::<u64>(), 3);
    }

    #[test]
    fn test_hours_zero_filled() {
        let hours = hours_from_lines("09\n23\n09\n");

        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0].hour, "00");
        assert_eq!(hours[0].count, 0);
        assert_eq!(hours[9].count, 2);
        assert_eq!(hours[23].count, 1);
    }

    #[test]
    fn test_empty_history() {
        assert!(months_from_lines("").is_empty());
        assert!(weeks_from_lines("").is_empty());
        assert!(weekdays_from_lines("").iter().all(|d| d.count == 0));
        assert!(hours_from_lines("").iter().all(|h| h.count == 0));
    }
}
