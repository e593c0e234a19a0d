//! Work patterns: weekday vs weekend, and which part of the day commits land in.

use crate::data::parse::lines;
use crate::data::stats::WorkPatterns;
use crate::Result;

use super::Sources;

/// A time-of-day window, `start..end` in local hours of the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub label: &'static str,
    pub start: u32,
    pub end: u32,
}

/// Named windows in tie-break order. Hours outside every window count as
/// night owl.
pub const WINDOWS: [Window; 3] = [
    Window {
        label: "Early Bird (5-9am)",
        start: 5,
        end: 9,
    },
    Window {
        label: "Business Hours (9-5pm)",
        start: 9,
        end: 17,
    },
    Window {
        label: "Evening (5-10pm)",
        start: 17,
        end: 22,
    },
];

pub const NIGHT_OWL: &str = "Night Owl (10pm-5am)";

/// ISO weekday numbers at or above this are the weekend.
const FIRST_WEEKEND_DAY: u32 = 6;

pub fn collect(sources: &Sources<'_>) -> Result<WorkPatterns> {
    let raw = sources.query(&["log", "--format=%ad", "--date=format:%u_%H"])?;
    Ok(summarize(lines(&raw)))
}

/// Tally `<iso weekday>_<hour>` lines.
pub fn summarize<'a>(stamps: impl IntoIterator<Item = &'a str>) -> WorkPatterns {
    let mut patterns = WorkPatterns::default();
    // early bird, business, evening, night owl
    let mut windows = [0u64; 4];

    for stamp in stamps {
        let Some((day, hour)) = parse_stamp(stamp) else {
            continue;
        };
        if day >= FIRST_WEEKEND_DAY {
            patterns.weekend += 1;
        } else {
            patterns.weekday += 1;
        }
        let slot = WINDOWS
            .iter()
            .position(|w| (w.start..w.end).contains(&hour))
            .unwrap_or(WINDOWS.len());
        windows[slot] += 1;
    }

    let total = patterns.weekday + patterns.weekend;
    if total > 0 {
        patterns.weekend_pct = (patterns.weekend as f64 / total as f64 * 100.0).round() as u64;
    }
    patterns.early_bird = windows[0];
    patterns.business_hrs = windows[1];
    patterns.evening = windows[2];
    patterns.night_owl = windows[3];
    patterns.peak_window = peak_label(&windows).to_string();
    patterns
}

fn parse_stamp(stamp: &str) -> Option<(u32, u32)> {
    let (day, hour) = stamp.trim().split_once('_')?;
    let day: u32 = day.parse().ok()?;
    let hour: u32 = hour.parse().ok()?;
    ((1..=7).contains(&day) && hour < 24).then_some((day, hour))
}

/// Label of the fullest window; the earlier window wins a tie.
fn peak_label(counts: &[u64; 4]) -> &'static str {
    let labels = [WINDOWS[0].label, WINDOWS[1].label, WINDOWS[2].label, NIGHT_OWL];
    let mut best = 0;
    for (i, count) in counts.iter().enumerate() {
        if *count > counts[best] {
            best = i;
        }
    }
    labels[best]
}
