//! Terminal rendering for CLI output

use console::Style;
use repoinsightslib::{ProgressStatus, Section, SummaryTable, TableRow};

/// Width of the label column.
const LABEL_WIDTH: usize = 24;
/// Widest value shown before truncation.
const MAX_VALUE_WIDTH: usize = 60;

/// Truncate text to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len {
        let tail: String = name.chars().skip(len - max_len + 2).collect();
        format!("..{}", tail)
    } else {
        name.to_string()
    }
}

fn render_row(row: &TableRow, value_width: usize) -> String {
    let label = truncate_name(&row.label, LABEL_WIDTH - 2);
    let values: Vec<String> = row
        .values
        .iter()
        .map(|v| {
            format!(
                "{:<width$}",
                truncate_name(v, MAX_VALUE_WIDTH),
                width = value_width
            )
        })
        .collect();
    format!("{:<width$}{}", label, values.join(" "), width = LABEL_WIDTH)
        .trim_end()
        .to_string()
}

/// Render a summary table to a string.
pub fn render_summary_table(table: &SummaryTable) -> String {
    let header_style = Style::new().bold();
    let dim = Style::new().dim();

    let value_width = table
        .rows
        .iter()
        .chain(std::iter::once(&table.footer))
        .flat_map(|r| r.values.iter())
        .map(|v| v.chars().count().min(MAX_VALUE_WIDTH))
        .max()
        .unwrap_or(0)
        .max(table.headers.get(1).map_or(0, |h| h.len()));
    let separator = "-".repeat(LABEL_WIDTH + value_width);

    let mut out = String::new();
    if let Some(title) = &table.title {
        out.push_str(&format!("{}\n\n", header_style.apply_to(title)));
    }

    let header = TableRow {
        label: table.headers.first().cloned().unwrap_or_default(),
        values: table.headers.iter().skip(1).cloned().collect(),
    };
    out.push_str(&format!(
        "{}\n",
        header_style.apply_to(render_row(&header, value_width))
    ));
    out.push_str(&format!("{}\n", separator));
    for row in &table.rows {
        out.push_str(&render_row(row, value_width));
        out.push('\n');
    }
    out.push_str(&format!("{}\n", separator));
    out.push_str(&render_row(&table.footer, value_width));
    out.push('\n');

    if let Some(legend) = &table.legend {
        out.push_str(&format!("{}\n", dim.apply_to(legend)));
    }
    out
}

/// One progress line for a section.
pub fn progress_line(section: Section, status: &ProgressStatus) -> Option<String> {
    match status {
        ProgressStatus::Start => None,
        ProgressStatus::Done => Some(format!(
            "  {} {}",
            Style::new().green().apply_to("done "),
            section
        )),
        ProgressStatus::Error(message) => Some(format!(
            "  {} {}: {}",
            Style::new().red().apply_to("error"),
            section,
            message
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SummaryTable {
        SummaryTable {
            title: Some("demo".to_string()),
            headers: vec!["Metric".to_string(), "Value".to_string()],
            rows: vec![TableRow {
                label: "Commits".to_string(),
                values: vec!["42".to_string()],
            }],
            footer: TableRow {
                label: "Sections".to_string(),
                values: vec!["20 of 20 collected".to_string()],
            },
            legend: None,
        }
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short", 10), "short");
        assert_eq!(truncate_name("src/very/long/path.rs", 10), "../path.rs");
    }

    #[test]
    fn test_render_summary_table() {
        console::set_colors_enabled(false);
        let out = render_summary_table(&sample_table());

        assert!(out.starts_with("demo\n"));
        assert!(out.contains("Metric"));
        assert!(out.contains("Commits"));
        assert!(out.contains("42"));
        assert!(out.contains("20 of 20 collected"));
    }

    #[test]
    fn test_progress_line() {
        console::set_colors_enabled(false);

        assert_eq!(progress_line(Section::Overview, &ProgressStatus::Start), None);
        assert_eq!(
            progress_line(Section::Streaks, &ProgressStatus::Done).unwrap(),
            "  done  streaks"
        );
        assert_eq!(
            progress_line(
                Section::Milestones,
                &ProgressStatus::Error("boom".to_string())
            )
            .unwrap(),
            "  error milestones: boom"
        );
    }
}
