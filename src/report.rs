use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{AlumniRecord, DistributionEntry, SummaryStats, SupportStatus};
use crate::view::TableView;

/// State chapters listed in the exported report.
pub const REPORT_STATE_LIMIT: usize = 15;

const PLACEHOLDER: &str = "N/A";

/// Thousands-separated count, e.g. `1,803`.
pub fn format_count(value: u32) -> String {
    let digits = value.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            output.push(',');
        }
        output.push(c);
    }
    output
}

fn format_percentage(entry: &DistributionEntry, precision: usize) -> String {
    entry
        .percentage
        .map(|p| format!(" ({p:.precision$}%)"))
        .unwrap_or_default()
}

fn batch_note(batch: &DistributionEntry) -> &'static str {
    if batch.count == 0 {
        " (no intake)"
    } else {
        ""
    }
}

pub fn build_report(
    stats: &SummaryStats,
    batches: &[DistributionEntry],
    states: &[DistributionEntry],
    generated_on: NaiveDate,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Alumni Dashboard Report");
    let _ = writeln!(output, "Generated on {}", generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary Statistics");
    let _ = writeln!(output, "- Total Alumni: {}", format_count(stats.total_alumni));
    let _ = writeln!(output, "- Total Batches: {}", stats.total_batches);
    let _ = writeln!(
        output,
        "- Supporting Mentoring: {}",
        format_count(stats.support_yes)
    );
    let _ = writeln!(output, "- Alumni State Chapters: {}", stats.states_represented);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Batch Distribution");

    if batches.is_empty() {
        let _ = writeln!(output, "No batch distribution available.");
    } else {
        for batch in batches {
            let _ = writeln!(
                output,
                "- {}: {} alumni{}",
                batch.label,
                format_count(batch.count),
                batch_note(batch)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Alumni State Chapters");

    if states.is_empty() {
        let _ = writeln!(output, "No state distribution available.");
    } else {
        for state in states.iter().take(REPORT_STATE_LIMIT) {
            let _ = writeln!(
                output,
                "- {}: {} alumni{}",
                state.label,
                format_count(state.count),
                format_percentage(state, 1)
            );
        }
    }

    output
}

pub fn render_summary(stats: &SummaryStats, work_statuses: &[DistributionEntry]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Total alumni:        {}", format_count(stats.total_alumni));
    let _ = writeln!(output, "Batches:             {}", stats.total_batches);
    let _ = writeln!(output, "States represented:  {}", stats.states_represented);
    let _ = writeln!(
        output,
        "Colleges:            {}",
        format_count(stats.colleges_represented)
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "Mentoring support:");
    for (status, count) in SupportStatus::ALL.iter().zip([
        stats.support_yes,
        stats.support_no,
        stats.support_unknown,
    ]) {
        let _ = writeln!(output, "  {:<8} {}", status.as_str(), format_count(count));
    }

    let _ = writeln!(output);
    output.push_str(&render_work_status(stats.work_status_categories, work_statuses));

    output
}

pub fn render_work_status(categories: u32, work_statuses: &[DistributionEntry]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Work status ({} categories):", categories);
    for entry in work_statuses {
        let _ = writeln!(
            output,
            "  {}: {}{}",
            entry.label,
            format_count(entry.count),
            format_percentage(entry, 2)
        );
    }

    output
}

/// Batch sizes with a bar scaled against the largest batch.
pub fn render_batch_distribution(batches: &[DistributionEntry]) -> String {
    const BAR_WIDTH: u64 = 30;
    let mut output = String::new();

    if batches.is_empty() {
        let _ = writeln!(output, "No batch distribution available.");
        return output;
    }

    let largest = batches.iter().map(|b| u64::from(b.count)).max().unwrap_or(0);
    for batch in batches {
        let filled = if largest == 0 {
            0
        } else {
            (u64::from(batch.count) * BAR_WIDTH / largest) as usize
        };
        let _ = writeln!(
            output,
            "{:<6} {:>6} {}{}",
            batch.label,
            format_count(batch.count),
            "#".repeat(filled),
            batch_note(batch)
        );
    }

    output
}

/// State chapter list with a bar scaled against `total_alumni`.
pub fn render_state_list(states: &[DistributionEntry], total_alumni: u32) -> String {
    const BAR_WIDTH: u32 = 30;
    let mut output = String::new();

    for state in states {
        let filled = if total_alumni == 0 {
            0
        } else {
            let count = u64::from(state.count.min(total_alumni));
            (count * u64::from(BAR_WIDTH) / u64::from(total_alumni)) as usize
        };
        let _ = writeln!(
            output,
            "{:<18} {:>6} alumni{:<9} {}",
            state.label,
            format_count(state.count),
            format_percentage(state, 1),
            "#".repeat(filled)
        );
    }

    output
}

pub fn render_table(table: &TableView<'_>) -> String {
    let mut output = String::new();

    if table.rows.is_empty() {
        let _ = writeln!(output, "No alumni match the current filters.");
    }

    for record in &table.rows {
        let marker = if record.support_status == SupportStatus::Yes {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            output,
            "{}{:>5} | {} | {} | {} | {} | {} | {} | {}",
            marker,
            record.sr_no,
            or_placeholder(Some(record.name.as_str())),
            or_placeholder(Some(record.batch.as_str())),
            or_placeholder(Some(record.alumni_state_chapter.as_str())),
            or_placeholder(record.org_name.as_deref()),
            or_placeholder(record.designation.as_deref()),
            or_placeholder(record.college.as_deref()),
            record.support_status
        );
    }

    let bounds = &table.bounds;
    let pages: Vec<String> = table
        .page_window()
        .map(|p| {
            if p == bounds.page {
                format!("[{p}]")
            } else {
                p.to_string()
            }
        })
        .collect();

    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "Showing {} to {} of {} records",
        bounds.showing_start, bounds.showing_end, bounds.total_records
    );
    let _ = writeln!(
        output,
        "{} {} {}",
        if bounds.has_prev() { "< prev" } else { "      " },
        pages.join(" "),
        if bounds.has_next() { "next >" } else { "" }
    );

    output
}

fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER,
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    sr_no: u32,
    name: &'a str,
    batch: &'a str,
    alumni_state_chapter: &'a str,
    org_name: &'a str,
    designation: &'a str,
    college: &'a str,
    university: &'a str,
    work_status: &'a str,
    support_status: &'a str,
    email: &'a str,
    linkedin: &'a str,
}

/// Writes the records as CSV, one row per record, placeholders for
/// missing optional fields.
pub fn write_csv<W: std::io::Write>(records: &[&AlumniRecord], writer: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    for record in records {
        writer.serialize(CsvRow {
            sr_no: record.sr_no,
            name: &record.name,
            batch: &record.batch,
            alumni_state_chapter: &record.alumni_state_chapter,
            org_name: or_placeholder(record.org_name.as_deref()),
            designation: or_placeholder(record.designation.as_deref()),
            college: or_placeholder(record.college.as_deref()),
            university: or_placeholder(record.university.as_deref()),
            work_status: &record.work_status,
            support_status: record.support_status.as_str(),
            email: &record.email,
            linkedin: &record.linkedin,
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedded;
    use crate::pagination::PageBounds;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
    }

    #[test]
    fn counts_use_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1803), "1,803");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn report_lists_summary_batches_and_top_states() {
        let mut states = embedded::state_distribution();
        states.push(DistributionEntry::new("Goa", 2, Some(0.11)));

        let report = build_report(
            &embedded::summary_stats(),
            &embedded::batch_distribution(),
            &states,
            sample_date(),
        );

        assert!(report.contains("Generated on 2026-02-02"));
        assert!(report.contains("- Total Alumni: 1,803"));
        assert!(report.contains("- Supporting Mentoring: 1,279"));
        assert!(report.contains("- B-13: 0 alumni (no intake)"));
        assert!(report.contains("- B-16: 579 alumni\n"));
        assert!(report.contains("- Rajasthan: 378 alumni (21.0%)"));
        assert!(report.contains("- Tamil Nadu: 10 alumni (0.6%)"));
        assert!(!report.contains("Goa"));
    }

    #[test]
    fn report_handles_empty_tables() {
        let report = build_report(&SummaryStats::default(), &[], &[], sample_date());
        assert!(report.contains("No batch distribution available."));
        assert!(report.contains("No state distribution available."));
    }

    #[test]
    fn summary_shows_support_breakdown() {
        let summary = render_summary(
            &embedded::summary_stats(),
            &embedded::work_status_distribution(),
        );
        assert!(summary.contains(&format!("  {:<8} 1,279", "Yes")));
        assert!(summary.contains("Unknown  98"));
        assert!(summary.contains("Intrapreneur: 1,290 (71.55%)"));
    }

    #[test]
    fn state_list_bars_scale_with_total() {
        let states = vec![
            DistributionEntry::new("Rajasthan", 50, Some(50.0)),
            DistributionEntry::new("Bihar", 0, None),
        ];
        let list = render_state_list(&states, 100);
        let lines: Vec<&str> = list.lines().collect();
        assert!(lines[0].ends_with(&"#".repeat(15)));
        assert!(!lines[1].contains('#'));
        assert!(render_state_list(&states, 0).lines().all(|l| !l.contains('#')));
    }

    #[test]
    fn state_list_handles_very_large_counts() {
        let states = vec![DistributionEntry::new("Big", 200_000_000, None)];
        let list = render_state_list(&states, 200_000_000);
        assert!(list.trim_end().ends_with(&"#".repeat(30)));

        let list = render_state_list(&[DistributionEntry::new("Max", u32::MAX, None)], u32::MAX);
        assert!(list.trim_end().ends_with(&"#".repeat(30)));
    }

    #[test]
    fn batch_view_annotates_empty_batches() {
        let view = render_batch_distribution(&embedded::batch_distribution());
        let lines: Vec<&str> = view.lines().collect();

        assert_eq!(lines.len(), 16);
        assert!(lines[12].starts_with("B-13"));
        assert!(lines[12].ends_with("(no intake)"));
        assert!(lines[15].starts_with("B-16"));
        assert!(lines[15].ends_with(&"#".repeat(30)));
        assert!(!lines[15].contains("no intake"));
    }

    #[test]
    fn batch_view_handles_empty_and_all_zero_tables() {
        assert_eq!(
            render_batch_distribution(&[]),
            "No batch distribution available.\n"
        );
        let view = render_batch_distribution(&[DistributionEntry::new("B-1", 0, None)]);
        assert!(!view.contains('#'));
        assert!(view.contains("(no intake)"));
    }

    #[test]
    fn work_status_breakdown_stands_alone() {
        let view = render_work_status(5, &embedded::work_status_distribution());
        assert!(view.starts_with("Work status (5 categories):"));
        assert_eq!(view.lines().count(), 6);
        assert!(view.contains("Higher Studies: 64 (3.55%)"));
    }

    #[test]
    fn table_uses_placeholders_and_footer() {
        let record = AlumniRecord {
            sr_no: 12,
            name: "Rajesh Kumar".to_string(),
            batch: "B-14".to_string(),
            alumni_state_chapter: "Bihar".to_string(),
            support_status: SupportStatus::Yes,
            ..Default::default()
        };
        let table = TableView {
            rows: vec![&record],
            bounds: PageBounds::new(1, 50, 1),
        };

        let rendered = render_table(&table);
        assert!(rendered.starts_with("*   12 | Rajesh Kumar | B-14 | Bihar | N/A | N/A | N/A | Yes"));
        assert!(rendered.contains("Showing 1 to 1 of 1 records"));
        assert!(rendered.contains("[1]"));
        assert!(!rendered.contains("next >"));
    }

    #[test]
    fn csv_export_writes_header_and_rows() {
        let record = AlumniRecord {
            sr_no: 3,
            name: "Priya Sharma".to_string(),
            org_name: Some("Kumar Industries".to_string()),
            support_status: SupportStatus::No,
            ..Default::default()
        };
        let mut buffer = Vec::new();
        write_csv(&[&record], &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "sr_no,name,batch,alumni_state_chapter,org_name,designation,college,\
                 university,work_status,support_status,email,linkedin"
            )
        );
        assert_eq!(
            lines.next(),
            Some("3,Priya Sharma,,,Kumar Industries,N/A,N/A,N/A,,No,,")
        );
    }
}
