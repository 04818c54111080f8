//! Formatted terminal output: run summary and per-table listings.
//!
//! Formatting lives in one place so the evaluation code stays clean and
//! output changes are localized.

use crate::domain::{Bucket, DISPLAY_COLUMNS, EvaluatedRecord, ParseStats, Report, TableGroup};
use crate::io::export::Totals;

/// Column widths for the fixed-width listing (matches `DISPLAY_COLUMNS`).
const LISTING_WIDTHS: [usize; 9] = [24, 8, 16, 17, 17, 18, 12, 10, 12];

/// Format the run summary (parse counts, buckets, verdict totals).
pub fn format_run_summary(source: &str, stats: &ParseStats, report: &Report) -> String {
    let totals = Totals::from_report(report);
    let mut out = String::new();

    out.push_str("=== sla - delivery SLA evaluation ===\n");
    out.push_str(&format!("Input: {source}\n"));
    out.push_str(&format!("SLA: {}\n", report.sla));
    out.push_str(&format!(
        "Lines: read={} | records={} | skipped={} (blank={}, separator={}, malformed={})\n",
        stats.lines_read,
        totals.records,
        stats.skipped(),
        stats.blank,
        stats.separators,
        stats.malformed,
    ));

    out.push_str("\nBuckets:\n");
    for bucket in Bucket::ALL {
        let groups = report.groups(bucket);
        let records: usize = groups.iter().map(|g| g.records.len()).sum();
        out.push_str(&format!(
            "  {:<8} tables={:<4} records={}\n",
            bucket.name(),
            groups.len(),
            records
        ));
    }

    out.push_str("\nVerdicts:\n");
    out.push_str(&format!(
        "  COMPLETENESS  MET={} NOT MET={}\n",
        totals.completeness_met, totals.completeness_not_met
    ));
    out.push_str(&format!(
        "  TIMELINESS    MET={} NOT MET={}\n",
        totals.timeliness_met, totals.timeliness_not_met
    ));
    out.push_str(&format!(
        "  NOTE          Source Issue={} Reprocess={}\n",
        totals.source_issue, totals.reprocess
    ));

    out
}

/// Format every table in the given buckets as fixed-width listings.
///
/// `only_failures` keeps records with at least one `NOT MET`; tables left
/// empty by that filter are omitted.
pub fn format_tables(report: &Report, buckets: &[Bucket], only_failures: bool) -> String {
    let sla_label = report.sla.label();
    let mut out = String::new();

    for &bucket in buckets {
        for group in report.groups(bucket) {
            let rows: Vec<&EvaluatedRecord> = group
                .records
                .iter()
                .filter(|r| !only_failures || r.has_failure())
                .collect();
            if rows.is_empty() {
                continue;
            }
            out.push_str(&format_group(group, &rows, &sla_label));
            out.push('\n');
        }
    }

    if out.is_empty() {
        out.push_str("(no matching records)\n");
    }
    out
}

fn format_group(group: &TableGroup, rows: &[&EvaluatedRecord], sla_label: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "[{}] {} ({} records)\n",
        group.bucket,
        display_name(&group.table_name),
        group.records.len()
    ));
    out.push_str(&format_line(&DISPLAY_COLUMNS));
    out.push_str(&format_line(&LISTING_WIDTHS.map(|w| "-".repeat(w))));
    for r in rows {
        out.push_str(&format_line(&r.display_cells(sla_label)));
    }
    out
}

fn format_line<S: AsRef<str>>(cells: &[S; 9]) -> String {
    let parts: Vec<String> = cells
        .iter()
        .zip(LISTING_WIDTHS)
        .map(|(cell, width)| format!("{:<width$}", truncate(cell.as_ref(), width)))
        .collect();
    let mut line = parts.join(" ").trim_end().to_string();
    line.push('\n');
    line
}

fn display_name(table_name: &str) -> &str {
    if table_name.is_empty() {
        "(unnamed)"
    } else {
        table_name
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
