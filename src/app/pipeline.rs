//! Shared evaluation pipeline used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! read -> parse -> evaluate -> classify
//!
//! The subcommands can then focus on presentation (summary, listings, files).

use tracing::{info, warn};

use crate::domain::{Bucket, ParseStats, Report, SlaPolicy};
use crate::error::AppError;
use crate::eval::{classify, evaluate_all};
use crate::io::ingest::{parse_records, read_input};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Display name of the input (`<stdin>` for `-`).
    pub source: String,
    pub stats: ParseStats,
    pub report: Report,
}

/// Evaluate already-loaded text. Never fails.
pub fn evaluate_text(source: impl Into<String>, text: &str, sla: SlaPolicy) -> RunOutput {
    let source = source.into();

    // 1) Parse lines into records.
    let parsed = parse_records(text);
    info!(
        source = %source,
        lines = parsed.stats.lines_read,
        records = parsed.records.len(),
        skipped = parsed.stats.skipped(),
        "parsed input"
    );
    if parsed.records.is_empty() {
        warn!(source = %source, "input contains no records");
    }

    // 2) Derive completeness / timeliness / note per record.
    let evaluated = evaluate_all(parsed.records, &sla);

    // 3) Group by table and assign buckets.
    let report = classify(evaluated, sla);
    for bucket in Bucket::ALL {
        info!(%bucket, tables = report.groups(bucket).len(), "bucket");
    }

    RunOutput {
        source,
        stats: parsed.stats,
        report,
    }
}

/// Read the configured input and evaluate it.
pub fn run_evaluation(input: &std::path::Path, sla: SlaPolicy) -> Result<RunOutput, AppError> {
    let text = read_input(input)?;
    let source = if input.as_os_str() == "-" {
        "<stdin>".to_string()
    } else {
        input.display().to_string()
    };
    Ok(evaluate_text(source, &text, sla))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, Verdict};

    #[test]
    fn end_to_end_on_text() {
        let text = "\
||||||||||||
TBL_BILLING_1|2024-01-01|2024-01-02|10:00|100MB

ORDERS|2024-01-01|2024-01-05|10:00|50MB
ORDERS|2024-01-01|2024-01-05||-
T1|01/03/2024|03-03-2024|09:00|5MB
";
        let run = evaluate_text("inline", text, SlaPolicy::default());
        assert_eq!(run.stats.lines_read, 6);
        assert_eq!(run.report.record_count(), 4);

        let billing = &run.report.groups(Bucket::Billing)[0];
        assert_eq!(billing.table_name, "TBL_BILLING_1");
        assert_eq!(billing.records[0].timeliness, Verdict::Met);
        assert_eq!(billing.records[0].note, Note::None);

        let orders = &run.report.groups(Bucket::Weekly)[0];
        assert_eq!(orders.table_name, "ORDERS");
        assert_eq!(orders.records[0].note, Note::Reprocess);
        assert_eq!(orders.records[1].completeness, Verdict::NotMet);
        assert_eq!(orders.records[1].note, Note::SourceIssue);

        let t1 = &run.report.groups(Bucket::Monthly)[0];
        assert_eq!(t1.table_name, "T1");
        assert_eq!(t1.records[0].timeliness, Verdict::NotMet);
    }

    #[test]
    fn seven_plain_rows_land_in_main() {
        let text: String = (1..=7)
            .map(|d| format!("EVENTS|2024-01-0{d}|2024-01-0{d}|10:00|1MB\n"))
            .collect();
        let run = evaluate_text("inline", &text, SlaPolicy::default());
        let main = run.report.groups(Bucket::Main);
        assert_eq!(main.len(), 1);
        assert_eq!(main[0].records.len(), 7);
        assert!(main[0].records.iter().all(|r| r.timeliness == Verdict::Met));
    }

    #[test]
    fn empty_input_is_valid() {
        let run = evaluate_text("inline", "", SlaPolicy::default());
        assert_eq!(run.report.record_count(), 0);
        assert_eq!(run.report.buckets.len(), 5);
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, "ORDERS|2024-01-01|2024-01-02|10:00|1MB\n").unwrap();
        let run = run_evaluation(&path, SlaPolicy::default()).unwrap();
        assert_eq!(run.source, path.display().to_string());
        assert_eq!(run.report.groups(Bucket::Monthly).len(), 1);
    }
}
