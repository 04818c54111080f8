//! Export evaluated records to CSV and the bucketed report to JSON.
//!
//! The CSV is flat (one row per record, bucket in the first column) so it is
//! easy to consume in spreadsheets or downstream scripts. The JSON keeps the
//! bucket -> table -> records nesting.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::{Bucket, DISPLAY_COLUMNS, Note, ParseStats, Report, TableGroup, Verdict};
use crate::error::AppError;

/// Write one row per evaluated record.
pub fn write_records_csv(path: &Path, report: &Report) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::io("create export CSV", path, e))?;
    write_records_csv_to(file, report).map_err(|e| AppError::io("write export CSV", path, e))
}

/// CSV writer over any sink (used by tests and stdout piping).
pub fn write_records_csv_to<W: std::io::Write>(sink: W, report: &Report) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(sink);
    let sla_label = report.sla.label();

    let mut header = vec!["BUCKET"];
    header.extend(DISPLAY_COLUMNS);
    writer.write_record(&header)?;

    for group in report.iter_groups() {
        for record in &group.records {
            let mut row = vec![group.bucket.name()];
            row.extend(record.display_cells(&sla_label));
            writer.write_record(&row)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Verdict and note counts across a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub tables: usize,
    pub records: usize,
    pub completeness_met: usize,
    pub completeness_not_met: usize,
    pub timeliness_met: usize,
    pub timeliness_not_met: usize,
    pub source_issue: usize,
    pub reprocess: usize,
}

impl Totals {
    pub fn from_report(report: &Report) -> Self {
        let mut totals = Totals::default();
        for group in report.iter_groups() {
            totals.tables += 1;
            for r in &group.records {
                totals.records += 1;
                match r.completeness {
                    Verdict::Met => totals.completeness_met += 1,
                    Verdict::NotMet => totals.completeness_not_met += 1,
                }
                match r.timeliness {
                    Verdict::Met => totals.timeliness_met += 1,
                    Verdict::NotMet => totals.timeliness_not_met += 1,
                }
                match r.note {
                    Note::None => {}
                    Note::SourceIssue => totals.source_issue += 1,
                    Note::Reprocess => totals.reprocess += 1,
                }
            }
        }
        totals
    }
}

#[derive(Serialize)]
struct ReportFile<'a> {
    tool: &'static str,
    sla: String,
    parse: &'a ParseStats,
    totals: Totals,
    buckets: &'a std::collections::BTreeMap<Bucket, Vec<TableGroup>>,
}

/// Write the bucketed report as pretty JSON.
pub fn write_report_json(path: &Path, report: &Report, stats: &ParseStats) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::io("create report JSON", path, e))?;
    let doc = ReportFile {
        tool: "sla",
        sla: report.sla.label(),
        parse: stats,
        totals: Totals::from_report(report),
        buckets: &report.buckets,
    };
    serde_json::to_writer_pretty(file, &doc).map_err(|e| AppError::io("write report JSON", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SlaPolicy;
    use crate::eval::{classify, evaluate_all};
    use crate::io::ingest::parse_records;

    const SAMPLE: &str = "\
ORDERS|2024-01-01|2024-01-05|10:00|50MB
ORDERS|2024-01-01|2024-01-05||-
TBL_BILLING_1|2024-01-01|2024-01-02|10:00|100MB
";

    fn report() -> Report {
        let sla = SlaPolicy::default();
        classify(evaluate_all(parse_records(SAMPLE).records, &sla), sla)
    }

    #[test]
    fn csv_has_bucket_column_and_one_row_per_record() {
        let mut buf = Vec::new();
        write_records_csv_to(&mut buf, &report()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("BUCKET,TABLE NAME,SLA DATE"));
        assert_eq!(lines[1], "Weekly,ORDERS,D+1,2024-01-01,2024-01-05,10:00,50MB,MET,NOT MET,Reprocess");
        assert_eq!(lines[2], "Weekly,ORDERS,D+1,2024-01-01,2024-01-05,,-,NOT MET,NOT MET,Source Issue");
        assert_eq!(lines[3], "Billing,TBL_BILLING_1,D+1,2024-01-01,2024-01-02,10:00,100MB,MET,MET,");
    }

    #[test]
    fn totals_count_verdicts_and_notes() {
        let totals = Totals::from_report(&report());
        assert_eq!(
            totals,
            Totals {
                tables: 2,
                records: 3,
                completeness_met: 2,
                completeness_not_met: 1,
                timeliness_met: 1,
                timeliness_not_met: 2,
                source_issue: 1,
                reprocess: 1,
            }
        );
    }

    #[test]
    fn json_nests_bucket_table_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let stats = parse_records(SAMPLE).stats;
        write_report_json(&path, &report(), &stats).unwrap();

        let value: serde_json::Value =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(value["sla"], "D+1");
        assert_eq!(value["parse"]["lines_read"], 3);
        assert_eq!(value["totals"]["records"], 3);
        assert_eq!(value["buckets"]["Main"].as_array().unwrap().len(), 0);

        let weekly = &value["buckets"]["Weekly"][0];
        assert_eq!(weekly["table_name"], "ORDERS");
        assert_eq!(weekly["records"][0]["timeliness"], "NOT MET");
        assert_eq!(weekly["records"][0]["note"], "Reprocess");
        assert_eq!(weekly["records"][1]["note"], "Source Issue");

        let billing = &value["buckets"]["Billing"][0]["records"][0];
        assert_eq!(billing["completeness"], "MET");
        assert_eq!(billing["note"], "");
        assert_eq!(billing["date_availability"], "2024-01-02");
    }
}
