//! Shared domain types.
//!
//! These types are plain values so they can be:
//!
//! - produced by the parser and evaluator without any shared state
//! - rendered into the workbook and the terminal
//! - exported to CSV/JSON

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

/// Placeholder used by source exports for "no value".
pub const PLACEHOLDER: &str = "-";

/// True when a raw field carries no value: blank after trimming, or the `-` placeholder.
pub fn is_missing(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v == PLACEHOLDER
}

/// One parsed input line.
///
/// Fields are kept exactly as they appeared between the `|` delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub table_name: String,
    pub date_transaction: String,
    pub date_availability: String,
    pub time_availability: String,
    pub size_condition: String,
}

/// Outcome of a completeness or timeliness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    #[serde(rename = "MET")]
    Met,
    #[serde(rename = "NOT MET")]
    NotMet,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Met => "MET",
            Verdict::NotMet => "NOT MET",
        }
    }

    pub fn is_met(self) -> bool {
        self == Verdict::Met
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Remediation note attached to late records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Note {
    /// On time; nothing to do.
    #[serde(rename = "")]
    None,
    /// Late and the source never produced a size: the delay sits upstream.
    #[serde(rename = "Source Issue")]
    SourceIssue,
    /// Late but data exists: rerun the load.
    #[serde(rename = "Reprocess")]
    Reprocess,
}

impl Note {
    pub fn label(self) -> &'static str {
        match self {
            Note::None => "",
            Note::SourceIssue => "Source Issue",
            Note::Reprocess => "Reprocess",
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A record plus its three derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluatedRecord {
    #[serde(flatten)]
    pub record: Record,
    pub completeness: Verdict,
    pub timeliness: Verdict,
    pub note: Note,
}

/// Report column headers, in display order.
pub const DISPLAY_COLUMNS: [&str; 9] = [
    "TABLE NAME",
    "SLA DATE",
    "DATE TRANSACTION",
    "DATE AVAILABILITY",
    "TIME AVAILABILITY",
    "NOW SIZE CONDITION",
    "COMPLETENESS",
    "TIMELINESS",
    "NOTE",
];

impl EvaluatedRecord {
    /// Cell texts matching `DISPLAY_COLUMNS`.
    pub fn display_cells<'a>(&'a self, sla_label: &'a str) -> [&'a str; 9] {
        let r = &self.record;
        [
            r.table_name.as_str(),
            sla_label,
            r.date_transaction.as_str(),
            r.date_availability.as_str(),
            r.time_availability.as_str(),
            r.size_condition.as_str(),
            self.completeness.label(),
            self.timeliness.label(),
            self.note.label(),
        ]
    }

    /// True when either verdict failed.
    pub fn has_failure(&self) -> bool {
        !self.completeness.is_met() || !self.timeliness.is_met()
    }
}

/// Report section a table lands in.
///
/// Declaration order is the workbook sheet order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum,
)]
pub enum Bucket {
    Main,
    Daily,
    Weekly,
    Monthly,
    Billing,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::Main,
        Bucket::Daily,
        Bucket::Weekly,
        Bucket::Monthly,
        Bucket::Billing,
    ];

    /// Sheet / section name.
    pub fn name(self) -> &'static str {
        match self {
            Bucket::Main => "Main",
            Bucket::Daily => "Daily",
            Bucket::Weekly => "Weekly",
            Bucket::Monthly => "Monthly",
            Bucket::Billing => "Billing",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All evaluated records sharing one table name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableGroup {
    pub table_name: String,
    pub bucket: Bucket,
    pub records: Vec<EvaluatedRecord>,
}

/// Maximum allowed lag between transaction and availability dates.
///
/// Written as `D+<days>` in reports and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlaPolicy {
    pub days: i64,
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self { days: 1 }
    }
}

impl SlaPolicy {
    pub fn new(days: i64) -> Self {
        Self { days }
    }

    /// Parse a `D+<n>` label.
    pub fn parse(label: &str) -> Option<Self> {
        let days = label.trim().strip_prefix("D+")?;
        if days.is_empty() || !days.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        days.parse::<i64>().ok().map(Self::new)
    }

    pub fn label(&self) -> String {
        format!("D+{}", self.days)
    }
}

impl fmt::Display for SlaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D+{}", self.days)
    }
}

/// Counts of what the parser saw and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub lines_read: usize,
    pub blank: usize,
    pub separators: usize,
    pub malformed: usize,
}

impl ParseStats {
    pub fn skipped(&self) -> usize {
        self.blank + self.separators + self.malformed
    }
}

/// Bucketed output of a run.
///
/// Every bucket is present, possibly empty. Groups inside a bucket are sorted
/// by table name; records inside a group keep input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub sla: SlaPolicy,
    pub buckets: BTreeMap<Bucket, Vec<TableGroup>>,
}

impl Report {
    pub fn empty(sla: SlaPolicy) -> Self {
        Self {
            sla,
            buckets: Bucket::ALL.iter().map(|b| (*b, Vec::new())).collect(),
        }
    }

    pub fn groups(&self, bucket: Bucket) -> &[TableGroup] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate groups in sheet order.
    pub fn iter_groups(&self) -> impl Iterator<Item = &TableGroup> {
        self.buckets.values().flatten()
    }

    pub fn record_count(&self) -> usize {
        self.iter_groups().map(|g| g.records.len()).sum()
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Input file; `-` reads standard input.
    pub input: PathBuf,
    pub sla: SlaPolicy,
    /// Workbook destination (`None` skips rendering).
    pub output: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
    pub print_summary: bool,
}
