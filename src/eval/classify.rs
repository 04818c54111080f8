//! Group evaluated records by table and assign each table to a report bucket.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{Bucket, EvaluatedRecord, Report, SlaPolicy, TableGroup};

type Rule = (Bucket, fn(&str, usize) -> bool);

/// Ordered bucket rules. The first matching rule wins; `Main` is the fallback.
const RULES: [Rule; 4] = [
    (Bucket::Billing, is_billing_table),
    (Bucket::Daily, is_daily),
    (Bucket::Weekly, is_weekly),
    (Bucket::Monthly, is_monthly),
];

/// `bil` also covers `billing`, so one substring test is enough.
fn is_billing_table(table_name: &str, _count: usize) -> bool {
    table_name.to_lowercase().contains("bil")
}

fn is_daily(_table_name: &str, count: usize) -> bool {
    count >= 10
}

fn is_weekly(_table_name: &str, count: usize) -> bool {
    count > 1 && count < 6
}

fn is_monthly(_table_name: &str, count: usize) -> bool {
    count == 1
}

/// Bucket for a table with `count` records.
pub fn bucket_for(table_name: &str, count: usize) -> Bucket {
    RULES
        .iter()
        .find(|(_, matches)| matches(table_name, count))
        .map(|(bucket, _)| *bucket)
        .unwrap_or(Bucket::Main)
}

/// Group records by table name. Tables come out sorted by name; records keep input order.
pub fn group_by_table(records: Vec<EvaluatedRecord>) -> BTreeMap<String, Vec<EvaluatedRecord>> {
    let mut groups: BTreeMap<String, Vec<EvaluatedRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.record.table_name.clone())
            .or_default()
            .push(record);
    }
    groups
}

/// Build the bucketed report from the full evaluated record set.
pub fn classify(records: Vec<EvaluatedRecord>, sla: SlaPolicy) -> Report {
    let mut report = Report::empty(sla);
    for (table_name, records) in group_by_table(records) {
        let bucket = bucket_for(&table_name, records.len());
        debug!(table = %table_name, records = records.len(), %bucket, "classified");
        report.buckets.entry(bucket).or_default().push(TableGroup {
            table_name,
            bucket,
            records,
        });
    }
    report
}
