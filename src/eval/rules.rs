//! Per-record evaluation: completeness, timeliness and the remediation note.

use crate::domain::{EvaluatedRecord, Note, Record, SlaPolicy, Verdict, is_missing};
use crate::eval::dates::parse_date;

/// `NOT MET` when no availability time was recorded.
pub fn completeness(record: &Record) -> Verdict {
    if is_missing(&record.time_availability) {
        Verdict::NotMet
    } else {
        Verdict::Met
    }
}

/// `MET` only when both dates parse and availability lags the transaction by
/// at most `sla.days` whole days. Same-day and negative lags pass.
pub fn timeliness(record: &Record, sla: &SlaPolicy) -> Verdict {
    if is_missing(&record.date_availability) {
        return Verdict::NotMet;
    }
    let Some(available) = parse_date(&record.date_availability) else {
        return Verdict::NotMet;
    };
    let Some(transaction) = parse_date(&record.date_transaction) else {
        return Verdict::NotMet;
    };

    let delta = (available - transaction).num_days();
    if delta > sla.days {
        Verdict::NotMet
    } else {
        Verdict::Met
    }
}

/// Only late records get a note. Completeness plays no part here.
pub fn note(record: &Record, timeliness: Verdict) -> Note {
    match timeliness {
        Verdict::Met => Note::None,
        Verdict::NotMet if is_missing(&record.size_condition) => Note::SourceIssue,
        Verdict::NotMet => Note::Reprocess,
    }
}

pub fn evaluate(record: Record, sla: &SlaPolicy) -> EvaluatedRecord {
    let completeness = completeness(&record);
    let timeliness = timeliness(&record, sla);
    let note = note(&record, timeliness);
    EvaluatedRecord {
        record,
        completeness,
        timeliness,
        note,
    }
}

/// Evaluate every record, preserving order.
pub fn evaluate_all(records: Vec<Record>, sla: &SlaPolicy) -> Vec<EvaluatedRecord> {
    records.into_iter().map(|r| evaluate(r, sla)).collect()
}
