//! Pipe-delimited ingest.
//!
//! This module turns a raw delivery-log export into an ordered list of
//! `Record`s. Row problems never abort the run:
//! - blank lines and `||||...` separator lines are skipped
//! - lines with fewer than five fields are dropped
//!
//! Dropped lines are only counted (and logged at debug level), so one bad row
//! can never stop a bulk load.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::domain::{ParseStats, Record};
use crate::error::{AppError, EXIT_INPUT};

/// Field delimiter.
pub const DELIMITER: char = '|';

/// Lines starting with this run of pipes are visual dividers in source exports.
pub const SEPARATOR_PREFIX: &str = "||||";

/// Minimum number of `|`-delimited fields a line needs to become a record.
pub const MIN_FIELDS: usize = 5;

/// Parser output: records in input order plus what was skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedInput {
    pub records: Vec<Record>,
    pub stats: ParseStats,
}

/// Parse the full text of an export.
pub fn parse_records(text: &str) -> ParsedInput {
    let mut records = Vec::new();
    let mut stats = ParseStats::default();

    for (idx, raw) in split_lines(text).enumerate() {
        let line_no = idx + 1;
        stats.lines_read += 1;

        let line = raw.trim();
        if line.is_empty() {
            stats.blank += 1;
            continue;
        }
        if is_separator(line) {
            debug!(line = line_no, "skipping separator line");
            stats.separators += 1;
            continue;
        }

        match parse_line(line) {
            Some(record) => records.push(record),
            None => {
                debug!(line = line_no, "dropping line with fewer than {MIN_FIELDS} fields");
                stats.malformed += 1;
            }
        }
    }

    ParsedInput { records, stats }
}

/// Line terminators recognised in exports: `\n`, `\r`, `\r\n`, plus the
/// vertical tab, form feed, file/group/record separators, NEL and the Unicode
/// line/paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split text into lines without their terminators. `\r\n` is one break, and
/// a trailing break does not produce an extra empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some((idx, c)) = rest.char_indices().find(|&(_, c)| is_line_break(c)) else {
            let line = rest;
            rest = "";
            return Some(line);
        };
        let line = &rest[..idx];
        let mut next = idx + c.len_utf8();
        if c == '\r' && rest[next..].starts_with('\n') {
            next += 1;
        }
        rest = &rest[next..];
        Some(line)
    })
}

/// True for divider lines such as `||||||||`.
pub fn is_separator(line: &str) -> bool {
    line.starts_with(SEPARATOR_PREFIX)
}

/// Split one trimmed line into a record. Fields past the fifth are ignored.
pub fn parse_line(line: &str) -> Option<Record> {
    let mut fields = line.split(DELIMITER);
    let table_name = fields.next()?;
    let date_transaction = fields.next()?;
    let date_availability = fields.next()?;
    let time_availability = fields.next()?;
    let size_condition = fields.next()?;

    Some(Record {
        table_name: table_name.to_string(),
        date_transaction: date_transaction.to_string(),
        date_availability: date_availability.to_string(),
        time_availability: time_availability.to_string(),
        size_condition: size_condition.to_string(),
    })
}

/// Read the input as UTF-8 text. `-` reads standard input.
pub fn read_input(path: &Path) -> Result<String, AppError> {
    let bytes = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read standard input: {e}")))?;
        buf
    } else {
        fs::read(path).map_err(|e| AppError::io("open input", path, e))?
    };

    String::from_utf8(bytes).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Input '{}' is not valid UTF-8: {e}", path.display()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_five_fields_are_kept_verbatim() {
        let parsed = parse_records("ORDERS|2024-01-01| 2024-01-02 |10:00|50MB|extra|more\n");
        assert_eq!(parsed.records.len(), 1);
        let r = &parsed.records[0];
        assert_eq!(r.table_name, "ORDERS");
        assert_eq!(r.date_transaction, "2024-01-01");
        assert_eq!(r.date_availability, " 2024-01-02 ");
        assert_eq!(r.time_availability, "10:00");
        assert_eq!(r.size_condition, "50MB");
    }

    #[test]
    fn empty_trailing_fields_still_count() {
        let r = parse_line("ORDERS|2024-01-01|2024-01-05||").unwrap();
        assert_eq!(r.time_availability, "");
        assert_eq!(r.size_condition, "");
    }

    #[test]
    fn short_lines_are_dropped() {
        assert!(parse_line("A|B|C|D").is_none());
        assert!(parse_line("no delimiters").is_none());
        let parsed = parse_records("A|B|C|D\nA|B|C|D|E\n|||\n");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.stats.malformed, 2);
    }

    #[test]
    fn separators_and_blanks_are_skipped() {
        let text = "||||||||\n\nT|2024-01-01|2024-01-02|10:00|1MB\n   \n  ||||||||  \nT|2024-01-02|2024-01-02|10:00|1MB\n";
        let parsed = parse_records(text);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(
            parsed.stats,
            ParseStats {
                lines_read: 6,
                blank: 2,
                separators: 2,
                malformed: 0
            }
        );
        assert_eq!(
            parsed.records.len(),
            parsed.stats.lines_read - parsed.stats.skipped()
        );
    }

    #[test]
    fn order_is_preserved() {
        let parsed = parse_records("B|1|1|1|1\nA|2|2|2|2\nbad\nB|3|3|3|3\n");
        let names: Vec<&str> = parsed
            .records
            .iter()
            .map(|r| r.table_name.as_str())
            .collect();
        assert_eq!(names, ["B", "A", "B"]);
        assert_eq!(parsed.records[2].date_transaction, "3");
    }

    #[test]
    fn empty_table_name_is_kept() {
        let r = parse_line("|2024-01-01|2024-01-02|10:00|1MB").unwrap();
        assert_eq!(r.table_name, "");
    }

    #[test]
    fn crlf_and_empty_input() {
        let parsed = parse_records("T|a|b|c|d\r\nT|a|b|c|d\r\n");
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].size_condition, "d");
        assert_eq!(parsed.stats.lines_read, 2);
        assert_eq!(parsed.stats.blank, 0);

        let parsed = parse_records("");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.stats, ParseStats::default());
    }

    #[test]
    fn bare_cr_and_other_breaks_split_records() {
        let text = "A|2024-01-01|2024-01-02|10:00|1MB\rB|2024-01-01|2024-01-02|10:00|1MB\r";
        let parsed = parse_records(text);
        let names: Vec<&str> = parsed
            .records
            .iter()
            .map(|r| r.table_name.as_str())
            .collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(parsed.records[0].size_condition, "1MB");
        assert_eq!(parsed.stats.lines_read, 2);

        let parsed = parse_records("A|a|b|c|d\u{2028}B|a|b|c|d\u{0c}C|a|b|c|d\u{1e}D|a|b|c|d");
        assert_eq!(parsed.records.len(), 4);
        assert_eq!(parsed.stats.skipped(), 0);
    }

    #[test]
    fn split_lines_edges() {
        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("a\r\n\r\nb").collect::<Vec<_>>(), ["a", "", "b"]);
        assert_eq!(split_lines("a\n\r").collect::<Vec<_>>(), ["a", ""]);
        assert_eq!(split_lines("a\u{85}b\n").collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn read_input_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();
        let err = read_input(&path).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn read_input_reports_missing_file() {
        let err = read_input(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
