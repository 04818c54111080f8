//! Lenient calendar-date parsing for availability/transaction fields.

use chrono::NaiveDate;

/// Accepted formats, tried in order. The first match wins.
///
/// Each entry carries the separator and the position of the year token so we
/// can insist on a four-digit year before handing the string to chrono
/// (chrono would otherwise read `01-03-24` as the ISO date `0001-03-24`).
const FORMATS: [(&str, char, usize); 3] = [
    ("%Y-%m-%d", '-', 0),
    ("%d/%m/%Y", '/', 2),
    ("%d-%m-%Y", '-', 2),
];

/// Parse `YYYY-MM-DD`, `DD/MM/YYYY` or `DD-MM-YYYY` (in that order of precedence).
///
/// The field is taken as-is: padding around the year or after the last token
/// makes it unparseable. Returns `None` when no format matches; callers treat
/// that as "no date", never as an error.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    FORMATS.iter().find_map(|&(fmt, sep, year_pos)| {
        if !has_four_digit_year(s, sep, year_pos) {
            return None;
        }
        NaiveDate::parse_from_str(s, fmt).ok()
    })
}

fn has_four_digit_year(s: &str, sep: char, year_pos: usize) -> bool {
    let parts: Vec<&str> = s.split(sep).collect();
    parts.len() == 3
        && parts[year_pos].len() == 4
        && parts[year_pos].bytes().all(|b| b.is_ascii_digit())
}
