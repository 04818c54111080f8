//! Styled workbook output.
//!
//! One worksheet per bucket (Main, Daily, Weekly, Monthly, Billing, always all
//! five). Each table group is laid out as:
//!
//! - a title row: the table name merged across all columns (dark green, bold)
//! - a header row: the column names (light green, bold)
//! - one bordered row per record
//! - one empty row
//!
//! Column widths fit the longest text in each column plus 2.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::domain::{Bucket, DISPLAY_COLUMNS, EvaluatedRecord, Report, TableGroup};
use crate::error::AppError;

/// Default artifact name.
pub const DEFAULT_WORKBOOK_NAME: &str = "output_evaluated.xlsx";

const TITLE_FILL: u32 = 0x3C7D22;
const HEADER_FILL: u32 = 0xC6E0B4;
const WIDTH_PADDING: usize = 2;
const COLUMN_COUNT: usize = DISPLAY_COLUMNS.len();

/// One logical row of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetRow<'a> {
    Title(&'a str),
    Header,
    Data(&'a EvaluatedRecord),
    Spacer,
}

/// Row-by-row layout of one bucket's sheet.
pub fn sheet_layout(groups: &[TableGroup]) -> Vec<SheetRow<'_>> {
    let mut rows = Vec::new();
    for group in groups {
        rows.push(SheetRow::Title(&group.table_name));
        rows.push(SheetRow::Header);
        rows.extend(group.records.iter().map(SheetRow::Data));
        rows.push(SheetRow::Spacer);
    }
    rows
}

/// Character width of the longest text in each column.
pub fn column_widths(rows: &[SheetRow<'_>], sla_label: &str) -> [usize; COLUMN_COUNT] {
    let mut widths = [0usize; COLUMN_COUNT];
    let mut fit = |col: usize, text: &str| {
        widths[col] = widths[col].max(text.chars().count());
    };
    for row in rows {
        match row {
            SheetRow::Title(name) => fit(0, name),
            SheetRow::Header => {
                for (col, name) in DISPLAY_COLUMNS.iter().enumerate() {
                    fit(col, name);
                }
            }
            SheetRow::Data(record) => {
                for (col, text) in record.display_cells(sla_label).iter().enumerate() {
                    fit(col, text);
                }
            }
            SheetRow::Spacer => {}
        }
    }
    widths
}

struct Formats {
    title: Format,
    header: Format,
    cell: Format,
}

impl Formats {
    fn new() -> Self {
        let heading = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        Self {
            title: heading.clone().set_background_color(Color::RGB(TITLE_FILL)),
            header: heading.set_background_color(Color::RGB(HEADER_FILL)),
            cell: Format::new().set_border(FormatBorder::Thin),
        }
    }
}

/// Build the full workbook for a report.
pub fn build_workbook(report: &Report) -> Result<Workbook, AppError> {
    let formats = Formats::new();
    let sla_label = report.sla.label();
    let mut workbook = Workbook::new();

    for bucket in Bucket::ALL {
        let sheet = render_sheet(bucket, report.groups(bucket), &sla_label, &formats)?;
        workbook.push_worksheet(sheet);
    }
    Ok(workbook)
}

fn render_sheet(
    bucket: Bucket,
    groups: &[TableGroup],
    sla_label: &str,
    formats: &Formats,
) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(bucket.name())?;

    let layout = sheet_layout(groups);
    let last_col = (COLUMN_COUNT - 1) as u16;

    for (idx, row) in layout.iter().enumerate() {
        let r = idx as u32;
        match row {
            SheetRow::Title(name) => {
                sheet.merge_range(r, 0, r, last_col, name, &formats.title)?;
            }
            SheetRow::Header => {
                for (col, name) in DISPLAY_COLUMNS.iter().enumerate() {
                    sheet.write_string_with_format(r, col as u16, *name, &formats.header)?;
                }
            }
            SheetRow::Data(record) => {
                for (col, text) in record.display_cells(sla_label).iter().enumerate() {
                    let col = col as u16;
                    if text.is_empty() {
                        sheet.write_blank(r, col, &formats.cell)?;
                    } else {
                        sheet.write_string_with_format(r, col, *text, &formats.cell)?;
                    }
                }
            }
            SheetRow::Spacer => {}
        }
    }

    for (col, width) in column_widths(&layout, sla_label).iter().enumerate() {
        sheet.set_column_width(col as u16, (width + WIDTH_PADDING) as f64)?;
    }

    Ok(sheet)
}

/// Render and save the workbook to `path`.
pub fn write_workbook(path: &Path, report: &Report) -> Result<(), AppError> {
    let mut workbook = build_workbook(report)?;
    workbook
        .save(path)
        .map_err(|e| AppError::io("write workbook", path, e))?;
    info!(path = %path.display(), tables = report.iter_groups().count(), "workbook written");
    Ok(())
}

/// Render the workbook into memory (the downloadable artifact).
pub fn workbook_bytes(report: &Report) -> Result<Vec<u8>, AppError> {
    let mut workbook = build_workbook(report)?;
    Ok(workbook.save_to_buffer()?)
}
