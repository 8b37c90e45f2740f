//! xlsx writer for the assembled report.
//!
//! The workbook is built fully in memory and saved in one shot, so a failed
//! run never leaves a half-written file behind.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{Format, Url, Workbook, Worksheet};
use tracing::info;

use listing_ingest::any_to_string;
use listing_model::{TOC_SHEET, TocEntry};

use crate::report::Report;

const GO_TO_SHEET_LABEL: &str = "Go to Sheet";

/// Writes `report` to `path` as an xlsx workbook.
///
/// Sheet order is table of contents first, then the data sheets in the order
/// [`assemble`](crate::assemble) produced them. Every sheet name in the
/// report must already be sanitized; an invalid name fails the whole write.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let start = Instant::now();
    let mut workbook = Workbook::new();

    let toc = workbook.add_worksheet();
    toc.set_name(TOC_SHEET)
        .with_context(|| format!("create worksheet '{TOC_SHEET}'"))?;
    write_toc(toc, &report.toc)?;

    let header_format = Format::new().set_bold();
    for sheet in &report.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .with_context(|| format!("create worksheet '{}'", sheet.name))?;
        write_table(worksheet, &sheet.table, &header_format)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("save workbook to {}", path.display()))?;

    info!(
        path = %path.display(),
        sheets = report.sheet_count(),
        duration_ms = start.elapsed().as_millis() as u64,
        "wrote report workbook"
    );
    Ok(())
}

/// Writes the navigation sheet: a bold title, one row per data sheet with
/// its description, and an `internal:` link jumping to that sheet's A1.
fn write_toc(worksheet: &mut Worksheet, entries: &[TocEntry]) -> Result<()> {
    let title_format = Format::new().set_bold();
    worksheet
        .write_string_with_format(0, 0, TOC_SHEET, &title_format)
        .context("write table of contents title")?;

    // Entries start two rows below the title.
    for (offset, entry) in entries.iter().enumerate() {
        let row = 2 + offset as u32;
        worksheet
            .write_string(row, 0, &entry.sheet_name)
            .and_then(|ws| ws.write_string(row, 1, &entry.description))
            .with_context(|| format!("write table of contents row for '{}'", entry.sheet_name))?;

        // Single quotes keep names with spaces valid as link targets.
        let target = format!("internal:'{}'!A1", entry.sheet_name);
        let link = Url::new(target).set_text(GO_TO_SHEET_LABEL);
        worksheet
            .write_url(row, 2, link)
            .with_context(|| format!("write sheet link for '{}'", entry.sheet_name))?;
    }

    worksheet.set_column_width(0, 34.0)?;
    worksheet.set_column_width(1, 92.0)?;
    worksheet.set_column_width(2, 14.0)?;
    Ok(())
}

/// Writes a data frame as a bold header row followed by its rows.
fn write_table(worksheet: &mut Worksheet, table: &DataFrame, header_format: &Format) -> Result<()> {
    for (col, name) in table.get_column_names().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, name.as_str(), header_format)
            .with_context(|| format!("write header cell '{name}'"))?;
    }

    for (col, column) in table.get_columns().iter().enumerate() {
        for row in 0..table.height() {
            let value = column.get(row).unwrap_or(AnyValue::Null);
            write_cell(worksheet, row as u32 + 1, col as u16, value)
                .with_context(|| format!("write cell in column '{}'", column.name()))?;
        }
    }
    Ok(())
}

/// Writes one cell, keeping numbers numeric so spreadsheet filters and
/// sorting behave. Nulls stay as empty cells rather than empty strings.
fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: AnyValue<'_>) -> Result<()> {
    match value {
        AnyValue::Null => {}
        AnyValue::Int8(v) => {
            worksheet.write_number(row, col, f64::from(v))?;
        }
        AnyValue::Int16(v) => {
            worksheet.write_number(row, col, f64::from(v))?;
        }
        AnyValue::Int32(v) => {
            worksheet.write_number(row, col, f64::from(v))?;
        }
        AnyValue::Int64(v) => {
            worksheet.write_number(row, col, v as f64)?;
        }
        AnyValue::UInt8(v) => {
            worksheet.write_number(row, col, f64::from(v))?;
        }
        AnyValue::UInt16(v) => {
            worksheet.write_number(row, col, f64::from(v))?;
        }
        AnyValue::UInt32(v) => {
            worksheet.write_number(row, col, f64::from(v))?;
        }
        AnyValue::UInt64(v) => {
            worksheet.write_number(row, col, v as f64)?;
        }
        AnyValue::Float32(v) => {
            worksheet.write_number(row, col, f64::from(v))?;
        }
        AnyValue::Float64(v) => {
            worksheet.write_number(row, col, v)?;
        }
        AnyValue::String(s) => {
            worksheet.write_string(row, col, s)?;
        }
        AnyValue::StringOwned(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        other => {
            worksheet.write_string(row, col, any_to_string(other))?;
        }
    }
    Ok(())
}
