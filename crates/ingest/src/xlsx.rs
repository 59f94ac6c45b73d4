use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use sheetmap_core::{CellValue, FieldKeywords, Sheet, SheetResult};
use thiserror::Error;

use crate::period::PeriodError;
use crate::workbook::evaluate_workbook;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
}

/// Failure of the composed load-then-evaluate entry points.
#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error(transparent)]
    Workbook(#[from] WorkbookError),
    #[error(transparent)]
    Period(#[from] PeriodError),
}

/// Decode an `.xlsx`/`.xls` file into sheets: first row as headers, the rest
/// as data rows, native date cells carried as datetimes.
pub fn read_workbook_path(path: impl AsRef<Path>) -> Result<Vec<Sheet>, WorkbookError> {
    let mut workbook = open_workbook_auto(path)?;
    collect_sheets(&mut workbook)
}

/// Same as [`read_workbook_path`] for spreadsheet bytes already in memory
/// (the transport that produced them is the caller's concern).
pub fn read_workbook_bytes(bytes: &[u8]) -> Result<Vec<Sheet>, WorkbookError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    collect_sheets(&mut workbook)
}

/// Load a workbook from disk and evaluate it against a reporting period.
pub fn evaluate_xlsx_path(
    path: impl AsRef<Path>,
    period: &str,
    keywords: &FieldKeywords,
) -> Result<Vec<SheetResult>, EvaluateError> {
    let sheets = read_workbook_path(path)?;
    Ok(evaluate_workbook(&sheets, period, keywords)?)
}

/// Load a workbook from bytes and evaluate it against a reporting period.
pub fn evaluate_xlsx_bytes(
    bytes: &[u8],
    period: &str,
    keywords: &FieldKeywords,
) -> Result<Vec<SheetResult>, EvaluateError> {
    let sheets = read_workbook_bytes(bytes)?;
    Ok(evaluate_workbook(&sheets, period, keywords)?)
}

fn collect_sheets<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<Vec<Sheet>, WorkbookError> {
    let names = workbook.sheet_names();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(row) => row.iter().map(header_text).collect(),
            None => Vec::new(),
        };
        let data: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(cell_value).collect())
            .collect();
        tracing::debug!(sheet = %name, rows = data.len(), "worksheet loaded");
        sheets.push(Sheet::new(name, headers, data));
    }
    Ok(sheets)
}

fn header_text(data: &Data) -> String {
    match data {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Empty),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    const UK_DATES: &[&str] = &[
        "24/07/2025",
        "24-07-2025",
        "24 Jul 2025",
        "24 July 2025",
        "2025-07-24",
        "24.07.2025",
        "24/7/25",
        "24th July 2025",
        "Thursday, 24 July 2025",
        "24/07/2025 12:00",
    ];

    fn date_formats_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name("UKDateFormats").unwrap();
        for (col, header) in ["Amount", "Date", "Description", "Disallowable Expenses"]
            .iter()
            .enumerate()
        {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        for (i, date) in UK_DATES.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_number(row, 0, 100.0).unwrap();
            sheet.write_string(row, 1, *date).unwrap();
            sheet.write_string(row, 2, format!("Test row {}", i + 1)).unwrap();
            sheet.write_number(row, 3, 0.0).unwrap();
        }

        let empty = workbook.add_worksheet();
        empty.set_name("EmptySheet").unwrap();
        for (col, header) in ["Amount", "Date"].iter().enumerate() {
            empty.write_string(0, col as u16, *header).unwrap();
        }

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn reads_headers_and_typed_cells() {
        let sheets = read_workbook_bytes(&date_formats_workbook()).unwrap();
        assert_eq!(sheets.len(), 2);

        let first = &sheets[0];
        assert_eq!(first.name, "UKDateFormats");
        assert_eq!(
            first.headers,
            vec!["Amount", "Date", "Description", "Disallowable Expenses"]
        );
        assert_eq!(first.rows.len(), UK_DATES.len());
        assert_eq!(first.cell(0, "Amount"), CellValue::Float(100.0));
        assert_eq!(first.cell(0, "Date"), CellValue::Text("24/07/2025".to_string()));

        // Header-only sheet survives loading; cleaning removes it later.
        assert_eq!(sheets[1].name, "EmptySheet");
        assert!(sheets[1].rows.is_empty());
    }

    #[test]
    fn evaluates_bytes_end_to_end() {
        let bytes = date_formats_workbook();
        let results =
            evaluate_xlsx_bytes(&bytes, "1/7/2025-30/7/2025", &FieldKeywords::default()).unwrap();

        // The header-only sheet is omitted, the data sheet is selected.
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.sheet_name, "UKDateFormats");
        assert!(result.selected);
        assert_eq!(
            result.column_mapping.disallowable_expenses.as_deref(),
            Some("Disallowable Expenses")
        );
        assert_eq!(result.mapped_data.len(), UK_DATES.len());
    }

    #[test]
    fn evaluates_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quarters.xlsx");

        let mut workbook = Workbook::new();
        for (name, date) in [("Q1", "15/01/2025"), ("Q2", "05/04/2025")] {
            let sheet = workbook.add_worksheet();
            sheet.set_name(name).unwrap();
            sheet.write_string(0, 0, "Date").unwrap();
            sheet.write_string(0, 1, "Amount").unwrap();
            sheet.write_string(1, 0, date).unwrap();
            sheet.write_number(1, 1, 250.0).unwrap();
        }
        workbook.save(&path).unwrap();

        let results =
            evaluate_xlsx_path(&path, "1/1/2025-31/3/2025", &FieldKeywords::default()).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].selected);
        assert!(!results[1].selected);
    }

    #[test]
    fn rejects_non_spreadsheet_bytes() {
        let err = read_workbook_bytes(b"not a spreadsheet").unwrap_err();
        assert!(matches!(err, WorkbookError::Spreadsheet(_)));
    }

    #[test]
    fn malformed_period_surfaces_through_evaluate() {
        let bytes = date_formats_workbook();
        let err = evaluate_xlsx_bytes(&bytes, "garbage", &FieldKeywords::default()).unwrap_err();
        assert!(matches!(err, EvaluateError::Period(PeriodError::Malformed(_))));
    }
}
