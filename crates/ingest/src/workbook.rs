use sheetmap_core::{CanonicalField, ColumnMapping, DateRange, FieldKeywords, MappedRecord, Sheet, SheetResult};

use crate::clean::clean_sheet;
use crate::dates::cell_date;
use crate::mapping::{assign_columns, project_rows};
use crate::period::{parse_period, PeriodError};

/// Evaluate every sheet of a workbook against a reporting period.
///
/// The period parses once up front and its failure is the only fatal error;
/// everything past it degrades locally (sheets with no data are omitted,
/// rows with unreadable dates just never select). Sheets are independent of
/// one another and results come back in input order.
pub fn evaluate_workbook(
    sheets: &[Sheet],
    period: &str,
    keywords: &FieldKeywords,
) -> Result<Vec<SheetResult>, PeriodError> {
    let range = parse_period(period)?;
    tracing::info!(period = %range, sheets = sheets.len(), "evaluating workbook");

    let mut results = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        match evaluate_sheet(sheet, &range, keywords) {
            Some(result) => results.push(result),
            None => tracing::debug!(sheet = %sheet.name, "sheet skipped, no data rows"),
        }
    }
    Ok(results)
}

/// Clean, map, project, and select one sheet. `None` when cleaning decides
/// the sheet holds no data.
pub fn evaluate_sheet(
    sheet: &Sheet,
    range: &DateRange,
    keywords: &FieldKeywords,
) -> Option<SheetResult> {
    let cleaned = clean_sheet(sheet)?;
    let mapping = assign_columns(&cleaned.headers, keywords);
    let records = project_rows(&cleaned, &mapping);
    let selected = is_selected(&records, &mapping, range);
    tracing::debug!(sheet = %cleaned.name, rows = records.len(), selected, "sheet mapped");

    Some(SheetResult {
        sheet_name: cleaned.name.clone(),
        column_mapping: mapping,
        mapped_data: records,
        columns: cleaned.headers.clone(),
        selected,
    })
}

/// True when at least one record's date parses and falls inside the range,
/// both bounds inclusive. A sheet with no Date column bound is never
/// selected. Short-circuits on the first qualifying row.
pub fn is_selected(records: &[MappedRecord], mapping: &ColumnMapping, range: &DateRange) -> bool {
    if mapping.header_for(CanonicalField::Date).is_none() {
        return false;
    }
    records
        .iter()
        .filter_map(|record| cell_date(&record.date))
        .any(|date| range.contains(date))
}
