use sheetmap_core::{CanonicalField, ColumnMapping, FieldKeywords, MappedRecord, Sheet};

use crate::classify::classify_header;

/// Assign each header to a canonical field, left to right.
///
/// First claim wins: once a field is bound, later headers that classify to
/// the same field fall into `Other` even if they would have scored higher.
/// Downstream consumers depend on that stable outcome, so a
/// better-fit-displaces-earlier policy must not be introduced here; build it
/// on [`crate::classify::best_match`] behind the same `ColumnMapping` type
/// instead.
pub fn assign_columns(headers: &[String], keywords: &FieldKeywords) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();
    for header in headers {
        match classify_header(header, keywords) {
            Some(field) if mapping.header_for(field).is_none() => {
                tracing::debug!(header = %header, field = %field, "column bound");
                mapping.bind(field, header.clone());
            }
            _ => mapping.other.push(header.clone()),
        }
    }
    mapping
}

/// Reduce every row of a cleaned sheet to one four-field record. Unmapped
/// fields and cells missing under a mapped header come through as `Empty`.
pub fn project_rows(sheet: &Sheet, mapping: &ColumnMapping) -> Vec<MappedRecord> {
    (0..sheet.rows.len())
        .map(|row| {
            let field_cell = |field: CanonicalField| match mapping.header_for(field) {
                Some(header) => sheet.cell(row, header),
                None => sheetmap_core::CellValue::Empty,
            };
            MappedRecord {
                amount: field_cell(CanonicalField::Amount),
                date: field_cell(CanonicalField::Date),
                description: field_cell(CanonicalField::Description),
                disallowable_expenses: field_cell(CanonicalField::DisallowableExpenses),
            }
        })
        .collect()
}
