use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::field::CanonicalField;

/// A raw spreadsheet cell, carried through mapping without interpretation.
///
/// Untagged serde keeps the JSON natural: text as strings, numbers as
/// numbers, empty cells as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// Text rendering of a non-empty cell, for lenient date parsing.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(f.to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::DateTime(dt) => Some(dt.to_string()),
            CellValue::Empty => None,
        }
    }

    /// Empty, or text that trims to nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// One worksheet: a name, ordered headers, and rows of cells positioned by
/// header index. Source files guarantee neither that rows are as wide as the
/// header list nor that headers are unique; missing cells read as `Empty` and
/// a duplicated header resolves to its first position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Sheet {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell under `header` in row `row`, `Empty` when the header is unknown
    /// or the row is too short.
    pub fn cell(&self, row: usize, header: &str) -> CellValue {
        self.column_index(header)
            .and_then(|col| self.rows.get(row).and_then(|r| r.get(col)))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }
}

/// Where each canonical field was found in one sheet. A header lives in
/// exactly one place: bound to a single field, or listed in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(rename = "Amount")]
    pub amount: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "DisallowableExpenses")]
    pub disallowable_expenses: Option<String>,
    #[serde(rename = "Other")]
    pub other: Vec<String>,
}

impl ColumnMapping {
    pub fn header_for(&self, field: CanonicalField) -> Option<&str> {
        match field {
            CanonicalField::Amount => self.amount.as_deref(),
            CanonicalField::Date => self.date.as_deref(),
            CanonicalField::Description => self.description.as_deref(),
            CanonicalField::DisallowableExpenses => self.disallowable_expenses.as_deref(),
        }
    }

    pub fn bind(&mut self, field: CanonicalField, header: String) {
        let slot = match field {
            CanonicalField::Amount => &mut self.amount,
            CanonicalField::Date => &mut self.date,
            CanonicalField::Description => &mut self.description,
            CanonicalField::DisallowableExpenses => &mut self.disallowable_expenses,
        };
        *slot = Some(header);
    }
}

/// One row reduced to the four canonical fields. Unmapped fields and missing
/// cells carry `Empty`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappedRecord {
    #[serde(rename = "Amount")]
    pub amount: CellValue,
    #[serde(rename = "Date")]
    pub date: CellValue,
    #[serde(rename = "Description")]
    pub description: CellValue,
    #[serde(rename = "DisallowableExpenses")]
    pub disallowable_expenses: CellValue,
}

/// Evaluation output for one sheet. A pure function of the sheet, the
/// keyword registry, and the reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetResult {
    pub sheet_name: String,
    pub column_mapping: ColumnMapping,
    pub mapped_data: Vec<MappedRecord>,
    pub columns: Vec<String>,
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn cell_lookup_by_header_position() {
        let sheet = Sheet::new(
            "Q1",
            vec!["Date".to_string(), "Amount".to_string()],
            vec![vec![text("15/01/2025"), CellValue::Float(100.0)]],
        );
        assert_eq!(sheet.cell(0, "Amount"), CellValue::Float(100.0));
        assert_eq!(sheet.cell(0, "Missing"), CellValue::Empty);
    }

    #[test]
    fn short_row_reads_empty() {
        let sheet = Sheet::new(
            "Q1",
            vec!["Date".to_string(), "Amount".to_string()],
            vec![vec![text("15/01/2025")]],
        );
        assert_eq!(sheet.cell(0, "Amount"), CellValue::Empty);
    }

    #[test]
    fn duplicate_header_resolves_to_first_position() {
        let sheet = Sheet::new(
            "S",
            vec!["Amount".to_string(), "Amount".to_string()],
            vec![vec![CellValue::Int(1), CellValue::Int(2)]],
        );
        assert_eq!(sheet.cell(0, "Amount"), CellValue::Int(1));
    }

    #[test]
    fn blank_cells() {
        assert!(CellValue::Empty.is_blank());
        assert!(text("   ").is_blank());
        assert!(!text("x").is_blank());
        assert!(!CellValue::Int(0).is_blank());
        assert!(!CellValue::Bool(false).is_blank());
    }

    #[test]
    fn mapping_bind_and_lookup() {
        let mut mapping = ColumnMapping::default();
        assert!(mapping.header_for(CanonicalField::Date).is_none());
        mapping.bind(CanonicalField::Date, "Posting Date".to_string());
        assert_eq!(mapping.header_for(CanonicalField::Date), Some("Posting Date"));
    }

    // ── wire shape ───────────────────────────────────────────────────────────

    #[test]
    fn sheet_result_serializes_canonical_names() {
        let result = SheetResult {
            sheet_name: "Q1".to_string(),
            column_mapping: ColumnMapping {
                amount: Some("Amt".to_string()),
                date: None,
                description: None,
                disallowable_expenses: None,
                other: vec!["Notes".to_string()],
            },
            mapped_data: vec![MappedRecord {
                amount: CellValue::Float(12.5),
                date: CellValue::Empty,
                description: text("coffee"),
                disallowable_expenses: CellValue::Empty,
            }],
            columns: vec!["Amt".to_string(), "Notes".to_string()],
            selected: false,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "sheet_name": "Q1",
                "column_mapping": {
                    "Amount": "Amt",
                    "Date": null,
                    "Description": null,
                    "DisallowableExpenses": null,
                    "Other": ["Notes"],
                },
                "mapped_data": [{
                    "Amount": 12.5,
                    "Date": null,
                    "Description": "coffee",
                    "DisallowableExpenses": null,
                }],
                "columns": ["Amt", "Notes"],
                "selected": false,
            })
        );
    }
}
