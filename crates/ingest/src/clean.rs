use sheetmap_core::Sheet;

/// Sheets whose name starts with this marker (case-insensitive) are known
/// non-data placeholders and are skipped outright.
const PLACEHOLDER_PREFIX: &str = "1 row null";

/// Drop vacuous rows and decide whether the sheet holds data at all.
///
/// A row is vacuous when every cell is empty or trims to empty text.
/// Returns `None` for placeholder-named sheets and for sheets left with no
/// rows, which are then omitted from results entirely. Surviving rows keep
/// their original order.
pub fn clean_sheet(sheet: &Sheet) -> Option<Sheet> {
    let rows: Vec<_> = sheet
        .rows
        .iter()
        .filter(|row| !row.iter().all(|cell| cell.is_blank()))
        .cloned()
        .collect();

    if rows.is_empty() {
        return None;
    }
    if sheet.name.to_lowercase().starts_with(PLACEHOLDER_PREFIX) {
        return None;
    }

    Some(Sheet::new(sheet.name.clone(), sheet.headers.clone(), rows))
}
