use sheetmap_core::DateRange;
use thiserror::Error;

use crate::dates::parse_date;

/// A standard UK tax quarter, handy as a caller-side fallback. Evaluation
/// never applies it implicitly; callers always pass a period.
pub const DEFAULT_PERIOD: &str = "6/4/2025-5/7/2025";

/// A malformed period aborts the whole workbook evaluation; nothing can be
/// selected without a range.
#[derive(Debug, Error)]
pub enum PeriodError {
    #[error("period must be \"<start>-<end>\", got {0:?}")]
    Malformed(String),
    #[error("unparsable period date {0:?}")]
    InvalidDate(String),
}

/// Parse `"<start>-<end>"` into a reporting range. Exactly one `-` may
/// separate the halves; both are trimmed and parsed day-first, so
/// `"6/4/2025-5/7/2025"` runs 6 April to 5 July.
pub fn parse_period(text: &str) -> Result<DateRange, PeriodError> {
    let parts: Vec<&str> = text.split('-').collect();
    let [start_raw, end_raw] = parts.as_slice() else {
        return Err(PeriodError::Malformed(text.to_string()));
    };
    let start_raw = start_raw.trim();
    let end_raw = end_raw.trim();
    if start_raw.is_empty() || end_raw.is_empty() {
        return Err(PeriodError::Malformed(text.to_string()));
    }

    let start = parse_date(start_raw)
        .ok_or_else(|| PeriodError::InvalidDate(start_raw.to_string()))?;
    let end = parse_date(end_raw).ok_or_else(|| PeriodError::InvalidDate(end_raw.to_string()))?;
    Ok(DateRange::new(start, end))
}
