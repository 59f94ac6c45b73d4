use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use sheetmap_core::CellValue;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_weekday,
    r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tue|wed|thu|fri|sat|sun)\b");
re!(re_ordinal,
    r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b");

// ── Format tables ────────────────────────────────────────────────────────────

// Date+time first so a trailing time is consumed rather than failing the
// bare-date formats. The time component is discarded for range comparison.
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

// Day-first before anything else. Two-digit-year forms must come before
// their four-digit twins: %Y happily eats "25" as year 25, while %y on a
// four-digit year leaves trailing digits and fails cleanly, so this order is
// the only one that resolves both "24/7/25" and "24/7/2025" correctly.
// Month-first forms sit last, reached only when the day slot cannot hold the
// first number (e.g. "07/24/2025").
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%d/%b/%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
];

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Day-first parse over the known format tables. `chrono`'s `%b` accepts
/// both abbreviated and full month names, so "24 Jul 2025" and
/// "24 July 2025" share an entry.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Like [`parse_date`], but tolerant of the noise found in real date cells:
/// weekday prefixes, ordinal day suffixes, stray commas.
pub fn parse_date_lenient(text: &str) -> Option<NaiveDate> {
    if let Some(d) = parse_date(text) {
        return Some(d);
    }
    parse_date(&scrub(text))
}

/// Resolve a raw cell to a calendar date, if it holds one. Native datetime
/// cells short-circuit; empty cells are unparsable; everything else goes
/// through the lenient text parse.
pub fn cell_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Empty => None,
        other => other.as_text().as_deref().and_then(parse_date_lenient),
    }
}

fn scrub(text: &str) -> String {
    let s = re_weekday().replace_all(text, " ");
    let s = s.replace(',', " ");
    let s = re_ordinal().replace_all(&s, "$1");
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
