pub mod classify;
pub mod clean;
pub mod dates;
pub mod mapping;
pub mod period;
pub mod workbook;
pub mod xlsx;
pub(crate) mod util;

pub use classify::{best_match, classify_header, normalize_header, FieldMatch, MATCH_THRESHOLD};
pub use clean::clean_sheet;
pub use dates::{cell_date, parse_date, parse_date_lenient};
pub use mapping::{assign_columns, project_rows};
pub use period::{parse_period, PeriodError, DEFAULT_PERIOD};
pub use workbook::evaluate_workbook;
pub use xlsx::{
    evaluate_xlsx_bytes, evaluate_xlsx_path, read_workbook_bytes, read_workbook_path,
    EvaluateError, WorkbookError,
};
