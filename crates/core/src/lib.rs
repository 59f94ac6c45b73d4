pub mod field;
pub mod period;
pub mod sheet;

pub use field::{CanonicalField, FieldKeywords, RegistryError};
pub use period::DateRange;
pub use sheet::{CellValue, ColumnMapping, MappedRecord, Sheet, SheetResult};
