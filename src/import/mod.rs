//! Delimited-text import: tokenizing, column role inference, validation and
//! normalization into records the chart state can merge.

mod column_roles;
mod delimiter;
mod numeric;
mod session;
mod tokenizer;
mod validation;

pub use column_roles::{ColumnMapping, ColumnRole};
pub use delimiter::Delimiter;
pub use numeric::{DecimalSeparator, parse_numeric};
pub use session::{ImportOutcome, ImportSession, ImportedRecord, MAX_IMPORT_ROWS};
pub use tokenizer::{ParsedTable, parse_delimited};
pub use validation::{ImportIssue, ValidationReport, validate_rows};
