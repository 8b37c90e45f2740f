pub mod error;
pub mod flags;
pub mod rule;
pub mod schema;
pub mod sheet;

pub use error::{AuditError, Result};
pub use flags::FlaggedKeys;
pub use rule::{Check, Rule};
pub use schema::{REQUIRED_COLUMNS, columns, missing_columns};
pub use sheet::{
    MAX_SHEET_NAME_LEN, ORIGINAL_DATA_DESCRIPTION, ORIGINAL_DATA_SHEET, TOC_SHEET, TocEntry,
    sanitize_sheet_name,
};
