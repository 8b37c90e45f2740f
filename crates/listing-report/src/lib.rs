//! Listing audit report generation.
//!
//! Turns a validated dataset and its rule outcomes into a single xlsx
//! workbook:
//!
//! - **Table of Contents**: one row per data sheet with a jump link
//! - **Original Data**: the input dataset as loaded
//! - **Rule sheets**: the rows flagged by each rule, one sheet per rule

mod report;
mod workbook;

pub use report::{Report, ReportSheet, assemble};
pub use workbook::write_report;
