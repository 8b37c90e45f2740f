//! Sheet naming and table-of-contents metadata for the output workbook.

use serde::{Deserialize, Serialize};

/// Name of the navigation sheet, written first in the workbook.
pub const TOC_SHEET: &str = "Table of Contents";
/// Name of the sheet carrying the full input dataset.
pub const ORIGINAL_DATA_SHEET: &str = "Original Data";
/// Table-of-contents description for the original data sheet.
pub const ORIGINAL_DATA_DESCRIPTION: &str = "The original dataset provided.";

/// xlsx caps worksheet names at 31 characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// One table-of-contents row: a sheet and its one-line description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub sheet_name: String,
    pub description: String,
}

impl TocEntry {
    pub fn new(sheet_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            description: description.into(),
        }
    }
}

/// Makes `name` valid for an xlsx worksheet tab.
///
/// Replaces the characters xlsx forbids with spaces and truncates to
/// [`MAX_SHEET_NAME_LEN`] characters. The sanitized name must be used both
/// when creating the worksheet and in any internal link pointing at it,
/// otherwise the link dangles.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => ' ',
            _ => c,
        })
        .collect();
    let truncated: String = cleaned.trim().chars().take(MAX_SHEET_NAME_LEN).collect();
    let out = truncated.trim_end();
    if out.is_empty() {
        "Sheet".to_string()
    } else {
        out.to_string()
    }
}
