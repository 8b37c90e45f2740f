//! Rules as data: an ordinal, a sheet title, a description, and a predicate
//! tag the engine dispatches on.

use serde::{Deserialize, Serialize};

/// Predicate selector for one catalog rule.
///
/// Keeping the predicate a plain tag (rather than a closure) keeps rules
/// serializable and lets each check be unit-tested on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    ValueOverLimit,
    AvailableExceedsSize,
    TypeNull,
    TypeNotSpecifiedNullAddress,
    SizeZeroOrNull,
    SizeZeroOrNullTypeNotSpecified,
    DuplicateTuple,
    LevelsMismatch,
    TypeCategoryMismatch,
    CondoStatusMismatchOne,
    CondoStatusMismatchTwo,
}

/// A single validation rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Ordinal position in the catalog (1-based); evaluation order follows it.
    pub number: u8,
    /// Sheet title, e.g. "1. Value Over Limit".
    pub title: String,
    /// One-line description shown in the table of contents.
    pub description: String,
    /// Predicate tag the engine dispatches on.
    pub check: Check,
}

impl Rule {
    pub fn new(
        number: u8,
        title: impl Into<String>,
        description: impl Into<String>,
        check: Check,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            description: description.into(),
            check,
        }
    }

    /// Worksheet-safe name for this rule's output sheet.
    pub fn sheet_name(&self) -> String {
        crate::sheet::sanitize_sheet_name(&self.title)
    }
}
