//! Report assembly: fixes the sheet order and builds the matching
//! table-of-contents entries before anything touches the writer.

use polars::prelude::DataFrame;

use listing_model::{ORIGINAL_DATA_DESCRIPTION, ORIGINAL_DATA_SHEET, TocEntry};
use listing_validate::RuleOutcome;

/// One named data sheet in the output workbook.
#[derive(Debug, Clone)]
pub struct ReportSheet {
    /// Worksheet tab name, already sanitized for xlsx.
    pub name: String,
    pub table: DataFrame,
}

/// The assembled report: data sheets in final order plus one
/// table-of-contents entry per sheet.
#[derive(Debug, Clone)]
pub struct Report {
    pub toc: Vec<TocEntry>,
    pub sheets: Vec<ReportSheet>,
}

impl Report {
    /// Data sheets plus the table of contents itself.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len() + 1
    }
}

/// Builds the report structure: the original dataset first, then one sheet
/// per rule in catalog order.
///
/// A rule that flagged nothing still gets a sheet, so the table of contents
/// always lists the full catalog and reviewers can see at a glance that a
/// rule ran clean.
pub fn assemble(original: &DataFrame, outcomes: &[RuleOutcome]) -> Report {
    let mut toc = Vec::with_capacity(outcomes.len() + 1);
    let mut sheets = Vec::with_capacity(outcomes.len() + 1);

    toc.push(TocEntry::new(ORIGINAL_DATA_SHEET, ORIGINAL_DATA_DESCRIPTION));
    sheets.push(ReportSheet {
        name: ORIGINAL_DATA_SHEET.to_string(),
        table: original.clone(),
    });

    for outcome in outcomes {
        let name = outcome.rule.sheet_name();
        toc.push(TocEntry::new(name.clone(), outcome.rule.description.clone()));
        sheets.push(ReportSheet {
            name,
            table: outcome.rows.clone(),
        });
    }

    Report { toc, sheets }
}
