//! Typed row access for rule predicates.
//!
//! Columns are pulled out of the `DataFrame` once per run, so each predicate
//! is a plain index lookup instead of a per-row `AnyValue` dance. Null
//! semantics live here: comparisons against a null operand are false unless
//! the check explicitly asks for null.

use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::{AnyValue, DataFrame};

use listing_ingest::{any_to_f64, any_to_trimmed, format_numeric};
use listing_model::{Check, columns};

/// Threshold for rule 1: min_value/max_value above this are flagged.
const VALUE_LIMIT: f64 = 150.0;

const SPECIFIED: &str = "SPECIFIED";

/// Column vectors for one evaluation run, plus the precomputed global
/// duplicate-tuple mask for rule 7.
pub struct TableContext {
    height: usize,
    min_value: Vec<Option<f64>>,
    max_value: Vec<Option<f64>>,
    available: Vec<Option<f64>>,
    size: Vec<Option<f64>>,
    builtout_levels: Vec<Option<f64>>,
    levels_numeric: Vec<Option<f64>>,
    listing_type: Vec<Option<String>>,
    address: Vec<Option<String>>,
    category: Vec<Option<String>>,
    condo_status_1: Vec<Option<String>>,
    condo_status_2: Vec<Option<String>>,
    keys: Vec<Option<String>>,
    duplicate_tuple: Vec<bool>,
}

impl TableContext {
    /// Extracts every column the catalog reads. The loader has already
    /// checked presence, so a missing column here is a programming error
    /// surfaced as a DataFrame lookup failure.
    pub fn prepare(df: &DataFrame) -> Result<Self> {
        let available = numeric_column(df, columns::AVAILABLE)?;
        let suite = string_column(df, columns::SUITE)?;
        let address = string_column(df, columns::ADDRESS)?;
        let duplicate_tuple = duplicate_tuple_mask(&available, &suite, &address);

        // Rule 8 coerces the raw listing_levels text itself; the parser is
        // the same one the loader uses for the derived column, so both views
        // agree by construction.
        let levels_numeric = numeric_column(df, columns::LISTING_LEVELS)?;

        Ok(Self {
            height: df.height(),
            min_value: numeric_column(df, columns::MIN_VALUE)?,
            max_value: numeric_column(df, columns::MAX_VALUE)?,
            available,
            size: numeric_column(df, columns::SIZE)?,
            builtout_levels: numeric_column(df, columns::BUILTOUT_LEVELS)?,
            levels_numeric,
            listing_type: string_column(df, columns::TYPE)?,
            address,
            category: string_column(df, columns::CATEGORY)?,
            condo_status_1: string_column(df, columns::CONDO_STATUS_1)?,
            condo_status_2: string_column(df, columns::CONDO_STATUS_2)?,
            keys: string_column(df, columns::URL)?,
            duplicate_tuple,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The dedup key for a row; `None` when the url cell is null or blank.
    pub fn key(&self, idx: usize) -> Option<&str> {
        self.keys[idx].as_deref()
    }

    /// Evaluates one predicate against one row.
    pub fn matches(&self, check: Check, idx: usize) -> bool {
        match check {
            Check::ValueOverLimit => {
                exceeds(self.min_value[idx], VALUE_LIMIT)
                    || exceeds(self.max_value[idx], VALUE_LIMIT)
            }
            Check::AvailableExceedsSize => greater(self.available[idx], self.size[idx]),
            Check::TypeNull => self.listing_type[idx].is_none(),
            Check::TypeNotSpecifiedNullAddress => {
                is_not_specified(&self.listing_type[idx]) && self.address[idx].is_none()
            }
            Check::SizeZeroOrNull => size_zero_or_null(self.size[idx]),
            Check::SizeZeroOrNullTypeNotSpecified => {
                size_zero_or_null(self.size[idx]) && is_not_specified(&self.listing_type[idx])
            }
            Check::DuplicateTuple => self.duplicate_tuple[idx],
            Check::LevelsMismatch => greater(self.levels_numeric[idx], self.builtout_levels[idx]),
            Check::TypeCategoryMismatch => {
                is_not_specified(&self.listing_type[idx])
                    && self.category[idx].as_deref() == Some(SPECIFIED)
            }
            Check::CondoStatusMismatchOne => {
                no_or_null(&self.condo_status_1[idx]) && is_yes(&self.condo_status_2[idx])
            }
            Check::CondoStatusMismatchTwo => {
                no_or_null(&self.condo_status_2[idx]) && is_yes(&self.condo_status_1[idx])
            }
        }
    }
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_trimmed(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Marks every row whose (available, suite, address) tuple occurs at least
/// twice. Computed over the whole table, before any dedup filtering; null
/// components compare equal to each other.
fn duplicate_tuple_mask(
    available: &[Option<f64>],
    suite: &[Option<String>],
    address: &[Option<String>],
) -> Vec<bool> {
    let mut counts: HashMap<(Option<String>, Option<String>, Option<String>), u32> =
        HashMap::new();
    let mut keys = Vec::with_capacity(available.len());
    for idx in 0..available.len() {
        let key = (
            available[idx].map(format_numeric),
            suite[idx].clone(),
            address[idx].clone(),
        );
        *counts.entry(key.clone()).or_insert(0) += 1;
        keys.push(key);
    }
    keys.into_iter().map(|key| counts[&key] >= 2).collect()
}

fn exceeds(value: Option<f64>, limit: f64) -> bool {
    value.is_some_and(|v| v > limit)
}

fn greater(left: Option<f64>, right: Option<f64>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => l > r,
        _ => false,
    }
}

fn size_zero_or_null(size: Option<f64>) -> bool {
    size.is_none_or(|v| v == 0.0)
}

/// Null compares false: a missing type is neither equal nor unequal to
/// SPECIFIED, so it does not count as "not specified".
fn is_not_specified(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| v != SPECIFIED)
}

fn no_or_null(value: &Option<String>) -> bool {
    match value.as_deref() {
        None => true,
        Some(v) => v == "N",
    }
}

fn is_yes(value: &Option<String>) -> bool {
    value.as_deref() == Some("Y")
}
