//! Input schema for listing datasets.
//!
//! The rule catalog reads a fixed set of columns. Presence is checked once,
//! right after load, so rule evaluation never discovers a missing column
//! mid-run.

use std::collections::HashSet;

/// Column names the rule catalog reads.
pub mod columns {
    pub const MIN_VALUE: &str = "min_value";
    pub const MAX_VALUE: &str = "max_value";
    pub const AVAILABLE: &str = "available";
    pub const SIZE: &str = "size";
    pub const TYPE: &str = "type";
    pub const ADDRESS: &str = "address";
    pub const LISTING_LEVELS: &str = "listing_levels";
    pub const BUILTOUT_LEVELS: &str = "builtout_levels";
    pub const CATEGORY: &str = "category";
    pub const CONDO_STATUS_1: &str = "condo_status_1";
    pub const CONDO_STATUS_2: &str = "condo_status_2";
    pub const SUITE: &str = "suite";
    pub const URL: &str = "url";

    /// Derived at load time: `listing_levels` coerced to Float64, null when
    /// unparseable. Never required in the input.
    pub const LISTING_LEVELS_NUMERIC: &str = "listing_levels_numeric";
}

/// Columns an input file must provide, in schema order.
pub const REQUIRED_COLUMNS: [&str; 13] = [
    columns::MIN_VALUE,
    columns::MAX_VALUE,
    columns::AVAILABLE,
    columns::SIZE,
    columns::TYPE,
    columns::ADDRESS,
    columns::LISTING_LEVELS,
    columns::BUILTOUT_LEVELS,
    columns::CATEGORY,
    columns::CONDO_STATUS_1,
    columns::CONDO_STATUS_2,
    columns::SUITE,
    columns::URL,
];

/// Required columns absent from `present`, in schema order.
pub fn missing_columns<'a, I>(present: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: HashSet<&str> = present.into_iter().collect();
    REQUIRED_COLUMNS
        .iter()
        .filter(|name| !present.contains(*name))
        .map(|name| (*name).to_string())
        .collect()
}
