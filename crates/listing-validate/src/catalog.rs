//! The fixed rule catalog.
//!
//! Order is load-bearing: earlier rules claim record keys before later ones
//! see them, so reordering changes which sheet a record lands on.

use listing_model::{Check, Rule};

/// Builds the eleven-rule catalog in evaluation order.
pub fn catalog() -> Vec<Rule> {
    vec![
        Rule::new(
            1,
            "1. Value Over Limit",
            "Records where either min_value or max_value are over 150.",
            Check::ValueOverLimit,
        ),
        Rule::new(
            2,
            "2. Available > Size",
            "Records where available is greater than size.",
            Check::AvailableExceedsSize,
        ),
        Rule::new(
            3,
            "3. Type Null",
            "Records where type column has NULL values.",
            Check::TypeNull,
        ),
        Rule::new(
            4,
            "4. Type Not Specified Null Addr",
            "Records where type column is not 'SPECIFIED' and address column is NULL.",
            Check::TypeNotSpecifiedNullAddress,
        ),
        Rule::new(
            5,
            "5. Size 0 or Null",
            "Records where size column includes '0' or NULL values.",
            Check::SizeZeroOrNull,
        ),
        Rule::new(
            6,
            "6. Size 0 or Null Type Not Specified",
            "Records where size column includes '0' or NULL values and type column is not 'SPECIFIED'.",
            Check::SizeZeroOrNullTypeNotSpecified,
        ),
        Rule::new(
            7,
            "7. Duplicate Records",
            "Records where there are duplicate values in the available and suite columns with the same address.",
            Check::DuplicateTuple,
        ),
        Rule::new(
            8,
            "8. Levels Mismatch",
            "Records where listing_levels is greater than builtout_levels.",
            Check::LevelsMismatch,
        ),
        Rule::new(
            9,
            "9. Type Mismatch",
            "Records where type column is not 'SPECIFIED' but 'category' column is 'SPECIFIED'.",
            Check::TypeCategoryMismatch,
        ),
        Rule::new(
            10,
            "10. Condo Status Mismatch 1",
            "Records where condo_status_1 column is 'N' or Null and condo_status_2 column is 'Y'.",
            Check::CondoStatusMismatchOne,
        ),
        Rule::new(
            11,
            "11. Condo Status Mismatch 2",
            "Records where condo_status_2 column is 'N' or Null and condo_status_1 column is 'Y'.",
            Check::CondoStatusMismatchTwo,
        ),
    ]
}
