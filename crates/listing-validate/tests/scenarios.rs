//! Catalog scenarios over complete listing frames.

use polars::prelude::*;

use listing_validate::{Evaluation, catalog, evaluate};

#[derive(Clone)]
struct Listing {
    url: Option<&'static str>,
    min_value: Option<f64>,
    max_value: Option<f64>,
    available: Option<f64>,
    size: Option<f64>,
    listing_type: Option<&'static str>,
    address: Option<&'static str>,
    listing_levels: Option<&'static str>,
    builtout_levels: Option<f64>,
    category: Option<&'static str>,
    condo_status_1: Option<&'static str>,
    condo_status_2: Option<&'static str>,
    suite: Option<&'static str>,
}

impl Default for Listing {
    /// A listing no rule complains about.
    fn default() -> Self {
        Self {
            url: Some("https://listings.example/ok"),
            min_value: Some(100.0),
            max_value: Some(120.0),
            available: Some(2.0),
            size: Some(10.0),
            listing_type: Some("SPECIFIED"),
            address: Some("1 Main St"),
            listing_levels: Some("2"),
            builtout_levels: Some(3.0),
            category: Some("SPECIFIED"),
            condo_status_1: Some("Y"),
            condo_status_2: Some("Y"),
            suite: Some("100"),
        }
    }
}

fn frame(listings: &[Listing]) -> DataFrame {
    df! {
        "url" => listings.iter().map(|l| l.url).collect::<Vec<_>>(),
        "min_value" => listings.iter().map(|l| l.min_value).collect::<Vec<_>>(),
        "max_value" => listings.iter().map(|l| l.max_value).collect::<Vec<_>>(),
        "available" => listings.iter().map(|l| l.available).collect::<Vec<_>>(),
        "size" => listings.iter().map(|l| l.size).collect::<Vec<_>>(),
        "type" => listings.iter().map(|l| l.listing_type).collect::<Vec<_>>(),
        "address" => listings.iter().map(|l| l.address).collect::<Vec<_>>(),
        "listing_levels" => listings.iter().map(|l| l.listing_levels).collect::<Vec<_>>(),
        "builtout_levels" => listings.iter().map(|l| l.builtout_levels).collect::<Vec<_>>(),
        "category" => listings.iter().map(|l| l.category).collect::<Vec<_>>(),
        "condo_status_1" => listings.iter().map(|l| l.condo_status_1).collect::<Vec<_>>(),
        "condo_status_2" => listings.iter().map(|l| l.condo_status_2).collect::<Vec<_>>(),
        "suite" => listings.iter().map(|l| l.suite).collect::<Vec<_>>(),
    }
    .unwrap()
}

fn rows_for(evaluation: &Evaluation, rule_number: u8) -> usize {
    evaluation
        .outcomes
        .iter()
        .find(|outcome| outcome.rule.number == rule_number)
        .map(|outcome| outcome.rows.height())
        .unwrap()
}

#[test]
fn clean_dataset_flags_nothing() {
    let df = frame(&[Listing::default()]);
    let evaluation = evaluate(&df, &catalog()).unwrap();

    for outcome in &evaluation.outcomes {
        assert_eq!(
            outcome.rows.height(),
            0,
            "rule {} flagged a clean listing",
            outcome.rule.number
        );
    }
    assert!(evaluation.flagged.is_empty());
}

#[test]
fn shared_tuple_lands_in_duplicate_records_only() {
    let df = frame(&[
        Listing {
            url: Some("https://listings.example/1"),
            available: Some(1.0),
            suite: Some("A"),
            address: Some("X"),
            ..Listing::default()
        },
        Listing {
            url: Some("https://listings.example/2"),
            available: Some(1.0),
            suite: Some("A"),
            address: Some("X"),
            ..Listing::default()
        },
    ]);
    let evaluation = evaluate(&df, &catalog()).unwrap();

    assert_eq!(rows_for(&evaluation, 7), 2);
    for outcome in &evaluation.outcomes {
        if outcome.rule.number != 7 {
            assert_eq!(
                outcome.rows.height(),
                0,
                "rule {} should be empty",
                outcome.rule.number
            );
        }
    }
    assert_eq!(evaluation.flagged.len(), 2);
}

#[test]
fn zero_size_null_type_goes_to_type_null_sheet() {
    let df = frame(&[Listing {
        size: Some(0.0),
        listing_type: None,
        ..Listing::default()
    }]);
    let evaluation = evaluate(&df, &catalog()).unwrap();

    // Rule 3 precedes rules 5 and 6 and claims the key first.
    assert_eq!(rows_for(&evaluation, 3), 1);
    assert_eq!(rows_for(&evaluation, 5), 0);
    assert_eq!(rows_for(&evaluation, 6), 0);
    assert_eq!(evaluation.total_flagged_rows(), 1);
}

#[test]
fn min_value_over_limit_is_rule_one() {
    let df = frame(&[Listing {
        min_value: Some(200.0),
        max_value: Some(50.0),
        ..Listing::default()
    }]);
    let evaluation = evaluate(&df, &catalog()).unwrap();

    assert_eq!(rows_for(&evaluation, 1), 1);
    assert_eq!(evaluation.total_flagged_rows(), 1);
}

#[test]
fn unparseable_levels_never_flag_rule_eight() {
    let df = frame(&[Listing {
        listing_levels: Some("penthouse"),
        builtout_levels: Some(0.0),
        ..Listing::default()
    }]);
    let evaluation = evaluate(&df, &catalog()).unwrap();

    assert_eq!(rows_for(&evaluation, 8), 0);
    assert_eq!(evaluation.total_flagged_rows(), 0);
}

#[test]
fn numeric_levels_above_builtout_flag_rule_eight() {
    let df = frame(&[Listing {
        listing_levels: Some("4"),
        builtout_levels: Some(2.0),
        ..Listing::default()
    }]);
    let evaluation = evaluate(&df, &catalog()).unwrap();

    assert_eq!(rows_for(&evaluation, 8), 1);
}

#[test]
fn earlier_rule_claims_key_before_duplicates() {
    // Both rows break rule 1 and share a duplicate tuple; rule 1 wins.
    let df = frame(&[
        Listing {
            url: Some("https://listings.example/1"),
            min_value: Some(500.0),
            available: Some(1.0),
            suite: Some("A"),
            address: Some("X"),
            ..Listing::default()
        },
        Listing {
            url: Some("https://listings.example/2"),
            min_value: Some(500.0),
            available: Some(1.0),
            suite: Some("A"),
            address: Some("X"),
            ..Listing::default()
        },
    ]);
    let evaluation = evaluate(&df, &catalog()).unwrap();

    assert_eq!(rows_for(&evaluation, 1), 2);
    assert_eq!(rows_for(&evaluation, 7), 0);
}
