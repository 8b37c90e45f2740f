//! First-match-wins rule evaluation.
//!
//! The engine folds the catalog over the table: each rule sees the flagged-key
//! set accumulated by the rules before it, emits only rows whose key is still
//! unclaimed, and passes the grown set along. No hidden state; running the
//! same table through the same catalog always yields the same outcomes.

use anyhow::Result;
use polars::prelude::{DataFrame, UInt32Chunked};
use tracing::debug;

use listing_model::{FlaggedKeys, Rule};

use crate::context::TableContext;

/// One rule's output: the rule and the rows it newly flagged.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub rule: Rule,
    pub rows: DataFrame,
}

impl RuleOutcome {
    pub fn flagged_count(&self) -> usize {
        self.rows.height()
    }
}

/// Everything one evaluation run produced, in catalog order.
#[derive(Debug)]
pub struct Evaluation {
    pub outcomes: Vec<RuleOutcome>,
    pub flagged: FlaggedKeys,
}

impl Evaluation {
    pub fn total_flagged_rows(&self) -> usize {
        self.outcomes.iter().map(RuleOutcome::flagged_count).sum()
    }
}

/// Evaluates every rule against the table in catalog order.
///
/// Each rule always produces an outcome, even an empty one; the report
/// relies on that to build a complete table of contents.
pub fn evaluate(df: &DataFrame, rules: &[Rule]) -> Result<Evaluation> {
    let ctx = TableContext::prepare(df)?;
    let mut flagged = FlaggedKeys::new();
    let mut outcomes = Vec::with_capacity(rules.len());

    for rule in rules {
        let outcome = evaluate_rule(df, &ctx, rule, &mut flagged)?;
        outcomes.push(outcome);
    }

    debug!(
        rules = rules.len(),
        flagged_rows = outcomes.iter().map(RuleOutcome::flagged_count).sum::<usize>(),
        flagged_keys = flagged.len(),
        "evaluation complete"
    );
    Ok(Evaluation { outcomes, flagged })
}

fn evaluate_rule(
    df: &DataFrame,
    ctx: &TableContext,
    rule: &Rule,
    flagged: &mut FlaggedKeys,
) -> Result<RuleOutcome> {
    let mut indices: Vec<u32> = Vec::new();
    let mut claimed: Vec<String> = Vec::new();

    for idx in 0..ctx.height() {
        if !ctx.matches(rule.check, idx) {
            continue;
        }
        match ctx.key(idx) {
            Some(key) => {
                // Keys claimed by an earlier rule are skipped; keys claimed
                // within this rule still emit every matching row.
                if flagged.contains(key) {
                    continue;
                }
                claimed.push(key.to_string());
                indices.push(idx as u32);
            }
            // Rows without a key are exempt from dedup tracking.
            None => indices.push(idx as u32),
        }
    }

    flagged.extend(claimed);

    let idx = UInt32Chunked::from_vec("idx".into(), indices);
    let rows = df.take(&idx)?;
    debug!(
        rule = rule.number,
        title = %rule.title,
        flagged_rows = rows.height(),
        "evaluated rule"
    );

    Ok(RuleOutcome {
        rule: rule.clone(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    use crate::catalog::catalog;

    fn frame(
        urls: Vec<Option<&str>>,
        sizes: Vec<Option<f64>>,
        types: Vec<Option<&str>>,
    ) -> DataFrame {
        let n = urls.len();
        df! {
            "url" => urls,
            "min_value" => vec![None::<f64>; n],
            "max_value" => vec![None::<f64>; n],
            "available" => vec![None::<f64>; n],
            "size" => sizes,
            "type" => types,
            "address" => vec![Some("addr"); n],
            "listing_levels" => vec![None::<&str>; n],
            "builtout_levels" => vec![None::<f64>; n],
            "category" => vec![None::<&str>; n],
            "condo_status_1" => vec![None::<&str>; n],
            "condo_status_2" => vec![None::<&str>; n],
            "suite" => (0..n).map(|i| Some(format!("suite-{i}"))).collect::<Vec<_>>(),
        }
        .unwrap()
    }

    fn outcome_rows(evaluation: &Evaluation, rule_number: u8) -> usize {
        evaluation
            .outcomes
            .iter()
            .find(|outcome| outcome.rule.number == rule_number)
            .map(RuleOutcome::flagged_count)
            .unwrap()
    }

    #[test]
    fn every_rule_yields_an_outcome() {
        let df = frame(
            vec![Some("https://a")],
            vec![Some(10.0)],
            vec![Some("SPECIFIED")],
        );
        let evaluation = evaluate(&df, &catalog()).unwrap();

        assert_eq!(evaluation.outcomes.len(), 11);
        assert_eq!(evaluation.total_flagged_rows(), 0);
        assert!(evaluation.flagged.is_empty());
        for outcome in &evaluation.outcomes {
            assert_eq!(outcome.rows.height(), 0);
        }
    }

    #[test]
    fn first_matching_rule_claims_the_key() {
        // Null type and null size: matches rules 3 and 5, lands in 3 only.
        let df = frame(vec![Some("https://a")], vec![None], vec![None]);
        let evaluation = evaluate(&df, &catalog()).unwrap();

        assert_eq!(outcome_rows(&evaluation, 3), 1);
        assert_eq!(outcome_rows(&evaluation, 5), 0);
        assert_eq!(outcome_rows(&evaluation, 6), 0);
        assert_eq!(evaluation.flagged.len(), 1);
    }

    #[test]
    fn same_key_rows_all_emit_within_one_rule() {
        let df = frame(
            vec![Some("https://a"), Some("https://a")],
            vec![Some(0.0), Some(0.0)],
            vec![Some("SPECIFIED"), Some("SPECIFIED")],
        );
        let evaluation = evaluate(&df, &catalog()).unwrap();

        // Both rows share a key; rule 5 is the first match and takes both.
        assert_eq!(outcome_rows(&evaluation, 5), 2);
        assert_eq!(outcome_rows(&evaluation, 6), 0);
        assert_eq!(evaluation.flagged.len(), 1);
    }

    #[test]
    fn null_keyed_rows_are_never_deduplicated() {
        // Matches rule 3 (null type) and rule 5 (null size); with no key it
        // must appear in both outputs.
        let df = frame(vec![None], vec![None], vec![None]);
        let evaluation = evaluate(&df, &catalog()).unwrap();

        assert_eq!(outcome_rows(&evaluation, 3), 1);
        assert_eq!(outcome_rows(&evaluation, 5), 1);
        assert_eq!(outcome_rows(&evaluation, 6), 0);
        assert!(evaluation.flagged.is_empty());
    }

    #[test]
    fn blank_key_counts_as_null() {
        let df = frame(vec![Some("   ")], vec![None], vec![None]);
        let evaluation = evaluate(&df, &catalog()).unwrap();

        assert_eq!(outcome_rows(&evaluation, 3), 1);
        assert_eq!(outcome_rows(&evaluation, 5), 1);
        assert!(evaluation.flagged.is_empty());
    }

    #[test]
    fn outcome_rows_keep_all_columns() {
        let df = frame(vec![Some("https://a")], vec![None], vec![Some("RETAIL")]);
        let evaluation = evaluate(&df, &catalog()).unwrap();

        let outcome = evaluation
            .outcomes
            .iter()
            .find(|outcome| outcome.rule.number == 5)
            .unwrap();
        assert_eq!(outcome.rows.height(), 1);
        assert_eq!(outcome.rows.width(), df.width());
    }
}
