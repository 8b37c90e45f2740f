//! Audit pipeline with explicit stages.
//!
//! The pipeline runs these stages in order:
//! 1. **Load**: read and type-check the listing CSV
//! 2. **Validate**: run the rule catalog with first-match dedup
//! 3. **Report**: assemble and write the xlsx workbook
//! 4. **Enrich** (optional): request commentary for flagged rows
//!
//! Each stage returns typed results; the CLI front end only formats them.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use polars::prelude::{AnyValue, DataFrame};
use tracing::{info, info_span, warn};

use listing_enrich::CommentaryClient;
use listing_ingest::{any_to_string, load_csv};
use listing_model::Rule;
use listing_report::{assemble, write_report};
use listing_validate::{RuleOutcome, catalog, evaluate};

/// Default number of flagged rows per rule sent for commentary.
pub const DEFAULT_ENRICH_ROWS: usize = 20;

/// Settings for one audit run.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Request commentary for flagged rows after the report is written.
    pub enrich: bool,
    /// Maximum flagged rows per rule to send for commentary.
    pub enrich_rows: usize,
}

/// Typed result of a completed audit run.
#[derive(Debug)]
pub struct AuditSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Rows in the input dataset.
    pub row_count: usize,
    /// Per-rule flagged counts, in catalog order.
    pub rules: Vec<RuleSummary>,
    /// Distinct listing keys claimed across all rules.
    pub distinct_flagged: usize,
    /// Commentary per rule sheet; empty unless the run was enriched.
    pub commentary: Vec<RuleCommentary>,
}

/// One rule's contribution to the run.
#[derive(Debug)]
pub struct RuleSummary {
    pub number: u8,
    pub sheet_name: String,
    pub description: String,
    pub flagged_rows: usize,
}

impl RuleSummary {
    /// Summarizes one rule for the console table, using the same sanitized
    /// sheet name the workbook carries.
    pub fn for_rule(rule: &Rule, flagged_rows: usize) -> Self {
        Self {
            number: rule.number,
            sheet_name: rule.sheet_name(),
            description: rule.description.clone(),
            flagged_rows,
        }
    }
}

/// Commentary returned for one rule sheet.
#[derive(Debug)]
pub struct RuleCommentary {
    pub sheet_name: String,
    pub commentary: String,
}

/// Default report path: `processed/validated_data_<YYYY-MM-DD>.xlsx`.
pub fn default_output_path() -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    PathBuf::from("processed").join(format!("validated_data_{date}.xlsx"))
}

/// Runs the full audit: load, validate, write the report, and optionally
/// request commentary for the flagged rows.
pub fn run_audit(config: &AuditConfig) -> Result<AuditSummary> {
    let run_span = info_span!("audit", input = %config.input.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    // =========================================================================
    // Stage 1: Load
    // =========================================================================
    let df = load_csv(&config.input).with_context(|| format!("load {}", config.input.display()))?;

    // =========================================================================
    // Stage 2: Validate
    // =========================================================================
    let rules = catalog();
    let evaluation = evaluate(&df, &rules).context("evaluate rule catalog")?;

    // =========================================================================
    // Stage 3: Report
    // =========================================================================
    if let Some(parent) = config.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let report = assemble(&df, &evaluation.outcomes);
    write_report(&report, &config.output)
        .with_context(|| format!("write report {}", config.output.display()))?;

    // =========================================================================
    // Stage 4: Enrich (optional)
    // =========================================================================
    let commentary = if config.enrich {
        enrich_outcomes(&evaluation.outcomes, config.enrich_rows)
    } else {
        Vec::new()
    };

    let rule_summaries = evaluation
        .outcomes
        .iter()
        .map(|outcome| RuleSummary::for_rule(&outcome.rule, outcome.flagged_count()))
        .collect();

    info!(
        rows = df.height(),
        flagged_keys = evaluation.flagged.len(),
        output = %config.output.display(),
        duration_ms = start.elapsed().as_millis() as u64,
        "audit complete"
    );

    Ok(AuditSummary {
        input: config.input.clone(),
        output: config.output.clone(),
        row_count: df.height(),
        rules: rule_summaries,
        distinct_flagged: evaluation.flagged.len(),
        commentary,
    })
}

/// Requests commentary for every rule that flagged rows.
///
/// A missing API key downgrades enrichment to a warning and skips it
/// entirely; per-chunk failures come back as empty strings and are dropped.
/// Either way the report on disk is already complete.
fn enrich_outcomes(outcomes: &[RuleOutcome], max_rows: usize) -> Vec<RuleCommentary> {
    let client = match CommentaryClient::from_env() {
        Ok(client) => client,
        Err(error) => {
            warn!(%error, "enrichment disabled");
            return Vec::new();
        }
    };

    let mut commentary = Vec::new();
    for outcome in outcomes {
        if outcome.rows.height() == 0 {
            continue;
        }
        let sheet_name = outcome.rule.sheet_name();
        let chunk = render_chunk(&outcome.rows, max_rows);
        let span = info_span!("enrich", sheet = %sheet_name);
        let text = span.in_scope(|| client.review_chunk(&chunk));
        if text.is_empty() {
            continue;
        }
        commentary.push(RuleCommentary {
            sheet_name,
            commentary: text,
        });
    }
    commentary
}

/// Renders up to `max_rows` rows as one `name=value, ...` line per row.
///
/// Plain cell rendering rather than the polars `Display` table, so wide
/// frames are not elided before they reach the prompt.
pub fn render_chunk(df: &DataFrame, max_rows: usize) -> String {
    let names = df.get_column_names();
    let rows = df.height().min(max_rows);
    let mut lines = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut fields = Vec::with_capacity(names.len());
        for (column, name) in df.get_columns().iter().zip(&names) {
            let value = any_to_string(column.get(row).unwrap_or(AnyValue::Null));
            fields.push(format!("{name}={value}"));
        }
        lines.push(fields.join(", "));
    }
    lines.join("\n")
}
