//! End-to-end tests for the audit pipeline.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use listing_cli::pipeline::{
    AuditConfig, RuleSummary, default_output_path, render_chunk, run_audit,
};
use listing_model::{Check, Rule};

const HEADER: &str = "url,min_value,max_value,available,size,type,address,\
listing_levels,builtout_levels,category,condo_status_1,condo_status_2,suite";

fn write_csv(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    path
}

#[test]
fn audit_writes_report_and_counts_flags() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(
        &dir,
        "listings.csv",
        &[
            "https://a,200,,1,10,SPECIFIED,1 Main St,2,3,SPECIFIED,Y,Y,100",
            "https://b,100,90,1,10,SPECIFIED,2 Side St,2,3,SPECIFIED,Y,Y,200",
        ],
    );
    let output = dir.path().join("out").join("report.xlsx");

    let summary = run_audit(&AuditConfig {
        input: input.clone(),
        output: output.clone(),
        enrich: false,
        enrich_rows: 20,
    })
    .unwrap();

    assert!(output.exists());
    assert_eq!(summary.input, input);
    assert_eq!(summary.row_count, 2);
    assert_eq!(summary.rules.len(), 11);
    assert_eq!(summary.rules[0].sheet_name, "1. Value Over Limit");
    assert_eq!(summary.rules[0].flagged_rows, 1);
    assert!(summary.rules[1..].iter().all(|rule| rule.flagged_rows == 0));
    assert_eq!(summary.distinct_flagged, 1);
    assert!(summary.commentary.is_empty());
}

#[test]
fn missing_columns_fail_the_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(&path, "url,size\nhttps://a,10\n").unwrap();

    let error = run_audit(&AuditConfig {
        input: path,
        output: dir.path().join("report.xlsx"),
        enrich: false,
        enrich_rows: 20,
    })
    .unwrap_err();

    let chain = format!("{error:#}");
    assert!(
        chain.contains("missing required columns"),
        "unexpected error: {chain}"
    );
}

#[test]
fn default_output_is_dated_xlsx_under_processed() {
    let path = default_output_path();
    let name = path.file_name().unwrap().to_str().unwrap();

    assert!(path.starts_with("processed"));
    assert!(name.starts_with("validated_data_"));
    assert!(name.ends_with(".xlsx"));
    assert_eq!(name.len(), "validated_data_YYYY-MM-DD.xlsx".len());
}

#[test]
fn rule_summaries_carry_sanitized_sheet_names() {
    let rule = Rule::new(
        6,
        "6. Size 0 or Null Type Not Specified",
        "Records where size column includes '0' or NULL values and type column is not 'SPECIFIED'.",
        Check::SizeZeroOrNullTypeNotSpecified,
    );

    let summary = RuleSummary::for_rule(&rule, 3);

    assert_eq!(summary.number, 6);
    // The console table shows the name the workbook tab actually carries.
    assert_eq!(summary.sheet_name, "6. Size 0 or Null Type Not Spec");
    assert_eq!(summary.description, rule.description);
    assert_eq!(summary.flagged_rows, 3);
}

#[test]
fn chunk_rendering_caps_rows_and_renders_cells() {
    use polars::prelude::*;

    let df = df! {
        "url" => ["https://a", "https://b", "https://c"],
        "size" => [Some(10.0), None, Some(0.5)],
    }
    .unwrap();

    let chunk = render_chunk(&df, 2);
    let lines: Vec<&str> = chunk.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "url=https://a, size=10");
    assert_eq!(lines[1], "url=https://b, size=");
}
