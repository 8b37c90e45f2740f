use anyhow::Result;
use comfy_table::Table;

use listing_cli::pipeline::{AuditConfig, AuditSummary, default_output_path, run_audit};
use listing_validate::catalog;

use crate::cli::ProcessArgs;
use crate::summary::apply_table_style;

pub fn run_process(args: &ProcessArgs) -> Result<AuditSummary> {
    let output = args.output.clone().unwrap_or_else(default_output_path);
    let config = AuditConfig {
        input: args.input.clone(),
        output,
        enrich: args.enrich,
        enrich_rows: args.enrich_rows,
    };
    run_audit(&config)
}

pub fn run_rules() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Rule", "Sheet", "Description"]);
    apply_table_style(&mut table);
    for rule in catalog() {
        table.add_row(vec![
            rule.number.to_string(),
            rule.sheet_name(),
            rule.description,
        ]);
    }
    println!("{table}");
    Ok(())
}
