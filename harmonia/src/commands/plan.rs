// harmonia/src/commands/plan.rs
//
// USE CASE: Dry run. Shows the binding decided for every (table, field) pair.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use harmonia_core::application::plan_project;
use harmonia_core::domain::harmonization::{FieldAction, HarmonizationReport};
use harmonia_core::infrastructure::config::load_project_config;

use super::print_findings;
use crate::cli::PlanFormat;

pub async fn execute(project_dir: PathBuf, format: PlanFormat) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;

    let report = match plan_project(&project_dir, &config).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("💥 Planning failed: {}", e);
            std::process::exit(1);
        }
    };

    match format {
        PlanFormat::Json => {
            // Raw JSON only, so the output can be piped
            println!("{}", report.to_json()?);
        }
        PlanFormat::Table => {
            println!("🧭 Harmonization plan for {} (v{})", config.name, config.version);
            println!("{}", render(&report));
            println!("\n📊 Findings:");
            print_findings(&report);
        }
    }
    Ok(())
}

fn render(report: &HarmonizationReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Table", "Canonical field", "Source column", "Rule"]);

    for plan in &report.tables {
        for binding in &plan.bindings {
            let source = match &binding.action {
                FieldAction::Rename { source } => source.clone(),
                FieldAction::FillNull => "∅ (null)".to_string(),
            };
            let rule = binding
                .rule
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string());
            table.add_row(vec![plan.table.clone(), binding.field.clone(), source, rule]);
        }
    }
    table
}
