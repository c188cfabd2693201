// harmonia/src/commands/run.rs
//
// USE CASE: Harmonize all sources into the canonical table.

use std::path::PathBuf;

use anyhow::Context;
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::arrow::util::pretty::pretty_format_batches;
use harmonia_core::application::run_harmonization;
use harmonia_core::infrastructure::config::load_project_config;

use super::print_findings;

pub async fn execute(project_dir: PathBuf, limit: Option<usize>) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {} (v{})", config.name, config.version);

    // B. Harmonize (Application Layer)
    println!("🔗 Harmonizing sources...");
    let result = match run_harmonization(&project_dir, &config).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("\n💥 CRITICAL HARMONIZATION ERROR: {}", e);
            std::process::exit(1);
        }
    };

    // C. Output
    let shown = truncate(&result.batches, limit.unwrap_or(usize::MAX));
    println!("{}", pretty_format_batches(&shown)?);
    if shown.iter().map(|b| b.num_rows()).sum::<usize>() < result.row_count {
        println!("   ... ({} rows total)", result.row_count);
    }

    println!("\n📊 Findings:");
    print_findings(&result.report);

    println!(
        "\n✨ SUCCESS! {} tables, {} rows harmonized in {:.2?}",
        result.report.tables.len(),
        result.row_count,
        start.elapsed()
    );
    Ok(())
}

/// First `limit` rows, keeping batch boundaries.
fn truncate(batches: &[RecordBatch], limit: usize) -> Vec<RecordBatch> {
    let mut remaining = limit;
    let mut out = Vec::new();
    for batch in batches {
        if remaining == 0 {
            break;
        }
        let take = batch.num_rows().min(remaining);
        out.push(batch.slice(0, take));
        remaining -= take;
    }
    out
}
