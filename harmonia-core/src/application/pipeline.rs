// harmonia-core/src/application/pipeline.rs
//
// USE CASE: load every source, harmonize, collect the canonical table.

use datafusion::arrow::record_batch::RecordBatch;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::harmonization::{ColumnNameMapping, HarmonizationReport};
use crate::domain::project::ProjectConfig;
use crate::error::HarmoniaError;
use crate::infrastructure::adapters::DataFusionTable;
use crate::infrastructure::config::resolve_sources;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::table::NamedTable;

use super::harmonize::harmonize;

#[derive(Debug)]
pub struct RunResult {
    /// The canonical table, rows in source order.
    pub batches: Vec<RecordBatch>,
    pub report: HarmonizationReport,
    pub row_count: usize,
}

pub(crate) fn require_mapping(config: &ProjectConfig) -> Result<&ColumnNameMapping, HarmoniaError> {
    config.mapping.as_ref().ok_or_else(|| {
        InfrastructureError::ConfigError(format!(
            "Project '{}' has no column name mapping",
            config.name
        ))
        .into()
    })
}

#[instrument(skip(config), fields(project = %config.name))]
pub async fn run_harmonization(
    project_dir: &Path,
    config: &ProjectConfig,
) -> Result<RunResult, HarmoniaError> {
    let mapping = require_mapping(config)?;
    let ctx = DataFusionTable::session();

    // 1. Sources (IO, async)
    let mut sources = Vec::new();
    for source in resolve_sources(project_dir, config)? {
        info!(source = %source.name, path = ?source.path, "Loading source");
        let table = DataFusionTable::read_csv(&ctx, &source.path).await?;
        sources.push(NamedTable::new(source.name, table));
    }

    // 2. Fold (pure plan building, no execution yet)
    let canonical = DataFusionTable::canonical(&ctx, &mapping.canonical_fields())?;
    let harmonized = harmonize(mapping, canonical, sources)?;

    // 3. Execution
    let batches = harmonized.table.collect().await?;
    let row_count = batches.iter().map(|b| b.num_rows()).sum();
    info!(rows = row_count, "Canonical table collected");

    Ok(RunResult {
        batches,
        report: harmonized.report,
        row_count,
    })
}
