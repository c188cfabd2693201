// harmonia-core/src/application/plan.rs
//
// USE CASE: dry run. Reads only the header line of each source and plans
// each table from its column names.

use std::path::Path;
use tracing::instrument;

use crate::domain::harmonization::{HarmonizationReport, plan_table};
use crate::domain::project::ProjectConfig;
use crate::error::HarmoniaError;
use crate::infrastructure::adapters::DataFusionTable;
use crate::infrastructure::config::resolve_sources;
use crate::ports::table::Table;

use super::pipeline::require_mapping;

#[instrument(skip(config), fields(project = %config.name))]
pub async fn plan_project(
    project_dir: &Path,
    config: &ProjectConfig,
) -> Result<HarmonizationReport, HarmoniaError> {
    let mapping = require_mapping(config)?;
    let ctx = DataFusionTable::session();

    let mut report = HarmonizationReport::default();
    for source in resolve_sources(project_dir, config)? {
        let table = DataFusionTable::read_csv(&ctx, &source.path).await?;
        report
            .tables
            .push(plan_table(mapping, &source.name, &table.columns()));
    }
    Ok(report)
}
