// harmonia-core/src/application/harmonize.rs

// The fold: every source is harmonized on its own, then appended to the
// canonical accumulator. The accumulator is threaded through, never shared.

use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::harmonization::{ColumnNameMapping, HarmonizationReport, harmonize_table};
use crate::error::HarmoniaError;
use crate::ports::table::{NamedTable, Table};

/// Result of a whole run: the canonical table and what happened to each source.
#[derive(Debug)]
pub struct Harmonized<T> {
    pub table: T,
    pub report: HarmonizationReport,
}

/// Harmonizes `sources` in order and unions them into `canonical`.
///
/// `canonical` must already carry exactly the canonical fields of `mapping`
/// (usually with no rows). Its column set never changes afterwards.
#[instrument(skip_all, fields(fields = mapping.len()))]
pub fn harmonize<T, I>(
    mapping: &ColumnNameMapping,
    canonical: T,
    sources: I,
) -> Result<Harmonized<T>, HarmoniaError>
where
    T: Table,
    I: IntoIterator<Item = NamedTable<T>>,
{
    let fields = mapping.canonical_fields();
    let initial = canonical.columns();
    if initial != fields {
        return Err(DomainError::SchemaMismatch {
            table: "canonical".to_string(),
            detail: format!("accumulator has {:?}, mapping declares {:?}", initial, fields),
        }
        .into());
    }

    let (table, report) = sources.into_iter().try_fold(
        (canonical, HarmonizationReport::default()),
        |(acc, mut report), source| {
            info!(table = %source.name, "Harmonizing table");
            let harmonized = harmonize_table(mapping, &source.name, source.table)?;

            let acc = acc
                .union(harmonized.table)
                .map_err(|e| DomainError::SchemaMismatch {
                    table: source.name.clone(),
                    detail: format!("union refused: {}", e),
                })?;

            report.tables.push(harmonized.plan);
            Ok::<_, HarmoniaError>((acc, report))
        },
    )?;

    info!(
        tables = report.tables.len(),
        warnings = report.warnings_count(),
        "Harmonization complete"
    );
    Ok(Harmonized { table, report })
}
