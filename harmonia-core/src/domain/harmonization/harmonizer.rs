// harmonia-core/src/domain/harmonization/harmonizer.rs

use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

use crate::domain::error::DomainError;
use crate::error::HarmoniaError;
use crate::ports::table::Table;

use super::mapping::ColumnNameMapping;
use super::planner::{FieldAction, TablePlan, plan_table};

/// A source table projected onto the canonical schema, with the plan that did it.
#[derive(Debug)]
pub struct HarmonizedTable<T> {
    pub table: T,
    pub plan: TablePlan,
}

/// One harmonization pass: plan from the column names, then apply.
#[instrument(skip(mapping, table))]
pub fn harmonize_table<T: Table>(
    mapping: &ColumnNameMapping,
    name: &str,
    table: T,
) -> Result<HarmonizedTable<T>, HarmoniaError> {
    let columns = table.columns();
    let plan = plan_table(mapping, name, &columns);
    let table = apply_plan(&plan, table)?;
    Ok(HarmonizedTable { table, plan })
}

/// Applies `plan` through the `Table` port and projects onto the canonical
/// fields. The result always has exactly the canonical columns, in order.
pub fn apply_plan<T: Table>(plan: &TablePlan, table: T) -> Result<T, HarmoniaError> {
    let canonical = plan.canonical_fields();
    let canonical_set: HashSet<&str> = canonical.iter().map(String::as_str).collect();
    let columns = table.columns();

    // Columns that already carry their own canonical name stay where they are
    let kept: HashSet<&str> = plan
        .bindings
        .iter()
        .filter(|b| b.source() == Some(b.field.as_str()))
        .map(|b| b.field.as_str())
        .collect();

    // 1. Park every other column spelled like a canonical field, so that
    // renames and null columns never land on an occupied name.
    let mut taken: HashSet<String> = columns.iter().cloned().collect();
    taken.extend(canonical.iter().cloned());
    let mut parked: HashMap<String, String> = HashMap::new();
    let mut table = table;

    for (position, column) in columns.iter().enumerate() {
        if canonical_set.contains(column.as_str()) && !kept.contains(column.as_str()) {
            let mut staging = format!("__harmonia_parked_{}", position);
            while taken.contains(&staging) {
                staging.push('_');
            }
            debug!(column = %column, staging = %staging, "Parking column");
            table = table.with_column_renamed(column, &staging)?;
            taken.insert(staging.clone());
            parked.insert(column.clone(), staging);
        }
    }

    // 2. Renames and null columns, in mapping order
    for binding in &plan.bindings {
        match &binding.action {
            FieldAction::Rename { source } => {
                let current = parked.get(source).unwrap_or(source);
                if current != &binding.field {
                    table = table.with_column_renamed(current, &binding.field)?;
                }
            }
            FieldAction::FillNull => {
                table = table.with_null_column(&binding.field)?;
            }
        }
    }

    // 3. Projection, then the schema invariant
    let table = table.select(&canonical)?;
    let projected = table.columns();
    if projected != canonical {
        return Err(DomainError::SchemaMismatch {
            table: plan.table.clone(),
            detail: format!("expected {:?}, found {:?}", canonical, projected),
        }
        .into());
    }

    Ok(table)
}
