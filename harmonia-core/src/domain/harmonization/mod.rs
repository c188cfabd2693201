// harmonia-core/src/domain/harmonization/mod.rs

pub mod finding;
pub mod harmonizer;
pub mod mapping;
pub mod matcher;
pub mod planner;

#[cfg(test)]
pub(crate) mod memory;

// Re-exports
pub use finding::{ConflictReason, Finding, Severity};
pub use harmonizer::{HarmonizedTable, apply_plan, harmonize_table};
pub use mapping::{ColumnNameMapping, FieldRules, MatchRule};
pub use matcher::{RuleMatch, match_affix, match_exact};
pub use planner::{
    FieldAction, FieldBinding, HarmonizationReport, MappedColumnNames, TablePlan, plan_table,
};
