// harmonia-core/src/domain/harmonization/planner.rs

// Decides, for one table, which column feeds each canonical field. Pure: it
// only looks at column names, so the same plan drives the dry run and the
// real harmonization.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument, warn};

use super::finding::{ConflictReason, Finding};
use super::mapping::{ColumnNameMapping, MatchRule};

/// Canonical names already claimed during one table's pass.
/// Created fresh for every table and dropped with its plan.
#[derive(Debug, Default)]
pub struct MappedColumnNames {
    fields: HashSet<String>,
    // source column -> canonical field it was renamed to
    sources: HashMap<String, String>,
}

impl MappedColumnNames {
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    pub fn is_consumed(&self, column: &str) -> bool {
        self.sources.contains_key(column)
    }

    /// Records `source -> field`. First registration wins.
    pub fn bind(&mut self, field: &str, source: &str) -> Result<(), ConflictReason> {
        // Not reachable from `plan_table` while `ColumnNameMapping` rejects
        // duplicate fields; kept so the set never binds a name twice on its own.
        if self.fields.contains(field) {
            return Err(ConflictReason::FieldAlreadyBound);
        }
        if let Some(bound_to) = self.sources.get(source) {
            return Err(ConflictReason::SourceAlreadyBound {
                bound_to: bound_to.clone(),
            });
        }
        self.fields.insert(field.to_string());
        self.sources.insert(source.to_string(), field.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FieldAction {
    /// Rename `source` to the canonical field (a no-op when already spelled so).
    Rename { source: String },
    /// Add the canonical field with a null on every row.
    FillNull,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldBinding {
    pub field: String,
    #[serde(flatten)]
    pub action: FieldAction,
    /// The rule that matched, even when a conflict prevented the rename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<MatchRule>,
}

impl FieldBinding {
    pub fn source(&self) -> Option<&str> {
        match &self.action {
            FieldAction::Rename { source } => Some(source),
            FieldAction::FillNull => None,
        }
    }
}

/// Harmonization plan (and report) for one source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePlan {
    pub table: String,
    /// Source columns as observed, in table order.
    pub columns: Vec<String>,
    /// One binding per canonical field, in mapping order.
    pub bindings: Vec<FieldBinding>,
    pub findings: Vec<Finding>,
}

impl TablePlan {
    pub fn canonical_fields(&self) -> Vec<String> {
        self.bindings.iter().map(|b| b.field.clone()).collect()
    }

    pub fn binding(&self, field: &str) -> Option<&FieldBinding> {
        self.bindings.iter().find(|b| b.field == field)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_warning())
    }
}

/// Plans of every source table of a run, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HarmonizationReport {
    pub tables: Vec<TablePlan>,
}

impl HarmonizationReport {
    pub fn findings(&self) -> impl Iterator<Item = (&str, &Finding)> {
        self.tables
            .iter()
            .flat_map(|t| t.findings.iter().map(move |f| (t.table.as_str(), f)))
    }

    pub fn warnings_count(&self) -> usize {
        self.findings().filter(|(_, f)| f.is_warning()).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[instrument(skip(mapping, columns))]
pub fn plan_table(mapping: &ColumnNameMapping, table: &str, columns: &[String]) -> TablePlan {
    let mut mapped = MappedColumnNames::default();
    let mut bindings = Vec::with_capacity(mapping.len());
    let mut findings = Vec::new();

    for entry in mapping.iter() {
        let field = entry.field.as_str();
        info!(field, "Processing canonical field");

        // First rule that yields a column wins, whatever its kind
        let hit = entry
            .rules
            .iter()
            .find_map(|rule| rule.resolve(columns).map(|m| (rule, m)));

        let Some((rule, matched)) = hit else {
            info!(field, "No match found. Adding new column with null values.");
            findings.push(Finding::NoMatchFound {
                field: field.to_string(),
            });
            bindings.push(FieldBinding {
                field: field.to_string(),
                action: FieldAction::FillNull,
                rule: None,
            });
            continue;
        };

        if matched.is_ambiguous() {
            warn!(
                field,
                rule = %rule,
                candidates = ?matched.candidates,
                chosen = matched.column,
                "Multiple matches found. Using the first match."
            );
            findings.push(Finding::AmbiguousMatch {
                field: field.to_string(),
                rule: rule.to_string(),
                candidates: matched.candidates.iter().map(|c| c.to_string()).collect(),
                chosen: matched.column.to_string(),
            });
        }

        let action = match mapped.bind(field, matched.column) {
            Ok(()) => {
                info!(field, source = matched.column, rule = %rule, kind = rule.kind(), "Renaming column");
                FieldAction::Rename {
                    source: matched.column.to_string(),
                }
            }
            Err(reason) => {
                warn!(
                    field,
                    source = matched.column,
                    reason = ?reason,
                    "Conflict detected. Skipping renaming."
                );
                findings.push(Finding::CanonicalFieldConflict {
                    field: field.to_string(),
                    source_column: matched.column.to_string(),
                    reason,
                });
                FieldAction::FillNull
            }
        };

        bindings.push(FieldBinding {
            field: field.to_string(),
            action,
            rule: Some(rule.clone()),
        });
    }

    for column in columns {
        if mapping.is_canonical(column) && !mapped.is_consumed(column) {
            info!(column = %column, "Column spelled like a canonical field was not matched");
            findings.push(Finding::DisplacedColumn {
                column: column.clone(),
            });
        }
    }

    TablePlan {
        table: table.to_string(),
        columns: columns.to_vec(),
        bindings,
        findings,
    }
}
