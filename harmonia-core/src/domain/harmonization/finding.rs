// harmonia-core/src/domain/harmonization/finding.rs

use serde::Serialize;
use std::fmt;

/// Non-fatal observations made while planning one table.
/// Each one is logged when raised and kept in the table plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// A rule accepted several columns; the first in scan order was used.
    AmbiguousMatch {
        field: String,
        rule: String,
        candidates: Vec<String>,
        chosen: String,
    },
    /// A matched column could not be renamed onto the field.
    CanonicalFieldConflict {
        field: String,
        source_column: String,
        reason: ConflictReason,
    },
    /// No rule matched; the field is filled with nulls.
    NoMatchFound { field: String },
    /// A column already spelled like a canonical field was not chosen by that
    /// field's rules and is left out of the projection.
    DisplacedColumn { column: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConflictReason {
    FieldAlreadyBound,
    SourceAlreadyBound { bound_to: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Self::AmbiguousMatch { .. } | Self::CanonicalFieldConflict { .. } => Severity::Warning,
            Self::NoMatchFound { .. } | Self::DisplacedColumn { .. } => Severity::Info,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousMatch {
                field,
                rule,
                candidates,
                chosen,
            } => write!(
                f,
                "Multiple matches for {} on '{}': {:?}. Using the first match '{}'.",
                rule, field, candidates, chosen
            ),
            Self::CanonicalFieldConflict {
                field,
                source_column,
                reason,
            } => match reason {
                ConflictReason::FieldAlreadyBound => write!(
                    f,
                    "Conflict: '{}' is already mapped. Skipping renaming of '{}'.",
                    field, source_column
                ),
                ConflictReason::SourceAlreadyBound { bound_to } => write!(
                    f,
                    "Conflict: column '{}' is already mapped to '{}'. '{}' gets null values.",
                    source_column, bound_to, field
                ),
            },
            Self::NoMatchFound { field } => {
                write!(f, "No match found for '{}'. Adding null column.", field)
            }
            Self::DisplacedColumn { column } => write!(
                f,
                "Column '{}' matches no rule of its canonical field and is dropped.",
                column
            ),
        }
    }
}
