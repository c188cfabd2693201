// harmonia-core/src/domain/harmonization/mapping.rs

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::matcher::{RuleMatch, match_affix_candidates, match_exact_candidates};

/// One way of recognising a source column.
///
/// In YAML a bare string is an exact rule and a `{prefix, suffix}` map is an
/// affix rule:
///
/// ```yaml
/// rules: [DOB, date_of_birth, {prefix: birth, suffix: Date}]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchRule {
    /// Case-insensitive equality with the column name.
    Exact(String),
    /// Case-insensitive `starts_with(prefix) && ends_with(suffix)`.
    Affix { prefix: String, suffix: String },
}

impl MatchRule {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    pub fn affix(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::Affix {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Resolves the rule against a table's columns (original case).
    pub fn resolve<'a>(&self, columns: &'a [String]) -> Option<RuleMatch<'a>> {
        let candidates = match self {
            Self::Exact(name) => match_exact_candidates(columns, &name.to_lowercase()),
            Self::Affix { prefix, suffix } => match_affix_candidates(columns, prefix, suffix),
        };
        RuleMatch::from_candidates(candidates)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Exact(_) => "exact",
            Self::Affix { .. } => "affix",
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => write!(f, "exact({})", name),
            Self::Affix { prefix, suffix } => write!(f, "affix({}*{})", prefix, suffix),
        }
    }
}

/// A canonical field and its rules, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRules {
    pub field: String,
    #[serde(default)]
    pub rules: Vec<MatchRule>,
}

impl FieldRules {
    pub fn new(field: impl Into<String>, rules: Vec<MatchRule>) -> Self {
        Self {
            field: field.into(),
            rules,
        }
    }
}

/// Ordered association canonical field -> rules.
///
/// Declaration order is the output schema order and the order in which fields
/// claim source columns, so it is kept in a `Vec` rather than a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldRules>", into = "Vec<FieldRules>")]
pub struct ColumnNameMapping {
    fields: Vec<FieldRules>,
}

impl ColumnNameMapping {
    pub fn new(fields: Vec<FieldRules>) -> Result<Self, DomainError> {
        if fields.is_empty() {
            return Err(DomainError::InvalidMapping(
                "at least one canonical field is required".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for entry in &fields {
            if entry.field.trim().is_empty() {
                return Err(DomainError::InvalidMapping(
                    "canonical field names cannot be empty".to_string(),
                ));
            }
            if entry
                .rules
                .iter()
                .any(|r| matches!(r, MatchRule::Exact(name) if name.is_empty()))
            {
                return Err(DomainError::InvalidMapping(format!(
                    "field '{}' has an empty exact rule",
                    entry.field
                )));
            }
            if !seen.insert(entry.field.as_str()) {
                return Err(DomainError::DuplicateCanonicalField(entry.field.clone()));
            }
        }

        Ok(Self { fields })
    }

    /// Canonical field names, in declaration order.
    pub fn canonical_fields(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.field.clone()).collect()
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.field == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRules> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Vec<FieldRules>> for ColumnNameMapping {
    type Error = DomainError;

    fn try_from(fields: Vec<FieldRules>) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl From<ColumnNameMapping> for Vec<FieldRules> {
    fn from(mapping: ColumnNameMapping) -> Self {
        mapping.fields
    }
}
