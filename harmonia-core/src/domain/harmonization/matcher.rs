// harmonia-core/src/domain/harmonization/matcher.rs

// Column lookups for a single rule. Comparisons happen on lowercased names but
// the returned identifiers are always the table's own spelling, so a rename
// never targets a column that does not exist.

use tracing::debug;

/// Outcome of one rule against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    /// First candidate in scan order; the one that gets bound.
    pub column: &'a str,
    /// Every column the rule accepted, in scan order.
    pub candidates: Vec<&'a str>,
}

impl<'a> RuleMatch<'a> {
    pub(crate) fn from_candidates(candidates: Vec<&'a str>) -> Option<Self> {
        let column = *candidates.first()?;
        Some(Self { column, candidates })
    }

    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// Returns the column whose lowercased name equals `target_lower`.
pub fn match_exact<'a>(columns: &'a [String], target_lower: &str) -> Option<&'a str> {
    match_exact_candidates(columns, target_lower)
        .first()
        .copied()
}

/// Returns the first column (scan order) whose lowercased name starts with
/// `prefix` and ends with `suffix`, both lowercased too.
pub fn match_affix<'a>(columns: &'a [String], prefix: &str, suffix: &str) -> Option<&'a str> {
    match_affix_candidates(columns, prefix, suffix)
        .first()
        .copied()
}

pub(crate) fn match_exact_candidates<'a>(columns: &'a [String], target_lower: &str) -> Vec<&'a str> {
    let hits: Vec<&str> = columns
        .iter()
        .filter(|c| c.to_lowercase() == target_lower)
        .map(String::as_str)
        .collect();
    debug!(target = target_lower, hits = ?hits, "Exact lookup");
    hits
}

pub(crate) fn match_affix_candidates<'a>(
    columns: &'a [String],
    prefix: &str,
    suffix: &str,
) -> Vec<&'a str> {
    let prefix = prefix.to_lowercase();
    let suffix = suffix.to_lowercase();
    let hits: Vec<&str> = columns
        .iter()
        .filter(|c| {
            let lower = c.to_lowercase();
            lower.starts_with(&prefix) && lower.ends_with(&suffix)
        })
        .map(String::as_str)
        .collect();
    debug!(prefix = %prefix, suffix = %suffix, hits = ?hits, "Affix lookup");
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::harmonization::MatchRule;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_returns_original_spelling() {
        let columns = cols(&["FirstName", "LastName", "DOB"]);
        assert_eq!(match_exact(&columns, "firstname"), Some("FirstName"));
        assert_eq!(match_exact(&columns, "dob"), Some("DOB"));
        assert_eq!(match_exact(&columns, "first_name"), None);
    }

    #[test]
    fn test_exact_rule_lowercases_its_target() {
        let columns = cols(&["lastName"]);
        let hit = MatchRule::exact("LastName").resolve(&columns);
        assert_eq!(hit.map(|m| m.column), Some("lastName"));
    }

    #[test]
    fn test_affix_is_case_insensitive_on_both_sides() {
        let columns = cols(&["name", "birthYearMonthDate"]);
        assert_eq!(
            match_affix(&columns, "birth", "Date"),
            Some("birthYearMonthDate")
        );
        assert_eq!(
            match_affix(&columns, "BIRTH", "date"),
            Some("birthYearMonthDate")
        );
        assert_eq!(match_affix(&columns, "date", "birth"), None);
    }

    #[test]
    fn test_affix_ambiguity_keeps_scan_order() {
        let columns = cols(&["birth_date", "x", "BirthCertificateDate"]);
        let hit = MatchRule::affix("birth", "date").resolve(&columns);
        let hit = hit.as_ref();
        assert_eq!(hit.map(|m| m.column), Some("birth_date"));
        assert_eq!(
            hit.map(|m| m.candidates.clone()),
            Some(vec!["birth_date", "BirthCertificateDate"])
        );
        assert!(hit.is_some_and(|m| m.is_ambiguous()));
    }

    #[test]
    fn test_no_columns_no_match() {
        let columns: Vec<String> = Vec::new();
        assert_eq!(match_exact(&columns, "a"), None);
        assert_eq!(match_affix(&columns, "", ""), None);
        assert!(MatchRule::exact("a").resolve(&columns).is_none());
    }

    #[test]
    fn test_empty_affix_matches_first_column() {
        let columns = cols(&["x", "y"]);
        assert_eq!(match_affix(&columns, "", ""), Some("x"));
    }
}
