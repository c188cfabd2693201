// harmonia-core/src/domain/harmonization/memory.rs

// In-memory Table used by the unit tests of the domain and application layers.

use crate::domain::error::DomainError;
use crate::error::HarmoniaError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::table::Table;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MemoryTable {
    rows: usize,
    columns: Vec<(String, Vec<Option<String>>)>,
}

impl MemoryTable {
    pub(crate) fn new(names: &[&str], rows: &[&[&str]]) -> Self {
        let columns = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let values = rows.iter().map(|r| Some(r[i].to_string())).collect();
                (name.to_string(), values)
            })
            .collect();
        Self {
            rows: rows.len(),
            columns,
        }
    }

    /// A table without columns that still has `rows` rows.
    pub(crate) fn empty_with_rows(rows: usize) -> Self {
        Self {
            rows,
            columns: Vec::new(),
        }
    }

    pub(crate) fn row_count(&self) -> usize {
        self.rows
    }

    pub(crate) fn values(&self, column: &str) -> Option<Vec<Option<String>>> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, values)| values.clone())
    }

    fn missing(column: &str) -> HarmoniaError {
        InfrastructureError::ColumnNotFound(column.to_string()).into()
    }
}

impl Table for MemoryTable {
    fn columns(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }

    fn with_column_renamed(mut self, old: &str, new: &str) -> Result<Self, HarmoniaError> {
        let (name, _) = self
            .columns
            .iter_mut()
            .find(|(name, _)| name == old)
            .ok_or_else(|| Self::missing(old))?;
        *name = new.to_string();
        Ok(self)
    }

    fn with_null_column(mut self, name: &str) -> Result<Self, HarmoniaError> {
        let nulls = vec![None; self.rows];
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, values)) => *values = nulls,
            None => self.columns.push((name.to_string(), nulls)),
        }
        Ok(self)
    }

    fn select(mut self, columns: &[String]) -> Result<Self, HarmoniaError> {
        let mut projected = Vec::with_capacity(columns.len());
        for column in columns {
            let position = self
                .columns
                .iter()
                .position(|(name, _)| name == column)
                .ok_or_else(|| Self::missing(column))?;
            projected.push(self.columns[position].clone());
        }
        self.columns = projected;
        Ok(self)
    }

    fn union(mut self, other: Self) -> Result<Self, HarmoniaError> {
        if self.columns() != other.columns() {
            return Err(DomainError::SchemaMismatch {
                table: "union".to_string(),
                detail: format!("{:?} vs {:?}", self.columns(), other.columns()),
            }
            .into());
        }
        for ((_, values), (_, more)) in self.columns.iter_mut().zip(other.columns) {
            values.extend(more);
        }
        self.rows += other.rows;
        Ok(self)
    }
}

#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_matches_adapter_error() {
        let table = MemoryTable::new(&["a"], &[&["1"]]);
        let err = table.with_column_renamed("A", "b").unwrap_err();
        assert!(matches!(
            err,
            HarmoniaError::Infrastructure(InfrastructureError::ColumnNotFound(ref c)) if c == "A"
        ));
    }
}
