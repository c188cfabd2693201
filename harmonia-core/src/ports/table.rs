// harmonia-core/src/ports/table.rs

// What the harmonizer needs from a tabular engine, without knowing which one.
// Every operation consumes the table and returns the transformed one, the way
// dataframe engines build a new plan per call.

use crate::error::HarmoniaError;

pub trait Table: Sized {
    /// Column names in table order, case preserved.
    fn columns(&self) -> Vec<String>;

    /// Renames `old` to `new`. Fails when `old` is not a column of the table.
    fn with_column_renamed(self, old: &str, new: &str) -> Result<Self, HarmoniaError>;

    /// Adds (or replaces) a column named `name` holding null on every row.
    fn with_null_column(self, name: &str) -> Result<Self, HarmoniaError>;

    /// Projects the table onto `columns`, in that order.
    fn select(self, columns: &[String]) -> Result<Self, HarmoniaError>;

    /// Row-wise concatenation; `other`'s rows come after `self`'s.
    fn union(self, other: Self) -> Result<Self, HarmoniaError>;
}

/// A source table together with the name used in reports and logs.
#[derive(Debug, Clone)]
pub struct NamedTable<T> {
    pub name: String,
    pub table: T,
}

impl<T: Table> NamedTable<T> {
    pub fn new(name: impl Into<String>, table: T) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}
