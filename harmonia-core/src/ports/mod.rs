// harmonia-core/src/ports/mod.rs

pub mod table;

pub use table::{NamedTable, Table};
