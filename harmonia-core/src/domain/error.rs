// harmonia-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid column name mapping: {0}")]
    #[diagnostic(
        code(harmonia::domain::mapping),
        help("Each canonical field needs a non-empty name and a list of rules.")
    )]
    InvalidMapping(String),

    #[error("Canonical field '{0}' is declared more than once")]
    #[diagnostic(
        code(harmonia::domain::duplicate_field),
        help("Canonical field names are the output schema: merge the rule lists into one entry.")
    )]
    DuplicateCanonicalField(String),

    #[error("Schema mismatch for table '{table}': {detail}")]
    #[diagnostic(
        code(harmonia::domain::schema_mismatch),
        help("Every harmonized table must carry exactly the canonical fields, in mapping order.")
    )]
    SchemaMismatch { table: String, detail: String },
}
