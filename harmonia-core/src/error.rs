// harmonia-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum HarmoniaError {
    // --- DOMAIN ERRORS (mapping rules, schema invariants) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing, table engine) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

// Shortcuts so adapters can use `?` on engine and IO calls directly
impl From<std::io::Error> for HarmoniaError {
    fn from(err: std::io::Error) -> Self {
        HarmoniaError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<datafusion::error::DataFusionError> for HarmoniaError {
    fn from(err: datafusion::error::DataFusionError) -> Self {
        HarmoniaError::Infrastructure(InfrastructureError::Database(DatabaseError::DataFusion(
            err,
        )))
    }
}
