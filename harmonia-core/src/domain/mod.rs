pub mod error;
pub mod harmonization;
pub mod project;

// Handy re-exports to keep imports short elsewhere
pub use error::DomainError;
