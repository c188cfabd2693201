pub mod project;
pub mod source;

pub use crate::domain::project::{ProjectConfig, SourceConfig};
pub use project::load_project_config;
pub use source::{ResolvedSource, resolve_sources};
