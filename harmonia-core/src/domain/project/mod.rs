pub mod configuration;

pub use configuration::{ProjectConfig, SourceConfig};
