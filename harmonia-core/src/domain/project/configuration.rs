// harmonia-core/src/domain/project/configuration.rs

use crate::domain::harmonization::ColumnNameMapping;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,

    /// Base folder for relative source paths and for CSV discovery.
    #[serde(rename = "data-path", default = "default_data_path")]
    pub data_path: String,

    #[serde(rename = "config-paths", default)]
    pub config_paths: Vec<String>,

    /// Canonical fields and their rules. May live in a satellite `mapping.yml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<ColumnNameMapping>,

    /// Harmonized in this order. Empty means "discover under data-path".
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub name: String,
    pub path: String, // relative to data-path unless absolute
}

fn default_version() -> String {
    "1.0".to_string()
}
fn default_data_path() -> String {
    "data".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_defaults() -> Result<()> {
        let config: ProjectConfig = serde_yaml::from_str("name: people")?;
        assert_eq!(config.version, "1.0");
        assert_eq!(config.data_path, "data");
        assert!(config.mapping.is_none());
        assert!(config.sources.is_empty());
        Ok(())
    }

    #[test]
    fn test_full_project() -> Result<()> {
        let yaml = r#"
name: people
version: "2.1"
data-path: raw
mapping:
  - field: First_Name
    rules: [FirstName, name]
sources:
  - name: crm
    path: crm.csv
"#;
        let config: ProjectConfig = serde_yaml::from_str(yaml)?;
        assert_eq!(config.data_path, "raw");
        assert_eq!(
            config.mapping.map(|m| m.canonical_fields()),
            Some(vec!["First_Name".to_string()])
        );
        assert_eq!(
            config.sources,
            vec![SourceConfig {
                name: "crm".into(),
                path: "crm.csv".into()
            }]
        );
        Ok(())
    }
}
