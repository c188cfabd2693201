// harmonia-core/src/infrastructure/config/project.rs

use serde::{Deserialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::harmonization::ColumnNameMapping;
use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

const DATA_PATH_ENV: &str = "HARMONIA_DATA_PATH";

// --- LOADER ---

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Locate the main file
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project configuration");

    // 2. Base YAML
    let mut config: ProjectConfig = load_fragment(&config_path)?;

    // 3. Satellite mapping, only when the main file does not carry one
    if config.mapping.is_none()
        && let Some(config_folder) = config.config_paths.first()
    {
        let mapping_path = project_dir.join(config_folder).join("mapping.yml");
        if mapping_path.exists() {
            #[derive(Deserialize)]
            struct MappingWrapper {
                mapping: ColumnNameMapping,
            }

            let wrapper: MappingWrapper = load_fragment(&mapping_path)?;
            config.mapping = Some(wrapper.mapping);
            info!(path = ?mapping_path, "  🧭 Column name mapping loaded");
        }
    }

    if config.mapping.is_none() {
        return Err(InfrastructureError::ConfigError(format!(
            "No column name mapping in {:?} (add a 'mapping' section or a mapping.yml under config-paths)",
            config_path
        )));
    }

    // 4. ENV overrides (layering)
    // Allows: HARMONIA_DATA_PATH=/mnt/exports harmonia run
    apply_env_overrides(&mut config);

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    let candidates = ["harmonia.yaml", "harmonia_project.yaml"];
    for filename in candidates {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, candidates
    )))
}

/// Loads a typed configuration fragment from a YAML file.
fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(InfrastructureError::YamlError)
}

fn apply_env_overrides(config: &mut ProjectConfig) {
    if let Ok(val) = std::env::var(DATA_PATH_ENV) {
        info!(old = ?config.data_path, new = ?val, "Overriding data path via ENV");
        config.data_path = val;
    }
}
