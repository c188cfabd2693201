// harmonia-core/src/infrastructure/config/source.rs

use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

const SUPPORTED_EXTENSIONS: [&str; 1] = ["csv"];

/// A source with its path made absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub name: String,
    pub path: PathBuf,
}

/// Declared sources in declaration order, or every CSV found under the data
/// path (sorted by path) when none are declared.
pub fn resolve_sources(
    project_dir: &Path,
    config: &ProjectConfig,
) -> Result<Vec<ResolvedSource>, InfrastructureError> {
    let data_dir = absolute(project_dir, &config.data_path);

    if config.sources.is_empty() {
        return discover_sources(&data_dir);
    }

    config
        .sources
        .iter()
        .map(|source| {
            let path = absolute(&data_dir, &source.path);
            if !path.is_file() {
                return Err(InfrastructureError::SourceNotFound {
                    name: source.name.clone(),
                    path: path.display().to_string(),
                });
            }
            Ok(ResolvedSource {
                name: source.name.clone(),
                path,
            })
        })
        .collect()
}

fn discover_sources(data_dir: &Path) -> Result<Vec<ResolvedSource>, InfrastructureError> {
    if !data_dir.exists() {
        return Err(InfrastructureError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Data directory {:?} does not exist", data_dir),
        )));
    }

    let mut found: Vec<PathBuf> = WalkDir::new(data_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        })
        .collect();
    found.sort();

    if found.is_empty() {
        warn!(dir = ?data_dir, "No CSV sources discovered");
    }

    Ok(found
        .into_iter()
        .map(|path| {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            info!(source = %name, path = ?path, "Discovered source");
            ResolvedSource { name, path }
        })
        .collect())
}

fn absolute(base: &Path, raw: &str) -> PathBuf {
    let raw_path = Path::new(raw);
    if raw_path.is_absolute() {
        raw_path.to_path_buf()
    } else {
        base.join(raw_path)
    }
}
