//! JSON-file project configuration persistence.
//!
//! The whole project tree is serialized into one JSON document. Persisting
//! writes to a sibling temp file and renames it over the target, so a crash
//! mid-write leaves either the old tree or the new one — never a torn file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use shopforge_core::{ConfigError, ConfigResult};
use shopforge_config::{ProjectConfiguration, ProjectConfigurationDao};

/// File-backed [`ProjectConfigurationDao`].
#[derive(Debug, Clone)]
pub struct JsonProjectConfigurationDao {
    path: PathBuf,
}

impl JsonProjectConfigurationDao {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProjectConfigurationDao for JsonProjectConfigurationDao {
    fn get_configuration(&self) -> ConfigResult<ProjectConfiguration> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ConfigError::not_found(format!(
                    "project configuration file '{}' does not exist",
                    self.path.display()
                ))
            } else {
                ConfigError::persistence(format!(
                    "reading '{}' failed: {e}",
                    self.path.display()
                ))
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            ConfigError::persistence(format!(
                "project configuration file '{}' is corrupt: {e}",
                self.path.display()
            ))
        })
    }

    fn persist_configuration(&self, configuration: &ProjectConfiguration) -> ConfigResult<()> {
        let json = serde_json::to_vec_pretty(configuration)
            .map_err(|e| ConfigError::persistence(format!("serializing project tree failed: {e}")))?;

        let staged = self.path.with_extension("json.tmp");
        std::fs::write(&staged, &json).map_err(|e| {
            ConfigError::persistence(format!("writing '{}' failed: {e}", staged.display()))
        })?;
        std::fs::rename(&staged, &self.path).map_err(|e| {
            ConfigError::persistence(format!(
                "replacing '{}' failed: {e}",
                self.path.display()
            ))
        })
    }
}
