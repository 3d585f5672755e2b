//! Loading and writing `config.toml`.
//!
//! A missing file yields the defaults. `init` writes the defaults atomically
//! (tmp file, then rename) and never overwrites an existing file.

use std::path::{Path, PathBuf};

use crate::error::PanelError;

use super::paths::default_config_file;
use super::types::PanelConfig;

/// Settings loaded from disk together with where they came from.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    exists: bool,
    pub config: PanelConfig,
}

impl ConfigFile {
    /// Load from `path`, or from the platform default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, PanelError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_file()?,
        };
        let exists = path.exists();
        let config = if exists {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents).map_err(|e| {
                PanelError::Config(format!("Invalid {}: {}", path.display(), e))
            })?
        } else {
            PanelConfig::default()
        };
        tracing::debug!(path = %path.display(), exists, "Loaded panel config");
        Ok(Self {
            path,
            exists,
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Write the current settings to a new file at `path`.
    pub fn init(&mut self) -> Result<(), PanelError> {
        if self.path.exists() {
            return Err(PanelError::Config(format!(
                "{} already exists",
                self.path.display()
            )));
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(&self.config)?;
        let tmp_path = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp_path, &contents)?;
        std::fs::rename(&tmp_path, &self.path)?;
        self.exists = true;
        Ok(())
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server: Option<String>,
}

impl Overrides {
    pub fn apply(&self, config: &mut PanelConfig) {
        if let Some(server) = &self.server {
            config.server = server.clone();
        }
    }
}
