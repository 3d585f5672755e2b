//! Platform-specific config and data directory helpers.
//!
//! Uses the `dirs` crate to resolve platform-appropriate directories:
//! - Linux:   `~/.config/ankivert/` (config), `~/.local/share/ankivert/` (data)
//! - Windows: `%APPDATA%\ankivert\` (both)
//! - macOS:   `~/Library/Application Support/ankivert/` (both)

use std::path::PathBuf;

use crate::error::PanelError;

const APP_DIR: &str = "ankivert";

/// Get the ankivert config directory. Not created here; `config init` does that.
pub fn ankivert_config_dir() -> Result<PathBuf, PanelError> {
    let base = dirs::config_dir()
        .ok_or_else(|| PanelError::Config("Could not determine config directory".into()))?;
    Ok(base.join(APP_DIR))
}

/// Default location of `config.toml`.
pub fn default_config_file() -> Result<PathBuf, PanelError> {
    Ok(ankivert_config_dir()?.join("config.toml"))
}

/// Get the ankivert data directory, creating it if needed.
///
/// Holds the panel's log file.
pub fn ankivert_data_dir() -> Result<PathBuf, PanelError> {
    let base = dirs::data_dir()
        .ok_or_else(|| PanelError::Config("Could not determine data directory".into()))?;
    let dir = base.join(APP_DIR);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_in_ankivert_dir() {
        let file = default_config_file().expect("should resolve config dir");
        assert!(file.ends_with("ankivert/config.toml"));
    }

    #[test]
    fn data_dir_returns_path_containing_ankivert() {
        let dir = ankivert_data_dir().expect("should resolve data dir");
        assert!(dir.ends_with("ankivert"));
        assert!(dir.exists());
    }
}
