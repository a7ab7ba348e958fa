//! Platform configuration directory, resolved with `directories`.

use crate::error::ApiError;
use std::path::PathBuf;

/// Per-user configuration directory for remass
///
/// On Linux this is `$XDG_CONFIG_HOME/remass` (falling back to `$HOME/.config/remass`).
pub fn config_dir() -> Result<PathBuf, ApiError> {
    let project_dirs = directories::ProjectDirs::from("", "remass", "remass").ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine platform config directory (HOME not set)".to_string(),
        )
    })?;
    Ok(project_dirs.config_dir().to_path_buf())
}

/// Returns `<config dir>/config.toml`; the file need not exist.
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_dir()?.join("config.toml"))
}
