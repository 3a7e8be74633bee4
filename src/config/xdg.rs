//! XDG path helpers: `$XDG_CONFIG_HOME/gwirian-cli`, falling back to `~/.config`.

use crate::error::GwirianError;
use std::path::PathBuf;

/// Directory name under the config home.
pub const APP_DIR: &str = "gwirian-cli";

/// `$XDG_CONFIG_HOME` when set and non-empty, else `$HOME/.config`.
pub fn config_home() -> Result<PathBuf, GwirianError> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base = directories::BaseDirs::new().ok_or_else(|| {
        GwirianError::ConfigError("Could not determine home directory".to_string())
    })?;
    Ok(base.home_dir().join(".config"))
}

/// `<config home>/gwirian-cli`. Not created here.
pub fn app_config_dir() -> Result<PathBuf, GwirianError> {
    Ok(config_home()?.join(APP_DIR))
}

pub fn credential_file() -> Result<PathBuf, GwirianError> {
    Ok(app_config_dir()?.join("config.json"))
}

pub fn settings_file() -> Result<PathBuf, GwirianError> {
    Ok(app_config_dir()?.join("settings.toml"))
}
