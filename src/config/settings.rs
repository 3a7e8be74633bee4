//! Optional `settings.toml` next to the credential file, layered with
//! `GWIRIAN__*` environment variables (e.g. `GWIRIAN__LOGGING__LEVEL=debug`).

use super::xdg;
use crate::error::GwirianError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Client settings that are not credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the XDG settings file (if any) and the environment.
    pub fn load() -> Result<Settings, GwirianError> {
        let path = xdg::settings_file()?;
        Self::load_from_file(&path)
    }

    /// Load from `path` (missing is fine) and the environment.
    pub fn load_from_file(path: &Path) -> Result<Settings, GwirianError> {
        let file = File::from(path).format(FileFormat::Toml).required(false);
        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("GWIRIAN").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
