//! Credential store: a single JSON file holding the token and base URL.
//!
//! Reading is infallible: a missing or unparsable file is "no config" with the
//! production base URL. Writes replace the file through a sibling temp file so
//! a concurrent reader sees either the old or the new content.

use super::xdg;
use crate::error::GwirianError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://app.gwirian.com";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// On-disk shape: `{ "token": string|null, "baseUrl": string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredConfig {
    pub token: Option<String>,
    pub base_url: String,
}

/// Read side of the file. Each field falls back on its own: a missing, null
/// or wrongly typed value never discards its neighbour.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    token: Value,
    #[serde(default)]
    base_url: Value,
}

impl From<RawConfig> for StoredConfig {
    fn from(raw: RawConfig) -> Self {
        Self {
            token: raw.token.as_str().map(str::to_string),
            base_url: raw
                .base_url
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(default_base_url),
        }
    }
}

impl Default for StoredConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_base_url(),
        }
    }
}

impl StoredConfig {
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the per-user XDG location.
    pub fn default_location() -> Result<Self, GwirianError> {
        Ok(Self::new(xdg::credential_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored config. Never fails and never creates anything.
    pub fn load(&self) -> StoredConfig {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return StoredConfig::default(),
        };
        match serde_json::from_str::<RawConfig>(&raw) {
            Ok(config) => config.into(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable credential file");
                StoredConfig::default()
            }
        }
    }

    pub fn has_token(&self) -> bool {
        self.load().has_token()
    }

    pub fn set_token(&self, token: &str) -> Result<(), GwirianError> {
        let mut config = self.load();
        config.token = Some(token.to_string());
        self.write(&config)
    }

    /// Persist the base URL without a trailing slash.
    pub fn set_base_url(&self, url: &str) -> Result<(), GwirianError> {
        let mut config = self.load();
        config.base_url = url.trim_end_matches('/').to_string();
        self.write(&config)
    }

    pub fn clear_token(&self) -> Result<(), GwirianError> {
        let mut config = self.load();
        config.token = None;
        self.write(&config)
    }

    fn write(&self, config: &StoredConfig) -> Result<(), GwirianError> {
        if let Some(dir) = self.path.parent() {
            create_private_dir(dir)?;
        }
        let content = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        write_private_file(&tmp, content.as_bytes())?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            GwirianError::ConfigError(format!(
                "Failed to write {}: {}",
                self.path.display(),
                e
            ))
        })?;
        debug!(path = %self.path.display(), "Credential file written");
        Ok(())
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<(), GwirianError> {
    use std::os::unix::fs::DirBuilderExt;
    if dir.exists() {
        return Ok(());
    }
    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .map_err(GwirianError::from)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<(), GwirianError> {
    fs::create_dir_all(dir).map_err(GwirianError::from)
}

#[cfg(unix)]
fn write_private_file(path: &Path, bytes: &[u8]) -> Result<(), GwirianError> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn write_private_file(path: &Path, bytes: &[u8]) -> Result<(), GwirianError> {
    fs::write(path, bytes).map_err(GwirianError::from)
}
