//! Skill installation: writes the bundled `gwirian-cli` skill into editor
//! skill directories.

use crate::error::GwirianError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SKILL_NAME: &str = "gwirian-cli";

const SKILL_FILES: &[(&str, &str)] = &[(
    "SKILL.md",
    include_str!("../skills/gwirian-cli/SKILL.md"),
)];

/// Which editor skill directories to install into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InstallTarget {
    Cursor,
    Claude,
    Both,
}

impl InstallTarget {
    /// Editor directory names under the base directory.
    fn editor_dirs(self) -> &'static [&'static str] {
        match self {
            InstallTarget::Cursor => &[".cursor"],
            InstallTarget::Claude => &[".claude"],
            InstallTarget::Both => &[".cursor", ".claude"],
        }
    }
}

/// Base directory: the home directory for `--global`, else the working directory.
pub fn base_dir(global: bool) -> Result<PathBuf, GwirianError> {
    if global {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .ok_or_else(|| GwirianError::InstallError("Could not determine home directory".into()))
    } else {
        Ok(std::env::current_dir()?)
    }
}

/// Install the skill under `base`; returns a display label per destination.
pub fn install_skill(target: InstallTarget, base: &Path) -> Result<Vec<String>, GwirianError> {
    let mut installed = Vec::new();
    for editor in target.editor_dirs() {
        let dest = base.join(editor).join("skills").join(SKILL_NAME);
        fs::create_dir_all(&dest).map_err(|e| {
            GwirianError::InstallError(format!("Failed to create {}: {}", dest.display(), e))
        })?;
        for (name, content) in SKILL_FILES {
            fs::write(dest.join(name), content).map_err(|e| {
                GwirianError::InstallError(format!("Failed to write {}: {}", name, e))
            })?;
        }
        info!(dest = %dest.display(), "Skill installed");
        installed.push(format!("{}/skills/{}", editor, SKILL_NAME));
    }
    Ok(installed)
}
