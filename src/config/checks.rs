//! Status check configuration loading.
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;
use crate::error::ConfigError;

/// One status check: either a command resolvable on PATH or a path that
/// should exist on disk.
#[derive(Debug, Clone)]
pub enum Check {
    /// Check that `name` resolves to an executable.
    Command {
        /// Label shown in the check report.
        label: String,
        /// Executable name.
        name: String,
    },
    /// Check that `target` exists after placeholder expansion.
    Path {
        /// Label shown in the check report.
        label: String,
        /// Path template; may contain environment placeholders.
        target: String,
    },
}

impl Check {
    /// Label shown in the check report.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Command { label, .. } | Self::Path { label, .. } => label,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CommandCheck {
    label: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct PathCheck {
    label: String,
    target: String,
}

#[derive(Debug, Deserialize, Default)]
struct ChecksFile {
    #[serde(default)]
    command: Vec<CommandCheck>,
    #[serde(default)]
    path: Vec<PathCheck>,
}

/// Load status checks from checks.toml.
///
/// ```toml
/// [[command]]
/// label = "wezterm"
/// name = "wezterm"
///
/// [[path]]
/// label = "shell profile"
/// target = "$HOME/.config/powershell/profile.ps1"
/// ```
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be parsed.
pub fn load(path: &Path) -> Result<Vec<Check>, ConfigError> {
    let file: ChecksFile = toml_loader::load_config(path)?;

    let mut checks = Vec::new();
    checks.extend(
        file.command
            .into_iter()
            .map(|c| Check::Command {
                label: c.label,
                name: c.name,
            }),
    );
    checks.extend(
        file.path
            .into_iter()
            .map(|p| Check::Path {
                label: p.label,
                target: p.target,
            }),
    );
    Ok(checks)
}
