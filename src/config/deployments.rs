//! Deployment manifest loading.
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;
use crate::error::ConfigError;

/// One configuration deployment directive: a source file or directory under
/// `files/` and a destination path template with environment placeholders.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentEntry {
    /// Relative path under the repository's `files/` directory.
    pub source: String,
    /// Destination path; may contain `$VAR`, `${VAR}` or `%VAR%` placeholders.
    pub target: String,
    /// Human-readable label used in log output.
    #[serde(default)]
    pub description: String,
}

impl DeploymentEntry {
    /// Label for log output: the description when present, the source otherwise.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.description.is_empty() {
            &self.source
        } else {
            &self.description
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct DeploymentsFile {
    #[serde(default)]
    deployment: Vec<DeploymentEntry>,
}

/// Load the deployment manifest from deployments.toml.
///
/// ```toml
/// [[deployment]]
/// source = "wezterm/wezterm.lua"
/// target = "$HOME/.config/wezterm/wezterm.lua"
/// description = "terminal settings"
/// ```
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be parsed.
pub fn load(path: &Path) -> Result<Vec<DeploymentEntry>, ConfigError> {
    let file: DeploymentsFile = toml_loader::load_config(path)?;
    Ok(file.deployment)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::test_helpers::write_temp_toml;

    #[test]
    fn load_entries() {
        let (_dir, path) = write_temp_toml(
            r#"[[deployment]]
source = "wezterm/wezterm.lua"
target = "$HOME/.config/wezterm/wezterm.lua"
description = "terminal settings"

[[deployment]]
source = "yasb"
target = "$HOME/.config/yasb"
"#,
        );
        let entries = load(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source, "wezterm/wezterm.lua");
        assert_eq!(entries[0].label(), "terminal settings");
        assert_eq!(entries[1].label(), "yasb", "label falls back to source");
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let entries = load(&dir.path().join("nonexistent.toml")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn missing_source_field_is_parse_error() {
        let (_dir, path) = write_temp_toml("[[deployment]]\ntarget = \"$HOME/.x\"\n");
        assert!(load(&path).is_err());
    }
}
