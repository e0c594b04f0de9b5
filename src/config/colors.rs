//! Color-scheme configuration loading.
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;
use crate::error::ConfigError;

/// Configuration for the color-scheme subsystem.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ColorsConfig {
    /// Stylesheet path templates whose CSS custom properties are rewritten
    /// from the pywal palette.
    #[serde(default)]
    pub stylesheets: Vec<String>,

    /// Override for the pywal palette location; defaults to
    /// `$HOME/.cache/wal/colors.json` when absent.
    #[serde(default)]
    pub palette: Option<String>,

    /// Cache/config directories created empty at install time so pywal and
    /// its consumers have somewhere to write before their first run.
    #[serde(default)]
    pub directories: Vec<String>,
}

/// Load the color-scheme config from colors.toml.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be parsed.
pub fn load(path: &Path) -> Result<ColorsConfig, ConfigError> {
    toml_loader::load_config(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::test_helpers::write_temp_toml;

    #[test]
    fn load_full_config() {
        let (_dir, path) = write_temp_toml(
            r#"stylesheets = ["$HOME/.config/yasb/styles.css"]
palette = "$HOME/.cache/wal/colors.json"
directories = ["$HOME/.cache/wal", "$HOME/.config/wal"]
"#,
        );
        let config = load(&path).unwrap();
        assert_eq!(config.stylesheets.len(), 1);
        assert_eq!(
            config.palette.as_deref(),
            Some("$HOME/.cache/wal/colors.json")
        );
        assert_eq!(config.directories.len(), 2);
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("nonexistent.toml")).unwrap();
        assert!(config.stylesheets.is_empty());
        assert!(config.palette.is_none());
        assert!(config.directories.is_empty());
    }
}
