//! Package list configuration loading.
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;
use crate::error::ConfigError;
use crate::resources::package::PackageManager;

/// A package to install, attributed to its manager backend.
#[derive(Debug, Clone)]
pub struct Package {
    /// Package name (or winget ID).
    pub name: String,
    /// Manager backend responsible for this package.
    pub manager: PackageManager,
}

#[derive(Debug, Deserialize, Default)]
struct ManagerSection {
    #[serde(default)]
    packages: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct PackagesFile {
    #[serde(default)]
    winget: ManagerSection,
    #[serde(default)]
    scoop: ManagerSection,
    #[serde(default)]
    pip: ManagerSection,
}

/// Load packages from packages.toml.
///
/// Each manager has its own section:
///
/// ```toml
/// [winget]
/// packages = ["Microsoft.PowerShell", "wez.wezterm"]
///
/// [scoop]
/// packages = ["fastfetch"]
///
/// [pip]
/// packages = ["pywal"]
/// ```
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be parsed.
pub fn load(path: &Path) -> Result<Vec<Package>, ConfigError> {
    let file: PackagesFile = toml_loader::load_config(path)?;

    let mut packages = Vec::new();
    for (section, manager) in [
        (file.winget, PackageManager::Winget),
        (file.scoop, PackageManager::Scoop),
        (file.pip, PackageManager::Pip),
    ] {
        packages.extend(
            section
                .packages
                .into_iter()
                .map(|name| Package { name, manager }),
        );
    }

    Ok(packages)
}
