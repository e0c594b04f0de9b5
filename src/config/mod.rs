//! TOML configuration files under `<root>/conf/`.
pub mod checks;
pub mod colors;
pub mod deployments;
pub mod packages;
pub mod paths;
pub mod toml_loader;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// All loaded configuration for a provisioning run.
#[derive(Debug)]
pub struct Config {
    pub root: PathBuf,
    pub packages: Vec<packages::Package>,
    pub deployments: Vec<deployments::DeploymentEntry>,
    pub checks: Vec<checks::Check>,
    pub colors: colors::ColorsConfig,
}

impl Config {
    /// Load all configuration from the conf/ directory under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any config file exists but cannot be read
    /// or parsed. Missing files load as empty sections.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let conf = root.join("conf");

        let packages = packages::load(&conf.join("packages.toml"))?;
        let deployments = deployments::load(&conf.join("deployments.toml"))?;
        let checks = checks::load(&conf.join("checks.toml"))?;
        let colors = colors::load(&conf.join("colors.toml"))?;

        Ok(Self {
            root: root.to_path_buf(),
            packages,
            deployments,
            checks,
            colors,
        })
    }

    /// Directory containing the deployable source files.
    #[must_use]
    pub fn files_dir(&self) -> PathBuf {
        self.root.join("files")
    }
}
