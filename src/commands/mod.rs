//! Subcommand implementations.
pub mod check;
pub mod colors;
pub mod install;
pub mod uninstall;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{Config, paths};
use crate::error::ConfigError;
use crate::exec::SystemExecutor;
use crate::platform::Os;

/// Everything the commands share: loaded config plus the live environment.
pub struct Runtime {
    pub config: Config,
    pub os: Os,
    pub executor: SystemExecutor,
    pub home: PathBuf,
    pub env: HashMap<String, String>,
}

/// Resolve the provisioning root and load its configuration.
///
/// # Errors
///
/// Returns an error if no root can be found or its config files cannot be
/// parsed.
pub fn prepare(root_flag: Option<&Path>) -> Result<Runtime> {
    let root = resolve_root(root_flag)?;
    let config = Config::load(&root)?;
    Ok(Runtime {
        config,
        os: Os::current(),
        executor: SystemExecutor,
        home: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
        env: paths::env_map(),
    })
}

/// A directory is a provisioning root if it carries the config or payload
/// directory.
fn looks_like_root(path: &Path) -> bool {
    path.join("conf").is_dir() || path.join("files").is_dir()
}

/// Locate the provisioning root: the `--root` flag, then `PROVISION_ROOT`,
/// then an ancestor of the running executable, then the working directory.
///
/// # Errors
///
/// Returns [`ConfigError::RootNotFound`] when nothing matches.
pub fn resolve_root(flag: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }

    if let Ok(env_root) = std::env::var("PROVISION_ROOT")
        && !env_root.is_empty()
    {
        return Ok(PathBuf::from(env_root));
    }

    // The binary typically lives in <root>/target/<profile>/ during
    // development or next to its data when distributed.
    if let Ok(exe) = std::env::current_exe() {
        for dir in exe.ancestors().skip(1) {
            if looks_like_root(dir) {
                return Ok(dir.to_path_buf());
            }
        }
    }

    if let Ok(cwd) = std::env::current_dir()
        && looks_like_root(&cwd)
    {
        return Ok(cwd);
    }

    Err(ConfigError::RootNotFound(
        "pass --root or set PROVISION_ROOT".to_string(),
    ))
}
