//! Configuration deployment: optimistic symlink with guaranteed copy fallback.
//!
//! Whether symbolic links are permitted is not reliably knowable in advance
//! (elevation state can be stale, filesystems differ), so the deployer never
//! checks privileges. It attempts the link and falls back to a full copy on
//! any failure, which closes the gap between a privilege check and the
//! operation itself.
use anyhow::Result;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use super::fs;
use crate::config::deployments::DeploymentEntry;
use crate::config::paths;

/// Terminal outcome of deploying one manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Destination created as a symbolic link to the source.
    Linked,
    /// Destination populated by copying the source.
    Copied,
    /// Symlink attempt failed; destination populated by copy instead.
    CopiedAsFallback,
    /// Source does not exist; nothing was changed.
    SkippedMissingSource,
    /// Destination already exists and overwrite was not requested.
    SkippedExists,
}

impl DeployOutcome {
    /// Whether the entry was skipped rather than materialised.
    #[must_use]
    pub const fn is_skip(self) -> bool {
        matches!(self, Self::SkippedMissingSource | Self::SkippedExists)
    }
}

/// Outcome of removing a previously deployed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Destination was removed.
    Removed,
    /// Destination does not exist.
    SkippedMissing,
    /// Destination exists but cannot be attributed to this deployment.
    SkippedNotOurs,
}

/// Materialisation options for a deployment.
#[derive(Debug, Clone, Copy)]
pub struct DeployOptions {
    /// Remove an existing destination before deploying.
    pub force: bool,
    /// Prefer a symbolic link over a copy. Links are best-effort: any
    /// failure falls back to a copy.
    pub symlink: bool,
}

/// A manifest entry resolved to absolute paths: the source under `files/`
/// and the destination with environment placeholders expanded.
#[derive(Debug, Clone)]
pub struct DeploymentResource {
    source: PathBuf,
    target: PathBuf,
    label: String,
}

impl DeploymentResource {
    /// Resolve a manifest entry against the files directory and an
    /// environment map.
    #[must_use]
    pub fn resolve(
        entry: &DeploymentEntry,
        files_dir: &Path,
        env: &HashMap<String, String>,
    ) -> Self {
        Self {
            source: files_dir.join(&entry.source),
            target: PathBuf::from(paths::expand_env(&entry.target, env)),
            label: entry.label().to_string(),
        }
    }

    /// Build a resource from already-resolved paths.
    #[must_use]
    pub fn new(source: PathBuf, target: PathBuf, label: String) -> Self {
        Self {
            source,
            target,
            label,
        }
    }

    /// Resolved source path.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Resolved destination path.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Human-readable label for log output.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Deploy this entry: ensure the destination exists and is populated
    /// from the source, honouring the overwrite policy in `opts`.
    ///
    /// Missing sources and pre-existing destinations are reported as skip
    /// outcomes, never as errors. A failed symlink attempt silently falls
    /// back to a copy. The only error class surfaced to the caller is a
    /// genuine I/O failure (directory creation or the copy itself).
    ///
    /// # Errors
    ///
    /// Returns an error if the destination's parent directories cannot be
    /// created, an existing destination cannot be removed under `force`, or
    /// the copy fails.
    pub fn deploy(&self, opts: DeployOptions) -> Result<DeployOutcome> {
        self.deploy_with(opts, create_symlink)
    }

    /// Deployment body with an injectable link primitive, so tests can
    /// simulate link failure deterministically.
    fn deploy_with(
        &self,
        opts: DeployOptions,
        link: impl Fn(&Path, &Path) -> io::Result<()>,
    ) -> Result<DeployOutcome> {
        if !self.source.exists() {
            return Ok(DeployOutcome::SkippedMissingSource);
        }

        fs::ensure_parent_dir(&self.target)?;

        // symlink_metadata also catches broken links that exists() misses.
        if self.target.exists() || self.target.symlink_metadata().is_ok() {
            if !opts.force {
                return Ok(DeployOutcome::SkippedExists);
            }
            fs::remove_existing(&self.target)?;
        }

        if opts.symlink {
            // A relative source stored verbatim as the link target would be
            // resolved against the link's own directory, leaving a broken
            // link that still reads as deployed.
            let link_target =
                std::fs::canonicalize(&self.source).unwrap_or_else(|_| self.source.clone());
            if link(&link_target, &self.target).is_ok() {
                return Ok(DeployOutcome::Linked);
            }
            self.copy_into_place()?;
            return Ok(DeployOutcome::CopiedAsFallback);
        }

        self.copy_into_place()?;
        Ok(DeployOutcome::Copied)
    }

    fn copy_into_place(&self) -> Result<()> {
        if self.source.is_dir() {
            fs::copy_dir_recursive(&self.source, &self.target)
        } else {
            std::fs::copy(&self.source, &self.target)
                .map(|_| ())
                .map_err(|e| {
                    anyhow::anyhow!(
                        "copying {} to {}: {e}",
                        self.source.display(),
                        self.target.display()
                    )
                })
        }
    }

    /// Remove the destination if it can be attributed to this deployment:
    /// a symlink pointing at our source, or a regular file whose content
    /// matches the source. Anything else is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination exists but cannot be removed.
    pub fn remove(&self) -> Result<RemoveOutcome> {
        let Ok(meta) = self.target.symlink_metadata() else {
            return Ok(RemoveOutcome::SkippedMissing);
        };

        if meta.file_type().is_symlink() {
            if let Ok(existing) = std::fs::read_link(&self.target)
                && paths_equal(&existing, &self.source)
            {
                fs::remove_existing(&self.target)?;
                return Ok(RemoveOutcome::Removed);
            }
            return Ok(RemoveOutcome::SkippedNotOurs);
        }

        if meta.is_file()
            && self.source.is_file()
            && file_contents_equal(&self.source, &self.target)
        {
            fs::remove_existing(&self.target)?;
            return Ok(RemoveOutcome::Removed);
        }

        Ok(RemoveOutcome::SkippedNotOurs)
    }
}

/// Compare two paths for equality after canonicalising both sides, so a
/// relative source still matches the absolute target a link was created
/// with, and the `\\?\` prefix Windows `read_link` prepends is normalised.
fn paths_equal(a: &Path, b: &Path) -> bool {
    let canon = |p: &Path| std::fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
    canon(a) == canon(b)
}

fn file_contents_equal(a: &Path, b: &Path) -> bool {
    match (std::fs::read(a), std::fs::read(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

/// Create a symlink at `link` pointing to `target` (platform-specific).
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
    }
}
