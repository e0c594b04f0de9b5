//! Workstation provisioning engine.
//!
//! Installs a configured set of applications through two package-manager
//! backends (winget, scoop) plus pip, and deploys configuration files from
//! the repository into per-application locations — symlinked when possible,
//! copied otherwise. A read-only `check` command reports what is present,
//! `uninstall` removes what was deployed, and `colors` refreshes pywal-derived
//! color schemes in managed stylesheets.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — parse TOML configuration files (packages, deployments, checks)
//! - **[`resources`]** — idempotent primitives (deployments, packages, probes)
//! - **[`tasks`]** — named units of work wired to resources
//! - **[`commands`]** — top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;
pub mod tasks;
