//! Named units of work composed by the commands.
//!
//! A task decides for itself whether it applies to the current run
//! (`should_run`) and reports a coarse result that feeds the end-of-run
//! summary. Tasks are isolated: one failing task never prevents the
//! remaining tasks from running.
pub mod colors;
pub mod deployments;
pub mod packages;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;
use crate::exec::Executor;
use crate::logging::{Logger, TaskStatus};
use crate::platform::Os;
use crate::resources::package::PackageManager;

/// Everything a task needs to run.
pub struct Context<'a> {
    pub config: &'a Config,
    pub os: Os,
    pub log: &'a Logger,
    pub executor: &'a dyn Executor,
    /// Log planned actions instead of performing them.
    pub dry_run: bool,
    /// Overwrite destinations that already exist.
    pub force: bool,
    /// Skip package installation tasks entirely.
    pub skip_install: bool,
    /// User home directory.
    pub home: PathBuf,
    /// Environment used for placeholder expansion in configured paths.
    pub env: HashMap<String, String>,
}

/// Result of running a task that was applicable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed (possibly without changing anything).
    Done,
    /// Task could not do its work; the reason is shown in the summary.
    Skipped(String),
    /// Dry-run: actions were logged but not performed.
    DryRun,
}

/// A named unit of work.
pub trait Task {
    /// Name shown in stage output and the summary.
    fn name(&self) -> &str;

    /// Whether this task applies to the current run.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Perform the work.
    ///
    /// # Errors
    ///
    /// Returns an error when the task failed in a way that should make the
    /// whole run exit non-zero. Recoverable conditions are reported as
    /// [`TaskResult::Skipped`] instead.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// Run one task and record its outcome with the logger.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log.debug(&format!("{}: not applicable", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(task.name());
    match task.run(ctx) {
        Ok(TaskResult::Done) => ctx.log.record_task(task.name(), TaskStatus::Ok, None),
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.warn(&format!("{}: {reason}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => ctx.log.record_task(task.name(), TaskStatus::DryRun, None),
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&e.to_string()));
        }
    }
}

/// The install task list, in execution order. Packages go first so deployed
/// configs land after the applications that read them exist.
#[must_use]
pub fn install_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(packages::InstallPackages::new(PackageManager::Winget)),
        Box::new(packages::InstallPackages::new(PackageManager::Scoop)),
        Box::new(packages::InstallPackages::new(PackageManager::Pip)),
        Box::new(colors::CreateColorDirectories),
        Box::new(deployments::DeployConfigs),
    ]
}

/// The uninstall task list. Deployed files are removed before the
/// applications that own them.
#[must_use]
pub fn uninstall_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(deployments::RemoveDeployedConfigs),
        Box::new(packages::UninstallPackages::new(PackageManager::Pip)),
        Box::new(packages::UninstallPackages::new(PackageManager::Scoop)),
        Box::new(packages::UninstallPackages::new(PackageManager::Winget)),
    ]
}
