//! Configuration file deployment and removal tasks.
use anyhow::{Result, bail};

use super::{Context, Task, TaskResult};
use crate::resources::deployment::{
    DeployOptions, DeployOutcome, DeploymentResource, RemoveOutcome,
};

/// Deploy every manifest entry.
///
/// Entries are isolated: a failing entry is logged and counted, and the
/// remaining entries still run. The task fails (and the run exits non-zero)
/// only if at least one entry hit a real I/O error.
pub struct DeployConfigs;

impl Task for DeployConfigs {
    fn name(&self) -> &str {
        "configuration files"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.deployments.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let files_dir = ctx.config.files_dir();
        let opts = DeployOptions {
            force: ctx.force,
            symlink: true,
        };

        let mut failed = 0;
        let total = ctx.config.deployments.len();

        for entry in &ctx.config.deployments {
            let resource = DeploymentResource::resolve(entry, &files_dir, &ctx.env);

            if ctx.dry_run {
                ctx.log.dry_run(&format!(
                    "deploy {} -> {}",
                    resource.label(),
                    resource.target().display()
                ));
                continue;
            }

            match resource.deploy(opts) {
                Ok(DeployOutcome::Linked) => {
                    ctx.log.debug(&format!("linked {}", resource.label()));
                }
                Ok(DeployOutcome::Copied) => {
                    ctx.log.debug(&format!("copied {}", resource.label()));
                }
                Ok(DeployOutcome::CopiedAsFallback) => {
                    ctx.log.info(&format!(
                        "{}: link not permitted, copied instead",
                        resource.label()
                    ));
                }
                Ok(DeployOutcome::SkippedMissingSource) => {
                    ctx.log.warn(&format!(
                        "{}: source missing: {}",
                        resource.label(),
                        resource.source().display()
                    ));
                }
                Ok(DeployOutcome::SkippedExists) => {
                    ctx.log.warn(&format!(
                        "{}: {} exists, use --force to overwrite",
                        resource.label(),
                        resource.target().display()
                    ));
                }
                Err(e) => {
                    ctx.log.warn(&format!("{}: {e:#}", resource.label()));
                    failed += 1;
                }
            }
        }

        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        if failed > 0 {
            bail!("{failed} of {total} entries failed");
        }
        Ok(TaskResult::Done)
    }
}

/// Remove deployed files that are still attributable to the manifest:
/// symlinks pointing at their source, or unmodified copies. Anything the
/// user changed is left in place.
pub struct RemoveDeployedConfigs;

impl Task for RemoveDeployedConfigs {
    fn name(&self) -> &str {
        "remove configuration files"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.deployments.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let files_dir = ctx.config.files_dir();
        let mut failed = 0;
        let total = ctx.config.deployments.len();

        for entry in &ctx.config.deployments {
            let resource = DeploymentResource::resolve(entry, &files_dir, &ctx.env);

            if ctx.dry_run {
                ctx.log.dry_run(&format!(
                    "remove {} ({})",
                    resource.label(),
                    resource.target().display()
                ));
                continue;
            }

            match resource.remove() {
                Ok(RemoveOutcome::Removed) => {
                    ctx.log.info(&format!("removed {}", resource.label()));
                }
                Ok(RemoveOutcome::SkippedMissing) => {
                    ctx.log.debug(&format!("{}: not deployed", resource.label()));
                }
                Ok(RemoveOutcome::SkippedNotOurs) => {
                    ctx.log.warn(&format!(
                        "{}: modified or unmanaged, left in place",
                        resource.label()
                    ));
                }
                Err(e) => {
                    ctx.log.warn(&format!("{}: {e:#}", resource.label()));
                    failed += 1;
                }
            }
        }

        if ctx.dry_run {
            return Ok(TaskResult::DryRun);
        }
        if failed > 0 {
            bail!("{failed} of {total} entries failed");
        }
        Ok(TaskResult::Done)
    }
}
