//! `provision uninstall`: remove deployed configs and installed packages.
use anyhow::{Result, bail};

use crate::cli::{GlobalOpts, UninstallOpts};
use crate::logging::Logger;
use crate::tasks::{self, Context};

/// Run the uninstall command.
///
/// Prompts for confirmation unless `--yes` was given or this is a dry run.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved, the configuration is
/// invalid, or any task failed.
pub fn run(global: &GlobalOpts, opts: &UninstallOpts, log: &Logger) -> Result<()> {
    let rt = super::prepare(global.root.as_deref())?;

    if !opts.yes
        && !global.dry_run
        && !log.confirm("Remove deployed configuration files and installed packages?")?
    {
        log.info("aborted");
        return Ok(());
    }

    let ctx = Context {
        config: &rt.config,
        os: rt.os,
        log,
        executor: &rt.executor,
        dry_run: global.dry_run,
        force: false,
        skip_install: false,
        home: rt.home.clone(),
        env: rt.env.clone(),
    };

    for task in tasks::uninstall_tasks() {
        tasks::execute(task.as_ref(), &ctx);
    }

    log.print_summary();
    if log.has_failures() {
        bail!("{} task(s) failed", log.failure_count());
    }
    Ok(())
}
