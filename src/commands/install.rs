//! `provision install`: install packages and deploy configuration files.
use anyhow::{Result, bail};

use crate::cli::{GlobalOpts, InstallOpts};
use crate::logging::Logger;
use crate::tasks::{self, Context};

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved, the configuration is
/// invalid, or any task failed.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Logger) -> Result<()> {
    let rt = super::prepare(global.root.as_deref())?;
    log.debug(&format!("root: {}", rt.config.root.display()));

    let ctx = Context {
        config: &rt.config,
        os: rt.os,
        log,
        executor: &rt.executor,
        dry_run: global.dry_run,
        force: opts.force,
        skip_install: opts.skip_install,
        home: rt.home.clone(),
        env: rt.env.clone(),
    };

    for task in tasks::install_tasks() {
        tasks::execute(task.as_ref(), &ctx);
    }

    log.print_summary();
    if log.has_failures() {
        bail!("{} task(s) failed", log.failure_count());
    }
    Ok(())
}
