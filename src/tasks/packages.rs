//! Package install and uninstall tasks, one per backend.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::resources::ResourceChange;
use crate::resources::package::{PackageManager, PackageResource, installed_packages};

fn manager_applies(manager: PackageManager, ctx: &Context) -> bool {
    let configured = ctx
        .config
        .packages
        .iter()
        .any(|p| p.manager == manager);
    let platform_ok = match manager {
        PackageManager::Winget | PackageManager::Scoop => ctx.os.is_windows(),
        PackageManager::Pip => true,
    };
    configured && platform_ok
}

/// Install the configured packages for one backend.
///
/// The full installed set is queried once up front, then each missing
/// package is installed individually. Failed installs are warned about and
/// counted, never fatal.
pub struct InstallPackages {
    manager: PackageManager,
    name: String,
}

impl InstallPackages {
    #[must_use]
    pub fn new(manager: PackageManager) -> Self {
        Self {
            manager,
            name: format!("{manager} packages"),
        }
    }
}

impl Task for InstallPackages {
    fn name(&self) -> &str {
        &self.name
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.skip_install && manager_applies(self.manager, ctx)
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if !ctx.executor.which(self.manager.command()) {
            return Ok(TaskResult::Skipped(format!(
                "{} not found on PATH",
                self.manager
            )));
        }

        let installed = installed_packages(self.manager, ctx.executor)?;
        let mut planned = 0;
        let mut failed = 0;

        for pkg in ctx
            .config
            .packages
            .iter()
            .filter(|p| p.manager == self.manager)
        {
            let resource = PackageResource::new(pkg.name.clone(), self.manager, ctx.executor);
            if resource.is_installed_in(&installed) {
                ctx.log
                    .debug(&format!("{} already installed", resource.description()));
                continue;
            }

            if ctx.dry_run {
                ctx.log
                    .dry_run(&format!("install {}", resource.description()));
                planned += 1;
                continue;
            }

            ctx.log
                .info(&format!("installing {}", resource.description()));
            match resource.install()? {
                ResourceChange::Applied | ResourceChange::AlreadyCorrect => {}
                ResourceChange::Skipped { reason } => {
                    ctx.log.warn(&reason);
                    failed += 1;
                }
            }
        }

        if ctx.dry_run && planned > 0 {
            return Ok(TaskResult::DryRun);
        }
        if failed > 0 {
            return Ok(TaskResult::Skipped(format!(
                "{failed} package(s) failed to install"
            )));
        }
        Ok(TaskResult::Done)
    }
}

/// Uninstall the configured packages for one backend, best-effort.
pub struct UninstallPackages {
    manager: PackageManager,
    name: String,
}

impl UninstallPackages {
    #[must_use]
    pub fn new(manager: PackageManager) -> Self {
        Self {
            manager,
            name: format!("remove {manager} packages"),
        }
    }
}

impl Task for UninstallPackages {
    fn name(&self) -> &str {
        &self.name
    }

    fn should_run(&self, ctx: &Context) -> bool {
        manager_applies(self.manager, ctx)
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if !ctx.executor.which(self.manager.command()) {
            return Ok(TaskResult::Skipped(format!(
                "{} not found on PATH",
                self.manager
            )));
        }

        let installed = installed_packages(self.manager, ctx.executor)?;
        let mut planned = 0;

        for pkg in ctx
            .config
            .packages
            .iter()
            .filter(|p| p.manager == self.manager)
        {
            let resource = PackageResource::new(pkg.name.clone(), self.manager, ctx.executor);
            if !resource.is_installed_in(&installed) {
                continue;
            }

            if ctx.dry_run {
                ctx.log
                    .dry_run(&format!("uninstall {}", resource.description()));
                planned += 1;
                continue;
            }

            ctx.log
                .info(&format!("removing {}", resource.description()));
            if let ResourceChange::Skipped { reason } = resource.uninstall()? {
                ctx.log.warn(&reason);
            }
        }

        if ctx.dry_run && planned > 0 {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Done)
    }
}
