//! Color-scheme support task.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::config::paths;

/// Create the configured cache/config directories so the palette generator
/// and its consumers have somewhere to write before their first run.
pub struct CreateColorDirectories;

impl Task for CreateColorDirectories {
    fn name(&self) -> &str {
        "color scheme directories"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.colors.directories.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let mut created = 0;
        for template in &ctx.config.colors.directories {
            let path = PathBuf::from(paths::expand_env(template, &ctx.env));

            if path.is_dir() {
                ctx.log.debug(&format!("{} exists", path.display()));
                continue;
            }

            if ctx.dry_run {
                ctx.log.dry_run(&format!("create {}", path.display()));
                created += 1;
                continue;
            }

            std::fs::create_dir_all(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            ctx.log.info(&format!("created {}", path.display()));
            created += 1;
        }

        if ctx.dry_run && created > 0 {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Done)
    }
}
