//! `provision colors`: refresh pywal-derived colors in managed stylesheets.
use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};

use crate::cli::{ColorsOpts, GlobalOpts};
use crate::config::paths;
use crate::exec::Executor as _;
use crate::logging::Logger;
use crate::resources::palette;

/// Run the colors command.
///
/// With `--wallpaper` a fresh palette is generated first via `wal`; without
/// it the existing palette file is applied as-is.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved, the palette file cannot
/// be read, or a stylesheet cannot be written.
pub fn run(global: &GlobalOpts, opts: &ColorsOpts, log: &Logger) -> Result<()> {
    let rt = super::prepare(global.root.as_deref())?;

    if rt.config.colors.stylesheets.is_empty() {
        log.info("no stylesheets configured");
        return Ok(());
    }

    if let Some(wallpaper) = &opts.wallpaper {
        if rt.executor.which("wal") {
            if global.dry_run {
                log.dry_run(&format!("wal -i {} -n -q", wallpaper.display()));
            } else {
                log.stage("Generating palette");
                let wallpaper_arg = wallpaper.display().to_string();
                let result = rt
                    .executor
                    .run_unchecked("wal", &["-i", &wallpaper_arg, "-n", "-q"])?;
                if !result.success {
                    bail!("wal failed: {}", result.stderr.trim());
                }
            }
        } else {
            log.warn("wal not found on PATH, applying the existing palette");
        }
    }

    let palette_path = rt.config.colors.palette.as_ref().map_or_else(
        || palette::default_palette_path(&rt.home),
        |t| PathBuf::from(paths::expand_env(t, &rt.env)),
    );
    let loaded = palette::load_palette(&palette_path)?;
    let vars = loaded.css_variables();
    log.debug(&format!(
        "palette: {} ({} variables)",
        palette_path.display(),
        vars.len()
    ));

    log.stage("Applying palette");
    for template in &rt.config.colors.stylesheets {
        let path = PathBuf::from(paths::expand_env(template, &rt.env));
        if !path.is_file() {
            log.warn(&format!("{}: not deployed, skipping", path.display()));
            continue;
        }

        let css = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let (rewritten, count) = palette::apply_to_css(&css, &vars);

        if count == 0 {
            log.debug(&format!("{}: no color declarations", path.display()));
            continue;
        }
        if global.dry_run {
            log.dry_run(&format!("{}: {count} declarations", path.display()));
            continue;
        }
        std::fs::write(&path, rewritten)
            .with_context(|| format!("writing {}", path.display()))?;
        log.info(&format!("{}: {count} declarations updated", path.display()));
    }

    Ok(())
}
