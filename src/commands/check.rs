//! `provision check`: report which applications and configs are present.
//!
//! Purely read-only. A missing item is information, not an error, so this
//! command always exits zero once the configuration loads.
use anyhow::Result;

use crate::cli::{CheckOpts, GlobalOpts};
use crate::logging::Logger;
use crate::resources::probe;

/// Run the check command.
///
/// # Errors
///
/// Returns an error only if the root cannot be resolved or the configuration
/// is invalid.
pub fn run(global: &GlobalOpts, _opts: &CheckOpts, log: &Logger) -> Result<()> {
    let rt = super::prepare(global.root.as_deref())?;

    if rt.config.checks.is_empty() {
        log.info("no checks configured");
        return Ok(());
    }

    log.stage("Status");
    let results = probe::probe_all(&rt.config.checks, &rt.executor, &rt.env);

    let mut present = 0;
    for result in &results {
        if result.present {
            present += 1;
            log.info(&format!(
                "\x1b[32m✓\x1b[0m {} \x1b[2m({})\x1b[0m",
                result.label, result.detail
            ));
        } else {
            log.info(&format!(
                "\x1b[31m✗\x1b[0m {} \x1b[2m({})\x1b[0m",
                result.label, result.detail
            ));
        }
    }

    log.info(&format!("{present}/{} present", results.len()));

    // Informational: whether wal has been run and applications could pick
    // up a palette.
    if !rt.config.colors.stylesheets.is_empty() {
        let palette = rt.config.colors.palette.as_ref().map_or_else(
            || crate::resources::palette::default_palette_path(&rt.home),
            |t| std::path::PathBuf::from(crate::config::paths::expand_env(t, &rt.env)),
        );
        if palette.is_file() {
            log.debug(&format!("palette: {}", palette.display()));
        } else {
            log.info("palette not generated yet, run `provision colors`");
        }
    }

    Ok(())
}
