//! Read-only status probes.
//!
//! Probes never modify the system and never fail: an unresolvable command or
//! a missing path is simply reported as absent.
use std::collections::HashMap;
use std::path::Path;

use crate::config::checks::Check;
use crate::config::paths;
use crate::exec::Executor;

/// Outcome of a single status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Label from the check definition.
    pub label: String,
    /// Whether the checked command or path was found.
    pub present: bool,
    /// What was probed, for display next to the label.
    pub detail: String,
}

/// Evaluate one check.
#[must_use]
pub fn probe(check: &Check, executor: &dyn Executor, env: &HashMap<String, String>) -> ProbeResult {
    match check {
        Check::Command { label, name } => ProbeResult {
            label: label.clone(),
            present: executor.which(name),
            detail: format!("command `{name}`"),
        },
        Check::Path { label, target } => {
            let expanded = paths::expand_env(target, env);
            ProbeResult {
                label: label.clone(),
                // symlink_metadata so a broken link still counts as present;
                // the file was deployed even if its source moved.
                present: Path::new(&expanded).symlink_metadata().is_ok(),
                detail: expanded,
            }
        }
    }
}

/// Evaluate all checks in order.
#[must_use]
pub fn probe_all(
    checks: &[Check],
    executor: &dyn Executor,
    env: &HashMap<String, String>,
) -> Vec<ProbeResult> {
    checks.iter().map(|c| probe(c, executor, env)).collect()
}
