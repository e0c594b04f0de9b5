//! Package installation resource.
use std::collections::HashSet;
use std::fmt;

use anyhow::Result;

use super::ResourceChange;
use crate::exec::Executor;

/// Supported package manager backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// Windows packages by ID (winget).
    Winget,
    /// Windows packages from scoop buckets.
    Scoop,
    /// Interpreter-level packages (pip).
    Pip,
}

impl PackageManager {
    /// Executable name used to drive this backend.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Winget => "winget",
            Self::Scoop => "scoop",
            Self::Pip => "pip",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// A package resource that can be checked, installed and uninstalled.
pub struct PackageResource<'a> {
    /// Package name (or winget ID).
    pub name: String,
    /// Package manager backend to use.
    pub manager: PackageManager,
    /// Executor for running package manager commands.
    executor: &'a dyn Executor,
}

impl fmt::Debug for PackageResource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageResource")
            .field("name", &self.name)
            .field("manager", &self.manager)
            .finish_non_exhaustive()
    }
}

impl<'a> PackageResource<'a> {
    /// Create a new package resource.
    #[must_use]
    pub const fn new(name: String, manager: PackageManager, executor: &'a dyn Executor) -> Self {
        Self {
            name,
            manager,
            executor,
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} ({})", self.name, self.manager)
    }

    /// Determine presence from a pre-fetched set of installed package names.
    ///
    /// Avoids a per-package query when used with [`installed_packages`].
    /// Pip names are compared case-insensitively, matching pip's own
    /// normalisation. Winget truncates long IDs in its table output with an
    /// ellipsis, so a truncated entry matches by prefix.
    #[must_use]
    pub fn is_installed_in(&self, installed: &HashSet<String>) -> bool {
        match self.manager {
            PackageManager::Pip => installed.contains(&self.name.to_ascii_lowercase()),
            PackageManager::Scoop => installed.contains(&self.name),
            PackageManager::Winget => {
                installed.contains(&self.name)
                    || installed.iter().any(|entry| {
                        entry
                            .strip_suffix('…')
                            .is_some_and(|prefix| self.name.starts_with(prefix))
                    })
            }
        }
    }

    /// Install the package.
    ///
    /// A non-zero exit from the backend is reported as
    /// [`ResourceChange::Skipped`] with the backend's diagnostics, so one
    /// failed install never aborts the rest of the batch.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend executable cannot be spawned.
    pub fn install(&self) -> Result<ResourceChange> {
        let result = match self.manager {
            PackageManager::Winget => self.executor.run_unchecked(
                "winget",
                &[
                    "install",
                    "--id",
                    &self.name,
                    "--exact",
                    "--source",
                    "winget",
                    "--accept-source-agreements",
                    "--accept-package-agreements",
                ],
            )?,
            PackageManager::Scoop => self
                .executor
                .run_unchecked("scoop", &["install", &self.name])?,
            PackageManager::Pip => {
                self.executor
                    .run_unchecked("pip", &["install", "--user", &self.name])?
            }
        };

        if result.success {
            Ok(ResourceChange::Applied)
        } else {
            // winget writes most diagnostics to stdout, not stderr.
            // Combine both streams so the user sees useful output.
            let detail = if result.stderr.trim().is_empty() {
                result.stdout.trim().to_string()
            } else {
                format!("{}\n{}", result.stdout.trim(), result.stderr.trim())
            };
            Ok(ResourceChange::Skipped {
                reason: format!("{} install failed: {detail}", self.manager),
            })
        }
    }

    /// Uninstall the package, best-effort: a failing backend is reported as
    /// [`ResourceChange::Skipped`], never an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend executable cannot be spawned.
    pub fn uninstall(&self) -> Result<ResourceChange> {
        let result = match self.manager {
            PackageManager::Winget => self.executor.run_unchecked(
                "winget",
                &[
                    "uninstall",
                    "--id",
                    &self.name,
                    "--exact",
                    "--accept-source-agreements",
                    "--disable-interactivity",
                ],
            )?,
            PackageManager::Scoop => self
                .executor
                .run_unchecked("scoop", &["uninstall", &self.name])?,
            PackageManager::Pip => self
                .executor
                .run_unchecked("pip", &["uninstall", "-y", &self.name])?,
        };

        if result.success {
            Ok(ResourceChange::Applied)
        } else {
            Ok(ResourceChange::Skipped {
                reason: format!("{} uninstall failed", self.manager),
            })
        }
    }
}

/// Query the full set of installed package names for a given backend.
///
/// Runs a **single** list command regardless of how many packages need to be
/// checked. Pip names are lowercased; winget output is tokenised so the
/// reverse-domain IDs can be matched exactly.
///
/// # Errors
///
/// Returns an error if the list command cannot be spawned.
pub fn installed_packages(
    manager: PackageManager,
    executor: &dyn Executor,
) -> Result<HashSet<String>> {
    let mut set = HashSet::new();
    match manager {
        PackageManager::Winget => {
            // `winget list` prints a column-aligned table headed
            // "Name  Id  Version ...". Only the Id column holds the
            // reverse-domain IDs installs are keyed on; Name tokens must not
            // leak into the set or unrelated rows shadow configured IDs.
            let result = executor.run_unchecked(
                "winget",
                &[
                    "list",
                    "--accept-source-agreements",
                    "--disable-interactivity",
                ],
            )?;
            if result.success {
                let mut id_column = None;
                for line in result.stdout.lines() {
                    let Some(col) = id_column else {
                        if line.starts_with("Name") {
                            id_column = find_column(line, "Id");
                        }
                        continue;
                    };
                    if line.starts_with('-') {
                        continue;
                    }
                    if let Some(id) = column_value(line, col) {
                        set.insert(id.to_string());
                    }
                }
            }
        }
        PackageManager::Scoop => {
            // `scoop list` prints a table: "Name  Version  Source  Updated".
            // The first token per data line is the package name; header and
            // separator lines are filtered out.
            let result = executor.run_unchecked("scoop", &["list"])?;
            if result.success {
                for line in result.stdout.lines() {
                    if let Some(name) = line.split_whitespace().next()
                        && name != "Name"
                        && !name.starts_with('-')
                    {
                        set.insert(name.to_string());
                    }
                }
            }
        }
        PackageManager::Pip => {
            // `pip freeze` prints one requirement per line: "name==version".
            let result = executor.run_unchecked("pip", &["freeze"])?;
            if result.success {
                for line in result.stdout.lines() {
                    let name = line
                        .split("==")
                        .next()
                        .unwrap_or(line)
                        .split(" @ ")
                        .next()
                        .unwrap_or(line)
                        .trim();
                    if !name.is_empty() && !name.starts_with('-') {
                        set.insert(name.to_ascii_lowercase());
                    }
                }
            }
        }
    }
    Ok(set)
}

/// Character offset of a whitespace-delimited column label in a table
/// header row.
fn find_column(header: &str, label: &str) -> Option<usize> {
    let mut token_start = None;
    let mut current = String::new();
    for (i, c) in header.chars().enumerate() {
        if c.is_whitespace() {
            if current == label {
                return token_start;
            }
            current.clear();
            token_start = None;
        } else {
            if token_start.is_none() {
                token_start = Some(i);
            }
            current.push(c);
        }
    }
    if current == label { token_start } else { None }
}

/// The cell starting at character offset `col` of an aligned table row.
///
/// Returns `None` when the row has no cell boundary there, which filters
/// out footer lines that are not part of the table.
fn column_value(line: &str, col: usize) -> Option<&str> {
    if col > 0
        && line
            .chars()
            .nth(col - 1)
            .is_none_or(|c| !c.is_whitespace())
    {
        return None;
    }
    let (start, first) = line.char_indices().nth(col)?;
    if first.is_whitespace() {
        return None;
    }
    line.get(start..)?.split_whitespace().next()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;

    #[test]
    fn description_includes_manager() {
        let executor = MockExecutor::ok("");
        let r = PackageResource::new("Git.Git".to_string(), PackageManager::Winget, &executor);
        assert_eq!(r.description(), "Git.Git (winget)");

        let r = PackageResource::new("fastfetch".to_string(), PackageManager::Scoop, &executor);
        assert_eq!(r.description(), "fastfetch (scoop)");

        let r = PackageResource::new("pywal".to_string(), PackageManager::Pip, &executor);
        assert_eq!(r.description(), "pywal (pip)");
    }

    #[test]
    fn debug_format_names_package_and_manager() {
        let executor = MockExecutor::ok("");
        let r = PackageResource::new("Git.Git".to_string(), PackageManager::Winget, &executor);
        let rendered = format!("{r:?}");
        assert!(rendered.contains("Git.Git"));
        assert!(rendered.contains("Winget"));
    }

    const WINGET_TABLE: &str = "Name          Id                    Version\n\
         ------------------------------------------------\n\
         Git           Git.Git               2.39.0\n\
         PowerShell    Microsoft.PowerShell  7.3\n\
         Spotify       Spotify.Spotify       1.2\n\
         2 upgrades available.\n";

    #[test]
    fn installed_winget_parses_id_column() {
        let executor = MockExecutor::ok(WINGET_TABLE);
        let installed = installed_packages(PackageManager::Winget, &executor).unwrap();
        assert!(installed.contains("Git.Git"));
        assert!(installed.contains("Microsoft.PowerShell"));
        assert!(installed.contains("Spotify.Spotify"));
    }

    #[test]
    fn installed_winget_excludes_name_column_and_footer() {
        let executor = MockExecutor::ok(WINGET_TABLE);
        let installed = installed_packages(PackageManager::Winget, &executor).unwrap();
        // a configured ID must never match another row's display name
        assert!(!installed.contains("Git"));
        assert!(!installed.contains("PowerShell"));
        assert!(!installed.contains("available."));
        assert!(!installed.contains("2.39.0"));
    }

    #[test]
    fn truncated_winget_id_matches_by_prefix() {
        let executor = MockExecutor::ok(
            "Name   Id                 Version\n\
             Tool   Publisher.VeryLon… 1.0\n",
        );
        let installed = installed_packages(PackageManager::Winget, &executor).unwrap();
        let mock = MockExecutor::ok("");
        let r = PackageResource::new(
            "Publisher.VeryLongPackageId".to_string(),
            PackageManager::Winget,
            &mock,
        );
        assert!(r.is_installed_in(&installed));

        let other = PackageResource::new(
            "Other.Package".to_string(),
            PackageManager::Winget,
            &mock,
        );
        assert!(!other.is_installed_in(&installed));
    }

    #[test]
    fn installed_scoop_skips_header_lines() {
        let executor =
            MockExecutor::ok("Name      Version   Source\n----      -------   ------\nfastfetch 2.8.0     main\nyasb      1.0       extras\n");
        let installed = installed_packages(PackageManager::Scoop, &executor).unwrap();
        assert!(installed.contains("fastfetch"));
        assert!(installed.contains("yasb"));
        assert!(!installed.contains("Name"), "header should be filtered");
        assert!(!installed.contains("----"), "separator should be filtered");
    }

    #[test]
    fn installed_pip_parses_freeze_lines() {
        let executor = MockExecutor::ok("Pywal==3.3.0\nrequests==2.31.0\n");
        let installed = installed_packages(PackageManager::Pip, &executor).unwrap();
        assert!(installed.contains("pywal"), "pip names are lowercased");
        assert!(installed.contains("requests"));
        assert!(!installed.contains("3.3.0"));
    }

    #[test]
    fn installed_empty_on_failure() {
        let executor = MockExecutor::fail();
        let installed = installed_packages(PackageManager::Scoop, &executor).unwrap();
        assert!(installed.is_empty());
    }

    #[test]
    fn is_installed_in_pip_case_insensitive() {
        let executor = MockExecutor::ok("");
        let r = PackageResource::new("PyWal".to_string(), PackageManager::Pip, &executor);
        let mut installed = HashSet::new();
        installed.insert("pywal".to_string());
        assert!(r.is_installed_in(&installed));
    }

    #[test]
    fn is_installed_in_winget_exact() {
        let executor = MockExecutor::ok("");
        let r = PackageResource::new("Git.Git".to_string(), PackageManager::Winget, &executor);
        let mut installed = HashSet::new();
        installed.insert("Git.Git".to_string());
        assert!(r.is_installed_in(&installed));

        let r2 = PackageResource::new("git.git".to_string(), PackageManager::Winget, &executor);
        assert!(!r2.is_installed_in(&installed), "winget IDs match exactly");
    }

    #[test]
    fn install_applied_on_success() {
        let executor = MockExecutor::with_responses(vec![(true, String::new())]);
        let r = PackageResource::new("fastfetch".to_string(), PackageManager::Scoop, &executor);
        assert_eq!(r.install().unwrap(), ResourceChange::Applied);
        assert_eq!(executor.call_count(), 1);
    }

    #[test]
    fn install_skipped_on_nonzero_exit() {
        let executor = MockExecutor::fail();
        let r = PackageResource::new("Git.Git".to_string(), PackageManager::Winget, &executor);
        let change = r.install().unwrap();
        assert!(
            matches!(change, ResourceChange::Skipped { ref reason } if reason.contains("winget")),
            "expected skipped with winget reason, got {change:?}"
        );
    }

    #[test]
    fn uninstall_skipped_on_failure_never_errors() {
        let executor = MockExecutor::fail();
        let r = PackageResource::new("pywal".to_string(), PackageManager::Pip, &executor);
        let change = r.uninstall().unwrap();
        assert!(matches!(change, ResourceChange::Skipped { .. }));
    }

    #[test]
    fn uninstall_applied_on_success() {
        let executor = MockExecutor::with_responses(vec![(true, String::new())]);
        let r = PackageResource::new("yasb".to_string(), PackageManager::Scoop, &executor);
        assert_eq!(r.uninstall().unwrap(), ResourceChange::Applied);
    }
}
