//! Console output and the end-of-run summary.
//!
//! Messages go to the terminal with ANSI color and, stripped of escape
//! codes, to a per-run log file under the user cache directory. Task
//! outcomes are collected as the run progresses and rendered as a summary
//! before exit.
use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

/// Outcome of one task, as shown in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Ok,
    NotApplicable,
    Skipped,
    DryRun,
    Failed,
}

impl TaskStatus {
    const fn glyph(self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::NotApplicable => "·",
            Self::Skipped => "○",
            Self::DryRun => "~",
            Self::Failed => "✗",
        }
    }

    const fn color(self) -> &'static str {
        match self {
            Self::Ok => "\x1b[32m",
            Self::NotApplicable => "\x1b[2m",
            Self::Skipped | Self::DryRun => "\x1b[33m",
            Self::Failed => "\x1b[31m",
        }
    }

    const fn noun(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NotApplicable => "n/a",
            Self::Skipped => "skipped",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
struct TaskEntry {
    name: String,
    status: TaskStatus,
    detail: Option<String>,
}

/// Collects task outcomes and writes console plus file output.
///
/// The log file lives at `$XDG_CACHE_HOME/provision/provision.log`
/// (`~/.cache/provision/provision.log` by default), is truncated per run,
/// and receives every message including debug lines suppressed on the
/// terminal.
pub struct Logger {
    verbose: bool,
    entries: RefCell<Vec<TaskEntry>>,
    file: Option<RefCell<File>>,
    file_path: Option<PathBuf>,
}

fn cache_dir() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CACHE_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()?.join(".cache"),
    };
    let dir = base.join("provision");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Drop ANSI escape sequences, keeping everything else.
fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_escape = false;
    for c in text.chars() {
        if in_escape {
            // SGR sequences end on a letter ('m' in practice)
            if c.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if c == '\x1b' {
            in_escape = true;
        } else {
            out.push(c);
        }
    }
    out
}

impl Logger {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self::with_log_path(verbose, cache_dir().map(|d| d.join("provision.log")))
    }

    fn with_log_path(verbose: bool, file_path: Option<PathBuf>) -> Self {
        let file = file_path
            .as_ref()
            .and_then(|p| File::create(p).ok())
            .map(RefCell::new);
        let log = Self {
            verbose,
            entries: RefCell::new(Vec::new()),
            file,
            file_path,
        };

        let version =
            option_env!("PROVISION_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        log.to_file("RUN", &format!("provision {version}"));
        log
    }

    fn to_file(&self, level: &str, msg: &str) {
        if let Some(file) = &self.file {
            let stamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S");
            let _ = writeln!(file.borrow_mut(), "{stamp} [{level}] {}", strip_ansi(msg));
        }
    }

    /// Log file location, if one could be created.
    #[cfg(test)]
    pub fn log_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    pub fn error(&self, msg: &str) {
        eprintln!("\x1b[31merror:\x1b[0m {msg}");
        self.to_file("E", msg);
    }

    pub fn warn(&self, msg: &str) {
        eprintln!("\x1b[33mwarning:\x1b[0m {msg}");
        self.to_file("W", msg);
    }

    /// Section header for a phase of the run.
    pub fn stage(&self, msg: &str) {
        println!("\x1b[1m:: {msg}\x1b[0m");
        self.to_file("S", msg);
    }

    pub fn info(&self, msg: &str) {
        println!("   {msg}");
        self.to_file("I", msg);
    }

    /// Terminal output only when verbose; always written to the log file.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            println!("   \x1b[2m{msg}\x1b[0m");
        }
        self.to_file("D", msg);
    }

    pub fn dry_run(&self, msg: &str) {
        println!("   \x1b[36m[dry-run]\x1b[0m {msg}");
        self.to_file("D", &format!("[dry-run] {msg}"));
    }

    /// Record a task outcome for the summary.
    pub fn record_task(&self, name: &str, status: TaskStatus, detail: Option<&str>) {
        self.entries.borrow_mut().push(TaskEntry {
            name: name.to_string(),
            status,
            detail: detail.map(String::from),
        });
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.status == TaskStatus::Failed)
            .count()
    }

    /// Render all recorded task outcomes plus per-status totals.
    pub fn print_summary(&self) {
        let entries = self.entries.borrow();
        if entries.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");
        for entry in entries.iter() {
            let line = match &entry.detail {
                Some(detail) => format!("{} {} ({detail})", entry.status.glyph(), entry.name),
                None => format!("{} {}", entry.status.glyph(), entry.name),
            };
            println!("   {}{line}\x1b[0m", entry.status.color());
            self.to_file("I", &line);
        }

        let mut parts = Vec::new();
        for status in [
            TaskStatus::Ok,
            TaskStatus::NotApplicable,
            TaskStatus::Skipped,
            TaskStatus::DryRun,
            TaskStatus::Failed,
        ] {
            let n = entries.iter().filter(|e| e.status == status).count();
            if n > 0 {
                parts.push(format!("{n} {}", status.noun()));
            }
        }
        let totals = format!("{} tasks: {}", entries.len(), parts.join(", "));
        println!("\n   {totals}");
        self.to_file("I", &totals);

        if let Some(path) = &self.file_path {
            println!("   \x1b[2mlog: {}\x1b[0m", path.display());
        }
    }

    /// Yes/no prompt on the terminal; `y` or `yes` answers true.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin or stdout is unusable.
    pub fn confirm(&self, prompt: &str) -> io::Result<bool> {
        print!("{prompt} [y/N] ");
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}
