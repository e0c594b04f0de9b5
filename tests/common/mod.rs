//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use provision_cli::cli::GlobalOpts;
use provision_cli::config::Config;
use provision_cli::exec::{ExecResult, Executor};

/// A throwaway provisioning root with `conf/` and `files/` directories.
pub struct TestRepo {
    dir: tempfile::TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp repo");
        std::fs::create_dir_all(dir.path().join("conf")).expect("create conf dir");
        std::fs::create_dir_all(dir.path().join("files")).expect("create files dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a config file under `conf/`.
    pub fn write_conf(&self, name: &str, content: &str) {
        std::fs::write(self.root().join("conf").join(name), content).expect("write conf file");
    }

    /// Write a deployable source under `files/`.
    pub fn write_source(&self, rel: &str, content: &str) {
        let path = self.root().join("files").join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source parent");
        }
        std::fs::write(path, content).expect("write source file");
    }

    /// A destination directory inside the repo for deployment targets.
    pub fn dest(&self) -> PathBuf {
        self.root().join("home")
    }

    /// A deployments.toml entry with an absolute target under [`Self::dest`].
    pub fn deployment_entry(&self, source: &str, target_rel: &str) -> String {
        format!(
            "[[deployment]]\nsource = \"{source}\"\ntarget = \"{}\"\n\n",
            self.dest().join(target_rel).display()
        )
    }

    pub fn config(&self) -> Config {
        Config::load(self.root()).expect("load config")
    }

    /// Global options pointing at this repo.
    pub fn global_opts(&self, dry_run: bool) -> GlobalOpts {
        GlobalOpts {
            dry_run,
            root: Some(self.root().to_path_buf()),
        }
    }
}

/// An executor whose every command succeeds with empty output and whose
/// `which` answer is fixed.
pub struct StubExecutor {
    pub which: bool,
}

impl Executor for StubExecutor {
    fn run(&self, _: &str, _: &[&str]) -> anyhow::Result<ExecResult> {
        Ok(ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        })
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.run(program, args)
    }

    fn which(&self, _: &str) -> bool {
        self.which
    }
}
