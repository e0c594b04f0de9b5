#![allow(clippy::expect_used, clippy::unwrap_used)]
//! End-to-end tests for the install command against a throwaway root.
mod common;

use common::TestRepo;
use provision_cli::cli::InstallOpts;
use provision_cli::commands;
use provision_cli::logging::Logger;

fn install_opts(force: bool) -> InstallOpts {
    InstallOpts {
        skip_install: true,
        force,
    }
}

#[test]
fn deploys_manifest_entries() {
    let repo = TestRepo::new();
    repo.write_source("wezterm.lua", "return {}");
    repo.write_source("profile.ps1", "# profile");
    repo.write_conf(
        "deployments.toml",
        &format!(
            "{}{}",
            repo.deployment_entry("wezterm.lua", ".config/wezterm/wezterm.lua"),
            repo.deployment_entry("profile.ps1", "profile.ps1"),
        ),
    );

    let log = Logger::new(false);
    commands::install::run(&repo.global_opts(false), &install_opts(false), &log)
        .expect("install should succeed");

    let deployed = repo.dest().join(".config/wezterm/wezterm.lua");
    assert!(deployed.exists());
    assert_eq!(
        std::fs::read_to_string(&deployed).expect("read deployed file"),
        "return {}"
    );
    assert!(repo.dest().join("profile.ps1").exists());
}

#[test]
fn second_install_is_idempotent() {
    let repo = TestRepo::new();
    repo.write_source("app.conf", "v1");
    repo.write_conf(
        "deployments.toml",
        &repo.deployment_entry("app.conf", "app.conf"),
    );

    let log = Logger::new(false);
    commands::install::run(&repo.global_opts(false), &install_opts(false), &log)
        .expect("first install");

    let log = Logger::new(false);
    commands::install::run(&repo.global_opts(false), &install_opts(false), &log)
        .expect("second install");

    assert_eq!(
        std::fs::read_to_string(repo.dest().join("app.conf")).expect("read"),
        "v1"
    );
}

#[test]
fn force_overwrites_existing_destination() {
    let repo = TestRepo::new();
    repo.write_source("app.conf", "managed");
    repo.write_conf(
        "deployments.toml",
        &repo.deployment_entry("app.conf", "app.conf"),
    );
    std::fs::create_dir_all(repo.dest()).expect("create dest");
    std::fs::write(repo.dest().join("app.conf"), "preexisting").expect("seed destination");

    // without force the destination is preserved
    let log = Logger::new(false);
    commands::install::run(&repo.global_opts(false), &install_opts(false), &log)
        .expect("install without force");
    assert_eq!(
        std::fs::read_to_string(repo.dest().join("app.conf")).expect("read"),
        "preexisting"
    );

    let log = Logger::new(false);
    commands::install::run(&repo.global_opts(false), &install_opts(true), &log)
        .expect("install with force");
    assert_eq!(
        std::fs::read_to_string(repo.dest().join("app.conf")).expect("read"),
        "managed"
    );
}

#[test]
fn missing_source_is_not_fatal() {
    let repo = TestRepo::new();
    repo.write_conf(
        "deployments.toml",
        &repo.deployment_entry("never-created.conf", "x.conf"),
    );

    let log = Logger::new(false);
    commands::install::run(&repo.global_opts(false), &install_opts(false), &log)
        .expect("missing sources are skipped, not fatal");
    assert!(!repo.dest().join("x.conf").exists());
}

#[test]
fn dry_run_deploys_nothing() {
    let repo = TestRepo::new();
    repo.write_source("app.conf", "v1");
    repo.write_conf(
        "deployments.toml",
        &repo.deployment_entry("app.conf", "app.conf"),
    );

    let log = Logger::new(false);
    commands::install::run(&repo.global_opts(true), &install_opts(false), &log)
        .expect("dry run succeeds");
    assert!(!repo.dest().exists());
}

#[test]
fn creates_configured_color_directories() {
    let repo = TestRepo::new();
    repo.write_conf(
        "colors.toml",
        &format!(
            "directories = [\"{}\"]\n",
            repo.dest().join(".cache/wal").display()
        ),
    );

    let log = Logger::new(false);
    commands::install::run(&repo.global_opts(false), &install_opts(false), &log)
        .expect("install succeeds");
    assert!(repo.dest().join(".cache/wal").is_dir());
}

#[test]
fn invalid_config_is_fatal() {
    let repo = TestRepo::new();
    repo.write_conf("deployments.toml", "[[deployment]\nsource = \"x\"\n");

    let log = Logger::new(false);
    let result = commands::install::run(&repo.global_opts(false), &install_opts(false), &log);
    assert!(result.is_err(), "malformed TOML must abort the run");
}
