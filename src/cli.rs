use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the provisioning engine.
#[derive(Parser, Debug)]
#[command(
    name = "provision",
    about = "Workstation provisioning engine",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override the provisioning root directory
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install packages and deploy configuration files
    Install(InstallOpts),
    /// Report which applications and configs are present
    Check(CheckOpts),
    /// Remove deployed configs and installed packages
    Uninstall(UninstallOpts),
    /// Refresh pywal-derived colors in managed stylesheets
    Colors(ColorsOpts),
    /// Print version information
    Version,
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InstallOpts {
    /// Skip package installation, deploy configuration files only
    #[arg(long)]
    pub skip_install: bool,

    /// Overwrite configuration destinations that already exist
    #[arg(short, long)]
    pub force: bool,
}

/// Options for the `check` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CheckOpts {}

/// Options for the `uninstall` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct UninstallOpts {
    /// Do not prompt for confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Options for the `colors` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ColorsOpts {
    /// Generate a fresh palette from this wallpaper before applying
    #[arg(short, long)]
    pub wallpaper: Option<std::path::PathBuf>,
}
