use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kamae - bootstrap a new Mac by picking applications from a manifest
#[derive(Parser, Debug)]
#[command(name = "kamae")]
#[command(about = "Interactive application selection and installation")]
#[command(version)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Append logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive application selection and installation
    Init(InitArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct InitArgs {
    /// Skip the menu and install the recommended defaults
    #[arg(long, visible_alias = "batch")]
    pub test: bool,

    /// Manifest to read instead of modules/apps.yaml
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Print the installation plan as JSON instead of the install report
    #[arg(long)]
    pub json: bool,

    /// Render the menu without colors
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
