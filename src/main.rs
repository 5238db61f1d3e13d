//! kamae - main entry point
//!
//! Loads the manifest, runs either the interactive menu or batch mode, and
//! hands the confirmed selection to the installer.

use std::fs::OpenOptions;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use kamae::app;
use kamae::cli::{Cli, Commands, InitArgs};
use kamae::components::keybindings::KeybindingContext;
use kamae::manifest::default_manifest_path;
use kamae::{
    complete_session, load_catalog, run_batch, Completion, DryRunInstaller, Installer,
    JsonPlanWriter, MenuRenderer, Session, Theme,
};

const NOTHING_SELECTED: &str = "No applications selected. Exiting.";

/// Initialize tracing; `RUST_LOG` overrides the default `warn` level
fn init_logger(log_file: Option<&Path>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(path) = log_file else {
        init_stderr_logger(env_filter);
        return;
    };

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
            info!(path = %path.display(), "logging initialized");
        }
        Err(e) => {
            // Fall back to stderr rather than refusing to start
            init_stderr_logger(env_filter);
            warn!(error = %e, path = %path.display(), "failed to open log file; using stderr");
        }
    }
}

fn init_stderr_logger(env_filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application entry point
fn main() {
    let cli = Cli::parse_args();
    init_logger(cli.log_file.as_deref());
    info!("kamae starting up");

    let result = match &cli.command {
        Commands::Init(args) => run_init(args),
    };

    if let Err(e) = result {
        error!(error = %e, "kamae failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_init(args: &InitArgs) -> kamae::Result<()> {
    let manifest_path = args.manifest.clone().unwrap_or_else(default_manifest_path);
    let catalog = load_catalog(&manifest_path)?;

    let completion = if args.test {
        if !args.json {
            println!("--- Test Mode: Using default selections ---");
        }
        with_installer(args.json, |installer| run_batch(&catalog, installer))?
    } else {
        let theme = if args.no_color { Theme::plain() } else { Theme::default() };
        let keybindings = KeybindingContext::new();
        let renderer = MenuRenderer::new(theme, &keybindings);
        let session: Session = app::run_interactive(&catalog, renderer, keybindings)?;
        with_installer(args.json, |installer| complete_session(&catalog, &session, installer))?
    };

    match completion {
        Completion::Cancelled => println!("Selection cancelled. Nothing will be installed."),
        Completion::NothingSelected if args.json => eprintln!("{NOTHING_SELECTED}"),
        Completion::NothingSelected => println!("{NOTHING_SELECTED}"),
        Completion::Installed(plan) => info!(total = plan.len(), "Installation finished"),
    }
    Ok(())
}

/// Run `f` with the installer picked by the `--json` flag
fn with_installer<T>(
    json: bool,
    f: impl FnOnce(&mut dyn Installer) -> kamae::Result<T>,
) -> kamae::Result<T> {
    if json {
        f(&mut JsonPlanWriter::new(stdout().lock()))
    } else {
        f(&mut DryRunInstaller::new(stdout().lock()))
    }
}
