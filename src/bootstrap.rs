//! Shared start and finish of a run
//!
//! Both entry points (interactive menu and batch mode) load the catalog the
//! same way and hand their terminal session to [`complete_session`]; they only
//! differ in how that terminal session is reached.

use std::path::Path;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::installer::Installer;
use crate::manifest::Manifest;
use crate::plan::{build_plan, selected_applications, InstallationPlan};
use crate::session::Session;

/// What happened after the session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The user quit; nothing was planned
    Cancelled,
    /// Confirmed with an empty selection
    NothingSelected,
    /// Confirmed and handed to the installer
    Installed(InstallationPlan),
}

/// Load the manifest at `path` and build its catalog
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let manifest = Manifest::load_from_file(path)?;
    Catalog::from_manifest(&manifest)
}

/// Turn a terminal session into a plan and pass it to `installer`
///
/// A session that is not terminal yet is treated like a cancelled one.
pub fn complete_session<I: Installer + ?Sized>(
    catalog: &Catalog,
    session: &Session,
    installer: &mut I,
) -> Result<Completion> {
    let Some(selected) = session.final_selection() else {
        info!(outcome = ?session.outcome(), "Session not confirmed, nothing to install");
        return Ok(Completion::Cancelled);
    };

    let plan = build_plan(catalog, selected)?;
    if plan.is_empty() {
        info!("Confirmed with an empty selection, skipping installer");
        return Ok(Completion::NothingSelected);
    }

    let apps = selected_applications(catalog, selected)?;
    installer.install(&apps, &plan)?;
    Ok(Completion::Installed(plan))
}

/// Batch mode: confirm the default selection without showing the menu
pub fn run_batch<I: Installer + ?Sized>(catalog: &Catalog, installer: &mut I) -> Result<Completion> {
    let session = Session::confirmed_defaults(catalog);
    complete_session(catalog, &session, installer)
}
