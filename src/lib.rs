//! kamae library
//!
//! Catalog, selection session, menu rendering and plan building for the
//! kamae application bootstrapper.

pub mod app;
pub mod bootstrap;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod error;
pub mod input;
pub mod installer;
pub mod manifest;
pub mod plan;
pub mod session;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use bootstrap::{complete_session, load_catalog, run_batch, Completion};
pub use catalog::{build_catalog, Catalog, CatalogItem};
pub use error::{KamaeError, Result};
pub use installer::{DryRunInstaller, Installer, JsonPlanWriter};
pub use manifest::{Application, CategoryGroup, Manifest};
pub use plan::{build_plan, selected_applications, AppStoreEntry, InstallationPlan};
pub use session::{Event, Outcome, Session};
pub use theme::Theme;
pub use types::{InstallMechanism, Priority};
pub use ui::{MenuRenderer, MenuView};
