//! Installation plan
//!
//! Reduces a final selection into one list per install mechanism. The plan
//! is what the installation step consumes; building it never runs anything.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::{KamaeError, Result};
use crate::manifest::Application;
use crate::types::InstallMechanism;

/// An App Store application and its store identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppStoreEntry {
    pub id: String,
    pub store_id: String,
}

/// Selected application identifiers partitioned by install mechanism
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallationPlan {
    /// Homebrew formulae
    pub formulae: Vec<String>,
    /// Homebrew casks
    pub casks: Vec<String>,
    /// Mac App Store applications
    pub app_store: Vec<AppStoreEntry>,
}

impl InstallationPlan {
    /// Total number of applications across all mechanisms
    pub fn len(&self) -> usize {
        self.formulae.len() + self.casks.len() + self.app_store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable command summary, one line per non-empty mechanism
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.formulae.is_empty() {
            lines.push(format!("Homebrew packages: brew install {}", self.formulae.join(" ")));
        }
        if !self.casks.is_empty() {
            lines.push(format!("Homebrew casks: brew install --cask {}", self.casks.join(" ")));
        }
        if !self.app_store.is_empty() {
            let entries: Vec<String> = self
                .app_store
                .iter()
                .map(|entry| format!("{} (ID: {})", entry.id, entry.store_id))
                .collect();
            lines.push(format!("Mac App Store apps: {}", entries.join(", ")));
        }

        lines
    }

    /// Plan as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the plan for `selected` catalog indices
///
/// Indices are visited in ascending order, so each list follows catalog order.
/// An empty selection yields an empty plan, not an error.
pub fn build_plan(catalog: &Catalog, selected: &BTreeSet<usize>) -> Result<InstallationPlan> {
    let mut plan = InstallationPlan::default();

    for app in selected_applications(catalog, selected)? {
        match &app.install {
            InstallMechanism::Brew => plan.formulae.push(app.id.clone()),
            InstallMechanism::BrewCask => plan.casks.push(app.id.clone()),
            InstallMechanism::Mas => {
                let store_id = app
                    .mas_id
                    .clone()
                    .ok_or_else(|| KamaeError::MissingStoreId { id: app.id.clone() })?;
                plan.app_store.push(AppStoreEntry {
                    id: app.id.clone(),
                    store_id,
                });
            }
            InstallMechanism::Unrecognized(raw) => {
                return Err(KamaeError::unknown_mechanism(&app.id, raw));
            }
        }
    }

    info!(
        formulae = plan.formulae.len(),
        casks = plan.casks.len(),
        app_store = plan.app_store.len(),
        "Installation plan built"
    );
    Ok(plan)
}

/// The applications behind `selected`, in catalog order
pub fn selected_applications<'a>(
    catalog: &'a Catalog,
    selected: &BTreeSet<usize>,
) -> Result<Vec<&'a Application>> {
    selected
        .iter()
        .map(|&index| {
            catalog
                .get(index)
                .map(|item| item.app())
                .ok_or(KamaeError::InvalidSelection {
                    index,
                    len: catalog.len(),
                })
        })
        .collect()
}
