//! The catalog of selectable applications
//!
//! A [`Catalog`] is built once from the manifest groups and never changes
//! afterwards. Session cursors and selections are plain indices into it.

use tracing::debug;

use crate::error::{KamaeError, Result};
use crate::manifest::{Application, CategoryGroup, Manifest};
use crate::types::Priority;

/// One selectable entry in the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    app: Application,
    category: String,
    priority: Priority,
    label: String,
}

impl CatalogItem {
    pub fn new(app: Application, category: impl Into<String>, priority: Priority) -> Self {
        let label = format!("{} ({})", app.name, priority);
        Self {
            app,
            category: category.into(),
            priority,
            label,
        }
    }

    pub fn app(&self) -> &Application {
        &self.app
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Menu label: the application name plus its priority in parentheses
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn default_selected(&self) -> bool {
        self.priority.default_selected()
    }
}

/// Ordered, immutable sequence of catalog items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    /// Indices of the items that start out selected
    pub fn default_selection(&self) -> impl Iterator<Item = usize> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.default_selected())
            .map(|(index, _)| index)
    }

    /// Build the catalog for a loaded manifest
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        build_catalog(&manifest.recommended.0, &manifest.optional.0)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogItem;
    type IntoIter = std::slice::Iter<'a, CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Flatten recommended and optional groups into a catalog
///
/// Recommended items come first, then optional ones, each in group order.
/// Fails with [`KamaeError::EmptyCatalog`] when there is nothing to select.
pub fn build_catalog(recommended: &[CategoryGroup], optional: &[CategoryGroup]) -> Result<Catalog> {
    let items: Vec<CatalogItem> = [(Priority::Recommended, recommended), (Priority::Optional, optional)]
        .into_iter()
        .flat_map(|(priority, groups)| {
            groups.iter().flat_map(move |group| {
                group
                    .apps
                    .iter()
                    .map(move |app| CatalogItem::new(app.clone(), group.name.clone(), priority))
            })
        })
        .collect();

    if items.is_empty() {
        return Err(KamaeError::EmptyCatalog);
    }

    debug!(items = items.len(), "Catalog built");
    Ok(Catalog { items })
}
