//! Application manifest loading
//!
//! The manifest is a YAML document with two top-level mappings, `recommended`
//! and `optional`, each mapping a category name to a list of applications:
//!
//! ```yaml
//! recommended:
//!   development:
//!     - name: Visual Studio Code
//!       id: visual-studio-code
//!       install: brew_cask
//! optional:
//!   productivity:
//!     - name: Things 3
//!       id: things
//!       install: mas
//!       mas_id: "904280696"
//! ```
//!
//! Categories keep the order they are written in, which is what makes the
//! catalog (and therefore the menu) deterministic.

use anyhow::bail;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{KamaeError, Result};
use crate::types::InstallMechanism;

/// Manifest location relative to the working directory (and the fallback)
pub const DEFAULT_MANIFEST_PATH: &str = "modules/apps.yaml";

/// A single installable application as written in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    pub id: String,
    pub install: InstallMechanism,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mas_id: Option<String>,
}

impl Application {
    /// Create an application installed through Homebrew or as a cask
    pub fn new(name: impl Into<String>, id: impl Into<String>, install: InstallMechanism) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            install,
            mas_id: None,
        }
    }

    /// Create an App Store application
    pub fn app_store(
        name: impl Into<String>,
        id: impl Into<String>,
        mas_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            install: InstallMechanism::Mas,
            mas_id: Some(mas_id.into()),
        }
    }
}

/// One named category and its applications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub name: String,
    pub apps: Vec<Application>,
}

impl CategoryGroup {
    pub fn new(name: impl Into<String>, apps: Vec<Application>) -> Self {
        Self {
            name: name.into(),
            apps,
        }
    }
}

/// Category mapping that remembers document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryGroups(pub Vec<CategoryGroup>);

impl<'de> Deserialize<'de> for CategoryGroups {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = CategoryGroups;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of category name to a list of applications")
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(CategoryGroups::default())
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(CategoryGroups::default())
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, apps)) = map.next_entry::<String, Option<Vec<Application>>>()? {
                    if groups.iter().any(|group: &CategoryGroup| group.name == name) {
                        return Err(de::Error::custom(format!("duplicate category `{name}`")));
                    }
                    groups.push(CategoryGroup::new(name, apps.unwrap_or_default()));
                }
                Ok(CategoryGroups(groups))
            }
        }

        deserializer.deserialize_any(GroupsVisitor)
    }
}

/// The complete application manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub recommended: CategoryGroups,
    #[serde(default)]
    pub optional: CategoryGroups,
}

impl Manifest {
    /// Load, parse and validate a manifest file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading manifest");

        let content = fs::read_to_string(path)
            .map_err(|e| KamaeError::manifest_load(path, e.to_string()))?;
        let manifest = Self::from_yaml(&content)
            .map_err(|e| KamaeError::manifest_load(path, e.to_string()))?;
        manifest
            .validate()
            .map_err(|e| KamaeError::manifest_load(path, format!("{e:#}")))?;

        info!(
            path = %path.display(),
            recommended = manifest.recommended.0.len(),
            optional = manifest.optional.0.len(),
            "Manifest loaded"
        );
        Ok(manifest)
    }

    /// Parse a manifest from YAML text without validating it
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_norway::Error> {
        // An empty document is a valid, empty manifest
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_norway::from_str(content)
    }

    /// Check the per-application rules the YAML schema cannot express
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();

        for (section, groups) in [("recommended", &self.recommended), ("optional", &self.optional)] {
            for group in &groups.0 {
                for app in &group.apps {
                    let location = format!("{section}.{}", group.name);

                    if app.name.trim().is_empty() {
                        bail!("application in '{location}' has an empty name");
                    }
                    if app.id.trim().is_empty() {
                        bail!("application '{}' in '{location}' has an empty id", app.name);
                    }

                    let has_store_id = app.mas_id.as_deref().is_some_and(|id| !id.trim().is_empty());
                    if app.install.requires_store_id() && !has_store_id {
                        bail!("application '{}' in '{location}' uses mas but has no mas_id", app.id);
                    }
                    if !app.install.requires_store_id() && app.mas_id.is_some() {
                        bail!(
                            "application '{}' in '{location}' has a mas_id but installs via {}",
                            app.id,
                            app.install
                        );
                    }

                    if !app.install.is_recognized() {
                        warn!(id = %app.id, install = %app.install, "Unrecognized install mechanism in manifest");
                    }
                    if !seen.insert(app.id.as_str()) {
                        warn!(id = %app.id, "Application listed more than once in manifest");
                    }
                }
            }
        }

        Ok(())
    }
}

/// Locate the manifest when no explicit path was given
///
/// Looks next to the installed binary first (`<exe dir>/../modules/apps.yaml`),
/// then relative to the working directory.
pub fn default_manifest_path() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join("..").join(DEFAULT_MANIFEST_PATH);
            if candidate.exists() {
                return candidate;
            }
        }
    }

    PathBuf::from(DEFAULT_MANIFEST_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
recommended:
  util:
    - name: Raycast
      id: raycast
      install: brew_cask
  dev:
    - name: Git
      id: git
      install: brew
optional:
  productivity:
    - name: Things 3
      id: things
      install: mas
      mas_id: "904280696"
"#;

    #[test]
    fn test_categories_keep_document_order() {
        let manifest = Manifest::from_yaml(SAMPLE).expect("parse");
        let names: Vec<&str> = manifest
            .recommended
            .0
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, vec!["util", "dev"]);
    }

    #[test]
    fn test_mechanisms_and_store_ids_parse() {
        let manifest = Manifest::from_yaml(SAMPLE).expect("parse");
        let things = &manifest.optional.0[0].apps[0];
        assert_eq!(things.install, InstallMechanism::Mas);
        assert_eq!(things.mas_id.as_deref(), Some("904280696"));
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let manifest = Manifest::from_yaml("recommended:\n").expect("parse");
        assert!(manifest.recommended.0.is_empty());
        assert!(manifest.optional.0.is_empty());

        let manifest = Manifest::from_yaml("").expect("parse");
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_unknown_mechanism_survives_parsing() {
        let yaml = "optional:\n  misc:\n    - name: Thing\n      id: thing\n      install: apt\n";
        let manifest = Manifest::from_yaml(yaml).expect("parse");
        assert_eq!(
            manifest.optional.0[0].apps[0].install,
            InstallMechanism::Unrecognized("apt".to_string())
        );
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_mas_without_store_id_is_rejected() {
        let yaml = "recommended:\n  misc:\n    - name: Xcode\n      id: xcode\n      install: mas\n";
        let manifest = Manifest::from_yaml(yaml).expect("parse");
        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("has no mas_id"));
    }

    #[test]
    fn test_store_id_on_brew_app_is_rejected() {
        let yaml = "recommended:\n  misc:\n    - name: Git\n      id: git\n      install: brew\n      mas_id: \"1\"\n";
        let manifest = Manifest::from_yaml(yaml).expect("parse");
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let yaml = "recommended:\n  misc:\n    - name: Git\n      id: \"\"\n      install: brew\n";
        let manifest = Manifest::from_yaml(yaml).expect("parse");
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_duplicate_category_is_rejected() {
        let yaml = "recommended:\n  dev:\n    - name: Git\n      id: git\n      install: brew\n  dev:\n    - name: Jq\n      id: jq\n      install: brew\n";
        let err = Manifest::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("dev"));

        // The same category may appear once per section
        let yaml = "recommended:\n  dev: []\noptional:\n  dev: []\n";
        assert!(Manifest::from_yaml(yaml).is_ok());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        assert!(Manifest::from_yaml("recommended: [not, a, mapping").is_err());
    }
}
