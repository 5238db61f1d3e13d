//! Type-safe catalog types for kamae
//!
//! Install mechanisms and priorities are proper Rust enums instead of the raw
//! strings found in the manifest, so the plan builder can match exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

/// How an application gets onto the machine
///
/// Manifest values that are not recognized are kept verbatim in
/// [`InstallMechanism::Unrecognized`] so the plan builder can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(EnumString)]
#[serde(from = "String", into = "String")]
pub enum InstallMechanism {
    /// Homebrew formula (`brew install <id>`)
    #[strum(serialize = "brew")]
    Brew,
    /// Homebrew cask (`brew install --cask <id>`)
    #[strum(serialize = "brew_cask")]
    BrewCask,
    /// Mac App Store (`mas install <mas_id>`)
    #[strum(serialize = "mas")]
    Mas,
    /// Anything else found in the manifest
    #[strum(default)]
    Unrecognized(String),
}

impl InstallMechanism {
    /// Manifest spelling of this mechanism
    pub fn as_str(&self) -> &str {
        match self {
            Self::Brew => "brew",
            Self::BrewCask => "brew_cask",
            Self::Mas => "mas",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Whether this mechanism is one the plan builder knows how to place
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Whether applications using this mechanism need a store identifier
    pub fn requires_store_id(&self) -> bool {
        matches!(self, Self::Mas)
    }
}

impl fmt::Display for InstallMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for InstallMechanism {
    fn from(raw: String) -> Self {
        let parsed = raw.parse();
        parsed.unwrap_or(Self::Unrecognized(raw))
    }
}

impl From<InstallMechanism> for String {
    fn from(mechanism: InstallMechanism) -> Self {
        mechanism.as_str().to_string()
    }
}

/// Whether an application is pre-checked in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Recommended,
    Optional,
}

impl Priority {
    /// Recommended applications start out selected
    pub const fn default_selected(self) -> bool {
        matches!(self, Self::Recommended)
    }

    /// Heading used for this priority's pass in the menu
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Recommended => "RECOMMENDED APPLICATIONS",
            Self::Optional => "OPTIONAL APPLICATIONS",
        }
    }
}
