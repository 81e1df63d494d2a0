//! Registry configuration loaded from TOML
//!
//! ```toml
//! families = ["isbn", "issn", "doi"]
//! create_checksum = false
//! prefer_ean = true
//! isbn_ranges = "/usr/share/impress/isbn-ranges.json"
//! ```
//!
//! Every key is optional. Without `families` all families are enabled.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::number::NumberKind;

/// Settings used to build a [`Registry`](crate::Registry)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StdnumConfig {
    /// Family tags to recognize; empty means all
    pub families: Vec<String>,
    /// Compute check symbols instead of verifying them
    pub create_checksum: bool,
    /// Report ISBNs in their 13-digit form
    pub prefer_ean: bool,
    /// JSON file with ISBN range rules replacing the built-in snapshot
    pub isbn_ranges: Option<PathBuf>,
}

impl StdnumConfig {
    /// Parse and validate TOML configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StdnumConfig = toml::from_str(content)?;
        config.kinds()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// `<config dir>/impress-stdnum/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("impress-stdnum").join("config.toml"))
    }

    /// Load the file at [`default_path`](Self::default_path) when present
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Configured families, or all of them when none are listed
    pub fn kinds(&self) -> std::result::Result<Vec<NumberKind>, ValidationError> {
        if self.families.is_empty() {
            return Ok(NumberKind::all().to_vec());
        }
        self.families.iter().map(|tag| tag.parse()).collect()
    }
}
