//! Registry of standard number families
//!
//! The registry maps family tags to constructors and fans a piece of text
//! out to every configured family. Families never see each other's
//! results: a failure in one is just "not this family".

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::StdnumConfig;
use crate::error::{Result, ValidationError};
use crate::families::Isbn;
use crate::identifier::Identifier;
use crate::isbn_range::RangeTable;
use crate::number::{NumberKind, StandardNumber};

/// A standard number found in text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct RecognizedNumber {
    pub kind: NumberKind,
    pub canonical: String,
    pub formatted: Option<String>,
    pub variants: Vec<String>,
}

impl RecognizedNumber {
    /// Snapshot of a number; `None` until it has a canonical value
    pub fn from_identifier(id: &Identifier) -> Option<Self> {
        Some(Self {
            kind: id.kind(),
            canonical: id.canonical_value()?.to_string(),
            formatted: id.format(),
            variants: id.typed_variants(),
        })
    }
}

/// Family constructors plus the settings every constructed number gets
#[derive(Debug, Clone)]
pub struct Registry {
    kinds: Vec<NumberKind>,
    create_checksum: bool,
    prefer_ean: bool,
    ranges: Arc<RangeTable>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(NumberKind::all().to_vec())
    }
}

impl Registry {
    pub fn new(kinds: Vec<NumberKind>) -> Self {
        Self {
            kinds,
            create_checksum: false,
            prefer_ean: false,
            ranges: RangeTable::shared_default(),
        }
    }

    /// Registry over families named by tag (case-insensitive)
    pub fn from_tags<I, S>(tags: I) -> std::result::Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kinds = tags
            .into_iter()
            .map(|tag| tag.as_ref().parse())
            .collect::<std::result::Result<Vec<NumberKind>, _>>()?;
        Ok(Self::new(kinds))
    }

    /// Registry described by a configuration, loading its range table
    pub fn from_config(config: &StdnumConfig) -> Result<Self> {
        let mut registry = Self::new(config.kinds()?)
            .with_create_checksum(config.create_checksum)
            .with_prefer_ean(config.prefer_ean);
        if let Some(path) = &config.isbn_ranges {
            registry = registry.with_ranges(Arc::new(RangeTable::load(path)?));
        }
        tracing::debug!(
            "Registry configured with {} families",
            registry.kinds.len()
        );
        Ok(registry)
    }

    pub fn with_create_checksum(mut self, create: bool) -> Self {
        self.create_checksum = create;
        self
    }

    pub fn with_prefer_ean(mut self, prefer_ean: bool) -> Self {
        self.prefer_ean = prefer_ean;
        self
    }

    pub fn with_ranges(mut self, ranges: Arc<RangeTable>) -> Self {
        self.ranges = ranges;
        self
    }

    /// Configured families, in lookup order
    pub fn kinds(&self) -> &[NumberKind] {
        &self.kinds
    }

    /// Empty number of `kind` carrying the registry's settings.
    ///
    /// Works for any family, configured or not.
    pub fn create(&self, kind: NumberKind) -> Identifier {
        let mut id = match kind {
            NumberKind::Isbn => {
                let mut isbn = Isbn::with_ranges(Arc::clone(&self.ranges));
                isbn.prefer_ean(self.prefer_ean);
                Identifier::from(isbn)
            }
            _ => Identifier::new(kind),
        };
        id.create_checksum(self.create_checksum);
        id
    }

    /// Like [`create`](Self::create), looking the family up by tag
    pub fn create_by_tag(&self, tag: &str) -> std::result::Result<Identifier, ValidationError> {
        Ok(self.create(tag.parse()?))
    }

    /// Run one family over `text`, returning the verified number
    pub fn check(&self, kind: NumberKind, text: &str) -> std::result::Result<Identifier, ValidationError> {
        let mut id = self.create(kind);
        id.set(text).normalize().verify()?;
        Ok(id)
    }

    /// Every configured family that validates `text`
    pub fn recognize(&self, text: &str) -> Vec<RecognizedNumber> {
        self.kinds
            .iter()
            .filter_map(|kind| match self.check(*kind, text) {
                Ok(id) => {
                    tracing::trace!("{} recognized in {:?}", kind, text);
                    RecognizedNumber::from_identifier(&id)
                }
                Err(e) => {
                    tracing::trace!("{} rejected {:?}: {}", kind, text, e);
                    None
                }
            })
            .collect()
    }

    /// Typed variants of every family that validates `text`
    pub fn lookup(&self, text: &str) -> Vec<String> {
        let variants: Vec<String> = self
            .recognize(text)
            .into_iter()
            .flat_map(|number| number.variants)
            .collect();
        tracing::debug!("{} variants for {:?}", variants.len(), text);
        variants
    }
}
