//! Open Researcher and Contributor ID
//!
//! An ORCID is an ISNI from a reserved block, written in hyphenated groups
//! and resolvable under `orcid.org`.

use crate::error::ValidationError;
use crate::number::{labelled, NumberKind, StandardNumber};

use super::Isni;

/// Resolver prefix for ORCID URIs
pub const ORCID_URI_PREFIX: &str = "http://orcid.org/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Orcid {
    isni: Isni,
}

impl Orcid {
    /// Resolvable URI built from the canonical value
    pub fn uri(&self) -> Option<String> {
        self.canonical_value()
            .map(|c| format!("{}{}", ORCID_URI_PREFIX, c))
    }
}

impl StandardNumber for Orcid {
    fn kind(&self) -> NumberKind {
        NumberKind::Orcid
    }

    fn set(&mut self, value: &str) -> &mut Self {
        self.isni.set(value);
        self
    }

    fn create_checksum(&mut self, create: bool) -> &mut Self {
        self.isni.create_checksum(create);
        self
    }

    fn normalize(&mut self) -> &mut Self {
        self.isni.normalize();
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        self.isni.verify()?;
        Ok(self)
    }

    fn canonical_value(&self) -> Option<&str> {
        self.isni.canonical_value()
    }

    fn format(&self) -> Option<String> {
        self.isni.grouped("-")
    }

    fn typed_variants(&self) -> Vec<String> {
        let mut variants = labelled(
            self.kind(),
            &[self.canonical_value().map(str::to_string), self.format()],
        );
        variants.extend(self.uri());
        variants
    }

    fn reset(&mut self) -> &mut Self {
        self.isni.reset();
        self
    }
}
