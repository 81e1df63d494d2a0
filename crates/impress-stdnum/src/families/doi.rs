//! Digital Object Identifier
//!
//! DOIs carry no check digit; validity means a `10.<registrant>/<suffix>`
//! shape survived extraction and cleanup.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;
use crate::number::{number_state_methods, NumberKind, NumberState, StandardNumber};

lazy_static! {
    // Optional scheme prefix, then 10.NNNN[.NNN]/suffix
    static ref DOI_REGEX: Regex = Regex::new(
        r#"(?i)(?:doi:\s*|info:doi/|https?://(?:dx\.)?doi\.org/)?\b(10\.[0-9]{4,}(?:\.[0-9]+)*/[^\s"<>]+)"#
    )
    .unwrap();
}

pub const DOI_INFO_PREFIX: &str = "info:doi:";
pub const DOI_RESOLVER: &str = "http://doi.org/";
pub const DOI_DX_RESOLVER: &str = "http://dx.doi.org/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doi {
    state: NumberState,
}

/// Remove trailing punctuation picked up from the surrounding sentence
fn clean_doi(doi: &str) -> String {
    doi.trim_end_matches(['.', ',', ';', ')', ']', '}', '\'', '"'])
        .to_string()
}

impl Doi {
    /// Registrant prefix (`10.1000`)
    pub fn prefix(&self) -> Option<&str> {
        self.state.canonical()?.split_once('/').map(|(p, _)| p)
    }

    /// Suffix after the first `/`
    pub fn suffix(&self) -> Option<&str> {
        self.state.canonical()?.split_once('/').map(|(_, s)| s)
    }
}

impl StandardNumber for Doi {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Doi
    }

    fn normalize(&mut self) -> &mut Self {
        let candidate = self.state.candidate(&DOI_REGEX).map(|c| clean_doi(&c));
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        if let Some((i, c)) = value.chars().enumerate().find(|(_, c)| c.is_control()) {
            return Err(ValidationError::malformed(c, i));
        }
        if self.suffix().map_or(true, str::is_empty) {
            return Err(ValidationError::NoCandidateFound);
        }
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        self.state
            .canonical()
            .map(|c| format!("{}{}", DOI_RESOLVER, c))
    }

    fn typed_variants(&self) -> Vec<String> {
        match self.state.canonical() {
            Some(c) => vec![
                format!("{} {}", self.kind().label(), c),
                format!("{}{}", DOI_INFO_PREFIX, c),
                format!("{}{}", DOI_RESOLVER, c),
                format!("{}{}", DOI_DX_RESOLVER, c),
            ],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dx_url() {
        let mut doi = Doi::default();
        doi.set("resolve http://dx.doi.org/10.1000/182 please").normalize();
        assert_eq!(doi.canonical_value(), Some("10.1000/182"));
        assert!(doi.is_valid());
        assert_eq!(
            doi.typed_variants(),
            vec![
                "DOI 10.1000/182",
                "info:doi:10.1000/182",
                "http://doi.org/10.1000/182",
                "http://dx.doi.org/10.1000/182"
            ]
        );
    }

    #[test]
    fn test_trailing_punctuation() {
        let mut doi = Doi::default();
        doi.set("See doi:10.1038/nature12373.").normalize();
        assert_eq!(doi.canonical_value(), Some("10.1038/nature12373"));
        assert_eq!(doi.prefix(), Some("10.1038"));
        assert_eq!(doi.suffix(), Some("nature12373"));
    }

    #[test]
    fn test_format_round_trip() {
        let mut doi = Doi::default();
        doi.set("info:doi/10.1126/science.1234567").normalize();
        let formatted = doi.format().unwrap();
        assert_eq!(formatted, "http://doi.org/10.1126/science.1234567");
        doi.set(&formatted).normalize();
        assert_eq!(doi.canonical_value(), Some("10.1126/science.1234567"));
    }

    #[test]
    fn test_not_a_doi() {
        let mut doi = Doi::default();
        assert!(!doi.set("11.1038/nature12373").normalize().is_valid());
        assert!(!doi.set("10.12/short").normalize().is_valid());
    }
}
