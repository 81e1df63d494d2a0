//! International Standard Serial Number

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::issn_check_char;
use crate::error::ValidationError;
use crate::number::{
    dehyphenate, labelled, settle_check, NumberKind, NumberState, StandardNumber,
};

lazy_static! {
    static ref ISSN_REGEX: Regex = Regex::new(r"\b[0-9]{4}[\- ]?[0-9]{3}[0-9xX]?\b").unwrap();
}

/// ISSN: seven digits plus a mod-11 check character (`X` for ten)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issn {
    state: NumberState,
    formatted: Option<String>,
}

impl Issn {
    fn derive_formatted(&mut self) {
        self.formatted = self
            .state
            .canonical()
            .filter(|c| c.len() > 7)
            .map(|c| format!("{}-{}", &c[..4], &c[4..]));
    }
}

impl StandardNumber for Issn {
    fn set(&mut self, value: &str) -> &mut Self {
        self.state.set(value);
        self.formatted = None;
        self
    }

    fn create_checksum(&mut self, create: bool) -> &mut Self {
        self.state.set_create(create);
        self
    }

    fn canonical_value(&self) -> Option<&str> {
        self.state.canonical()
    }

    fn reset(&mut self) -> &mut Self {
        self.state.reset();
        self.formatted = None;
        self
    }

    fn kind(&self) -> NumberKind {
        NumberKind::Issn
    }

    fn normalize(&mut self) -> &mut Self {
        let candidate = self
            .state
            .candidate(&ISSN_REGEX)
            .map(|c| dehyphenate(&c).to_uppercase());
        self.state.set_canonical(candidate);
        self.derive_formatted();
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        let settled = settle_check(value, 7, self.state.creates_checksum(), issn_check_char)?;
        self.state.set_canonical(Some(settled));
        self.derive_formatted();
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        self.formatted.clone()
    }

    fn typed_variants(&self) -> Vec<String> {
        labelled(
            self.kind(),
            &[self.state.canonical().map(str::to_string), self.format()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_issn() {
        let mut issn = Issn::default();
        issn.set("ISSN 0317-8471").normalize();
        assert_eq!(issn.canonical_value(), Some("03178471"));
        assert_eq!(issn.format().as_deref(), Some("0317-8471"));
        assert!(issn.is_valid());
        assert_eq!(
            issn.typed_variants(),
            vec!["ISSN 03178471", "ISSN 0317-8471"]
        );
    }

    #[test]
    fn test_x_check_character() {
        let mut issn = Issn::default();
        // 2434-561X
        assert!(issn.set("2434-561x").normalize().is_valid());
        assert_eq!(issn.canonical_value(), Some("2434561X"));
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut issn = Issn::default();
        let err = issn.set("0317-8472").normalize().verify().unwrap_err();
        assert_eq!(err, ValidationError::checksum('1', '2'));
    }

    #[test]
    fn test_create_checksum() {
        let mut issn = Issn::default();
        issn.create_checksum(true).set("0317-847").normalize();
        assert_eq!(issn.format(), None);
        issn.verify().unwrap();
        assert_eq!(issn.format().as_deref(), Some("0317-8471"));
    }

    #[test]
    fn test_no_candidate() {
        let mut issn = Issn::default();
        assert!(!issn.set("no serial here").normalize().is_valid());
        assert_eq!(issn.canonical_value(), None);
        assert_eq!(issn.format(), None);
    }
}
