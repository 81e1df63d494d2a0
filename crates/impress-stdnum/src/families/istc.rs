//! International Standard Text Code
//!
//! Sixteen hexadecimal characters: registration agency (3), year (4),
//! work element (8) and a check character.

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::{first_foreign, istc_check_char};
use crate::error::ValidationError;
use crate::number::{
    dehyphenate, labelled, number_state_methods, settle_check, strip_label, NumberKind,
    NumberState, StandardNumber,
};

lazy_static! {
    static ref ISTC_REGEX: Regex = Regex::new(
        r"(?i)\b(?:ISTC:?\s*)?([0-9A-F]{3}[\- ]?[0-9A-F]{4}[\- ]?[0-9A-F]{8}(?:[\- ]?[0-9A-F])?)\b"
    )
    .unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Istc {
    state: NumberState,
}

impl StandardNumber for Istc {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Istc
    }

    fn normalize(&mut self) -> &mut Self {
        let candidate = self
            .state
            .candidate(&ISTC_REGEX)
            .map(|c| dehyphenate(strip_label(&c, "ISTC")).to_uppercase());
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        if let Some(err) = first_foreign(value, |c| c.is_ascii_hexdigit()) {
            return Err(err);
        }
        let settled = settle_check(value, 15, self.state.creates_checksum(), istc_check_char)?;
        self.state.set_canonical(Some(settled));
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        let value = self.state.canonical().filter(|c| c.len() == 16)?;
        Some(format!(
            "{}-{}-{}-{}",
            &value[..3],
            &value[3..7],
            &value[7..15],
            &value[15..]
        ))
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
    fn test_valid_istc() {
        let mut istc = Istc::default();
        istc.set("ISTC 0A9-2002-12B4A105-7").normalize();
        assert_eq!(istc.canonical_value(), Some("0A9200212B4A1057"));
        assert!(istc.is_valid());
        assert_eq!(istc.format().as_deref(), Some("0A9-2002-12B4A105-7"));
    }

    #[test]
    fn test_lowercase_input() {
        let mut istc = Istc::default();
        assert!(istc.set("0a9200212b4a1057").normalize().is_valid());
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut istc = Istc::default();
        let err = istc.set("0A9-2002-12B4A105-8").normalize().verify().unwrap_err();
        assert_eq!(err, ValidationError::checksum('7', '8'));
    }

    #[test]
    fn test_create_checksum() {
        let mut istc = Istc::default();
        istc.create_checksum(true).set("0A9-2002-12B4A105").normalize();
        assert!(istc.is_valid());
        assert_eq!(
            istc.typed_variants(),
            vec!["ISTC 0A9200212B4A1057", "ISTC 0A9-2002-12B4A105-7"]
        );
    }
}
