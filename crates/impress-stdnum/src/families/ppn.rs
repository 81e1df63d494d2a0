//! Pica Production Number
//!
//! Record numbers of Pica union catalogues: digits followed by a mod-11
//! check character, weights 2,3,4,… counted from the right. PPNs have no
//! fixed length, so create mode always appends a check character.

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::ppn_check_char;
use crate::error::ValidationError;
use crate::number::{
    dehyphenate, labelled, number_state_methods, NumberKind, NumberState, StandardNumber,
};

lazy_static! {
    static ref PPN_REGEX: Regex = Regex::new(r"\b[0-9]{3,9}[0-9xX]\b").unwrap();
    static ref PPN_PAYLOAD_REGEX: Regex = Regex::new(r"\b[0-9]{3,9}\b").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ppn {
    state: NumberState,
}

impl StandardNumber for Ppn {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Ppn
    }

    fn normalize(&mut self) -> &mut Self {
        let grammar: &Regex = if self.state.creates_checksum() {
            &PPN_PAYLOAD_REGEX
        } else {
            &PPN_REGEX
        };
        let candidate = self
            .state
            .candidate(grammar)
            .map(|c| dehyphenate(&c).to_uppercase());
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        let settled = settle_variable(value, self.state.creates_checksum(), ppn_check_char)?;
        self.state.set_canonical(Some(settled));
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        self.state.canonical().map(str::to_string)
    }

    fn typed_variants(&self) -> Vec<String> {
        labelled(self.kind(), &[self.format()])
    }
}

/// Check a variable-length value, or append a check character in create mode
pub(crate) fn settle_variable<F>(
    value: &str,
    create: bool,
    compute: F,
) -> Result<String, ValidationError>
where
    F: Fn(&str) -> Result<char, ValidationError>,
{
    if create {
        return Ok(format!("{}{}", value, compute(value)?));
    }
    if value.len() < 2 {
        return Err(ValidationError::length("at least 2", value.len()));
    }
    let (payload, found) = value.split_at(value.len() - 1);
    let expected = compute(payload)?;
    if found.eq_ignore_ascii_case(&expected.to_string()) {
        Ok(value.to_string())
    } else {
        Err(ValidationError::checksum(expected, found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ppn() {
        let mut ppn = Ppn::default();
        assert!(ppn.set("PPN 123456789").normalize().is_valid());
        assert!(ppn.set("123456789x").normalize().is_valid());
        assert_eq!(ppn.canonical_value(), Some("123456789X"));
        assert_eq!(ppn.typed_variants(), vec!["PPN 123456789X"]);
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut ppn = Ppn::default();
        let err = ppn.set("123456780").normalize().verify().unwrap_err();
        assert_eq!(err, ValidationError::checksum('9', '0'));
    }

    #[test]
    fn test_create_appends() {
        let mut ppn = Ppn::default();
        ppn.create_checksum(true).set("12345678").normalize();
        ppn.verify().unwrap();
        assert_eq!(ppn.canonical_value(), Some("123456789"));
    }

    #[test]
    fn test_malformed_payload() {
        assert_eq!(
            settle_variable("12X4", false, ppn_check_char),
            Err(ValidationError::malformed('X', 2))
        );
    }
}
