//! International Standard Name Identifier
//!
//! Sixteen characters checked with ISO 7064 MOD 11-2. [`Orcid`] reuses the
//! same core.
//!
//! [`Orcid`]: super::Orcid

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::{first_foreign, mod11_2_check_char};
use crate::error::ValidationError;
use crate::number::{
    dehyphenate, labelled, number_state_methods, settle_check, NumberKind, NumberState,
    StandardNumber,
};

lazy_static! {
    // Deliberately loose; cleanup happens after extraction
    static ref ISNI_REGEX: Regex = Regex::new(r"[0-9][0-9xX\-\s]{13,34}[0-9xX]").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Isni {
    state: NumberState,
}

impl Isni {
    /// Canonical value split into four blocks of four joined by `separator`
    pub(crate) fn grouped(&self, separator: &str) -> Option<String> {
        let value = self.state.canonical().filter(|c| c.len() == 16)?;
        let blocks: Vec<&str> = (0..4).map(|i| &value[i * 4..i * 4 + 4]).collect();
        Some(blocks.join(separator))
    }
}

impl StandardNumber for Isni {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Isni
    }

    fn normalize(&mut self) -> &mut Self {
        let candidate = self
            .state
            .candidate(&ISNI_REGEX)
            .map(|c| dehyphenate(&c).to_uppercase());
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        if let Some(err) = value
            .get(..15)
            .and_then(|payload| first_foreign(payload, |c| c.is_ascii_digit()))
        {
            return Err(err);
        }
        let settled = settle_check(
            value,
            15,
            self.state.creates_checksum(),
            mod11_2_check_char,
        )?;
        self.state.set_canonical(Some(settled));
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        self.grouped(" ")
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
    fn test_valid_isni() {
        let mut isni = Isni::default();
        isni.set("ISNI 0000 0001 2146 438X").normalize();
        assert_eq!(isni.canonical_value(), Some("000000012146438X"));
        assert!(isni.is_valid());
        assert_eq!(isni.format().as_deref(), Some("0000 0001 2146 438X"));
    }

    #[test]
    fn test_x_only_at_end() {
        let mut isni = Isni::default();
        let err = isni.set("0000 000X 2146 4383").normalize().verify().unwrap_err();
        assert_eq!(err, ValidationError::malformed('X', 7));
    }

    #[test]
    fn test_create_checksum() {
        let mut isni = Isni::default();
        isni.create_checksum(true).set("0000 0001 2146 438").normalize();
        assert!(isni.is_valid());
        assert_eq!(isni.canonical_value(), Some("000000012146438X"));
    }
}
