//! Serial Item and Contribution Identifier
//!
//! `ISSN(chronology)enumeration<contribution>control;version-check`, e.g.
//! `0095-4403(199502/03)21:3<12:WATIIB>2.0.TX;2-J`. Punctuation is part of
//! the identifier and takes part in the check character computation.

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::sici_check_char;
use crate::error::ValidationError;
use crate::number::{
    labelled, number_state_methods, strip_label, NumberKind, NumberState, StandardNumber,
};

lazy_static! {
    static ref SICI_REGEX: Regex =
        Regex::new(r"(?i)(?:SICI:?\s*)?([0-9]{4}-?[0-9]{3}[0-9X]\([^\s]*)").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sici {
    state: NumberState,
}

impl StandardNumber for Sici {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Sici
    }

    /// The check character is never sentence punctuation, so trailing
    /// `.,;:)]}` and quotes are dropped
    fn normalize(&mut self) -> &mut Self {
        let candidate = self.state.candidate(&SICI_REGEX).map(|c| {
            strip_label(&c, "SICI")
                .trim_end_matches(['.', ',', ';', ':', ')', ']', '}', '\'', '"'])
                .to_uppercase()
        });
        self.state.set_canonical(candidate);
        self
    }

    /// The check character follows the last `-`; in create mode a value
    /// ending with `-` gets one appended
    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        let create = self.state.creates_checksum();
        let payload = if create && value.ends_with('-') {
            value
        } else {
            let found = value.chars().last().unwrap_or_default();
            let payload = &value[..value.len() - found.len_utf8()];
            if !payload.ends_with('-') {
                return Err(ValidationError::length(
                    "version and check character after ';'",
                    value.len(),
                ));
            }
            let expected = sici_check_char(payload);
            if !create && expected != found {
                return Err(ValidationError::checksum(expected, found));
            }
            payload
        };
        let settled = format!("{}{}", payload, sici_check_char(payload));
        self.state.set_canonical(Some(settled));
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        self.state.canonical().map(|c| format!("SICI {}", c))
    }

    fn typed_variants(&self) -> Vec<String> {
        labelled(self.kind(), &[self.format()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SICI: &str = "0095-4403(199502/03)21:3<12:WATIIB>2.0.TX;2-J";

    #[test]
    fn test_valid_sici() {
        let mut sici = Sici::default();
        sici.set(&format!("SICI {}", SICI)).normalize();
        assert_eq!(sici.canonical_value(), Some(SICI));
        assert!(sici.is_valid());
        assert_eq!(sici.format(), Some(format!("SICI {}", SICI)));
    }

    #[test]
    fn test_trailing_sentence_punctuation() {
        let mut sici = Sici::default();
        sici.set(&format!("see SICI {}.", SICI)).normalize();
        assert_eq!(sici.canonical_value(), Some(SICI));
        assert!(sici.is_valid());

        sici.set(&format!("(cited as {}),", SICI)).normalize();
        assert_eq!(sici.canonical_value(), Some(SICI));
        assert!(sici.is_valid());
    }

    #[test]
    fn test_second_vector() {
        let mut sici = Sici::default();
        assert!(sici
            .set("0002-8231(199412)45:10<737:TIODIM>2.3.TX;2-M")
            .normalize()
            .is_valid());
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut sici = Sici::default();
        let err = sici
            .set("0095-4403(199502/03)21:3<12:WATIIB>2.0.TX;2-K")
            .normalize()
            .verify()
            .unwrap_err();
        assert_eq!(err, ValidationError::checksum('J', 'K'));
    }

    #[test]
    fn test_create_checksum() {
        let mut sici = Sici::default();
        sici.create_checksum(true)
            .set("0095-4403(199502/03)21:3<12:WATIIB>2.0.TX;2-")
            .normalize();
        sici.verify().unwrap();
        assert_eq!(sici.canonical_value(), Some(SICI));
    }

    #[test]
    fn test_missing_check_character() {
        let mut sici = Sici::default();
        let err = sici
            .set("0095-4403(199502/03)21:3<12:WATIIB>2.0.TX;2-")
            .normalize()
            .verify()
            .unwrap_err();
        assert!(matches!(err, ValidationError::LengthMismatch { .. }));
    }
}
