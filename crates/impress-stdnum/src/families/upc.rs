//! Universal Product Code (UPC-A)

use crate::checksum::{digit_char, mod10_check_digit};
use crate::error::ValidationError;
use crate::number::{
    dehyphenate, labelled, number_state_methods, settle_check, NumberKind, NumberState,
    StandardNumber,
};

use super::ean::DIGIT_RUN;

/// UPC-A: twelve digits, weights 3,1,3,… from the left
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upc {
    state: NumberState,
}

impl StandardNumber for Upc {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Upc
    }

    fn normalize(&mut self) -> &mut Self {
        let candidate = self.state.candidate(&DIGIT_RUN).map(|c| dehyphenate(&c));
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        let settled = settle_check(value, 11, self.state.creates_checksum(), |payload| {
            mod10_check_digit(payload, 3).map(digit_char)
        })?;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_upc() {
        let mut upc = Upc::default();
        assert!(upc.set("UPC 036000291452").normalize().is_valid());
        assert_eq!(upc.typed_variants(), vec!["UPC 036000291452"]);
    }

    #[test]
    fn test_invalid_upc() {
        let mut upc = Upc::default();
        assert!(!upc.set("036000291453").normalize().is_valid());
        // an EAN-13 is not a UPC-A
        assert!(!upc.set("4006381333931").normalize().is_valid());
    }

    #[test]
    fn test_create_upc() {
        let mut upc = Upc::default();
        upc.create_checksum(true).set("03600029145").normalize();
        upc.verify().unwrap();
        assert_eq!(upc.canonical_value(), Some("036000291452"));
    }
}
