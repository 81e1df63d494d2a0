//! Global Trade Item Number
//!
//! GTIN-8, GTIN-12, GTIN-13 and GTIN-14 share one check digit scheme with
//! weights counted from the right. In create mode a complete value has its
//! check digit overwritten; 7 or 11 digits get one appended.

use crate::checksum::{digit_char, gtin_check_digit};
use crate::error::ValidationError;
use crate::number::{
    dehyphenate, labelled, number_state_methods, settle_check, NumberKind, NumberState,
    StandardNumber,
};

use super::ean::DIGIT_RUN;

const LENGTHS: [usize; 4] = [8, 12, 13, 14];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gtin {
    state: NumberState,
}

impl StandardNumber for Gtin {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Gtin
    }

    fn normalize(&mut self) -> &mut Self {
        let candidate = self.state.candidate(&DIGIT_RUN).map(|c| dehyphenate(&c));
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        let create = self.state.creates_checksum();
        let len = value.len();
        let payload_len = if LENGTHS.contains(&len) {
            len - 1
        } else if create && (len == 7 || len == 11) {
            len
        } else {
            return Err(ValidationError::length("8, 12, 13 or 14", len));
        };
        let settled = settle_check(value, payload_len, create, |payload| {
            gtin_check_digit(payload).map(digit_char)
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
