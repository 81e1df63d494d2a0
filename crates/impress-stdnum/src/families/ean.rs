//! International Article Number (EAN-13)

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::{digit_char, mod10_check_digit};
use crate::error::ValidationError;
use crate::number::{
    dehyphenate, labelled, number_state_methods, settle_check, NumberKind, NumberState,
    StandardNumber,
};

lazy_static! {
    // 7 to 18 digits with optional single hyphens or spaces between them
    pub(crate) static ref DIGIT_RUN: Regex = Regex::new(r"\b[0-9](?:[\- ]?[0-9]){6,17}\b").unwrap();
}

/// EAN-13, weights 1,3,1,… from the left
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ean {
    state: NumberState,
}

impl StandardNumber for Ean {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Ean
    }

    fn normalize(&mut self) -> &mut Self {
        let candidate = self.state.candidate(&DIGIT_RUN).map(|c| dehyphenate(&c));
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        let settled = settle_check(value, 12, self.state.creates_checksum(), |payload| {
            mod10_check_digit(payload, 1).map(digit_char)
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
