//! Zeitschriftendatenbank ID (`2025443-X`)
//!
//! Same weighting as the PPN, but the check character is the remainder
//! itself.

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::zdb_check_char;
use crate::error::ValidationError;
use crate::number::{
    dehyphenate, labelled, number_state_methods, NumberKind, NumberState, StandardNumber,
};

use super::ppn::settle_variable;

lazy_static! {
    static ref ZDB_REGEX: Regex = Regex::new(r"\b[0-9]{2,10}[\- ]?[0-9xX]\b").unwrap();
    static ref ZDB_PAYLOAD_REGEX: Regex = Regex::new(r"\b[0-9]{2,10}\b").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Zdb {
    state: NumberState,
}

impl StandardNumber for Zdb {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Zdb
    }

    fn normalize(&mut self) -> &mut Self {
        let grammar: &Regex = if self.state.creates_checksum() {
            &ZDB_PAYLOAD_REGEX
        } else {
            &ZDB_REGEX
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
        let settled = settle_variable(value, self.state.creates_checksum(), zdb_check_char)?;
        self.state.set_canonical(Some(settled));
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        let value = self.state.canonical().filter(|c| c.len() > 1)?;
        let (payload, check) = value.split_at(value.len() - 1);
        Some(format!("{}-{}", payload, check))
    }

    fn typed_variants(&self) -> Vec<String> {
        labelled(
            self.kind(),
            &[self.state.canonical().map(str::to_string), self.format()],
        )
    }
}
