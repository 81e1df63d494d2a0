//! International Standard Musical Work Code (`T-034.524.680-1`)

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::{digit_char, iswc_check_digit};
use crate::error::ValidationError;
use crate::number::{
    labelled, number_state_methods, settle_check, strip_label, NumberKind, NumberState,
    StandardNumber,
};

lazy_static! {
    static ref ISWC_REGEX: Regex = Regex::new(
        r"(?i)\b(?:ISWC:?\s*)?(T[\- ]?[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}(?:[\- ]?[0-9])?)\b"
    )
    .unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Iswc {
    state: NumberState,
}

impl StandardNumber for Iswc {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Iswc
    }

    fn normalize(&mut self) -> &mut Self {
        let candidate = self.state.candidate(&ISWC_REGEX).map(|c| {
            strip_label(&c, "ISWC")
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_uppercase()
        });
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        let digits = value
            .strip_prefix('T')
            .ok_or_else(|| ValidationError::malformed(value.chars().next().unwrap_or(' '), 0))?;
        let settled = settle_check(digits, 9, self.state.creates_checksum(), |payload| {
            iswc_check_digit(payload).map(digit_char)
        })
        .map_err(|err| match err {
            // positions are reported against the full value including `T`
            ValidationError::MalformedCharacter {
                character,
                position,
            } => ValidationError::malformed(character, position + 1),
            ValidationError::LengthMismatch { expected, found } => {
                ValidationError::LengthMismatch {
                    expected,
                    found: found + 1,
                }
            }
            other => other,
        })?;
        self.state.set_canonical(Some(format!("T{}", settled)));
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        let value = self.state.canonical().filter(|c| c.len() == 11)?;
        Some(format!(
            "ISWC T-{}.{}.{}-{}",
            &value[1..4],
            &value[4..7],
            &value[7..10],
            &value[10..]
        ))
    }

    fn typed_variants(&self) -> Vec<String> {
        labelled(
            self.kind(),
            &[self.state.canonical().map(str::to_string), self.format()],
        )
    }
}
