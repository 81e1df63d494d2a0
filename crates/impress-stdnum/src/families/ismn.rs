//! International Standard Music Number
//!
//! Both the legacy `M-2306-7118-7` form and the 13-digit
//! `979-0-2306-7118-7` form normalize to the 13-digit EAN-compatible value.

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::{digit_char, mod10_check_digit};
use crate::error::ValidationError;
use crate::number::{
    dehyphenate, labelled, number_state_methods, settle_check, NumberKind, NumberState,
    StandardNumber,
};

lazy_static! {
    static ref ISMN_REGEX: Regex =
        Regex::new(r"(?i)(?:\b979[\- ]?0|\bM)(?:[\- ]?[0-9]){8,9}\b").unwrap();
}

/// Publisher element length by leading digits of the publisher block
const PUBLISHER_RANGES: [(&str, &str, usize); 5] = [
    ("000", "099", 3),
    ("1000", "3999", 4),
    ("40000", "69999", 5),
    ("700000", "899999", 6),
    ("9000000", "9999999", 7),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ismn {
    state: NumberState,
}

/// Replace a leading `M` with `0` and prefix `979`
fn to_ean(value: &str) -> String {
    let value = dehyphenate(value).to_uppercase();
    let value = match value.strip_prefix('M') {
        Some(rest) => format!("0{}", rest),
        None => value,
    };
    if value.starts_with("979") {
        value
    } else {
        format!("979{}", value)
    }
}

fn publisher_length(block: &str) -> Option<usize> {
    PUBLISHER_RANGES.iter().find_map(|(begin, end, len)| {
        let probe = block.get(..begin.len())?;
        (probe >= *begin && probe <= *end).then_some(*len)
    })
}

impl Ismn {
    /// Legacy `M-` form of a verified ISMN
    pub fn legacy_format(&self) -> Option<String> {
        self.format()
            .and_then(|f| f.strip_prefix("979-0-").map(|rest| format!("M-{}", rest)))
    }
}

impl StandardNumber for Ismn {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Ismn
    }

    fn normalize(&mut self) -> &mut Self {
        let candidate = self
            .state
            .candidate(&ISMN_REGEX)
            .map(|c| to_ean(&c))
            .filter(|c| c.starts_with("9790"));
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
        let value = self.state.canonical().filter(|c| c.len() == 13)?;
        let block = &value[4..12];
        let len = publisher_length(block)?;
        Some(format!(
            "979-0-{}-{}-{}",
            &block[..len],
            &block[len..],
            &value[12..]
        ))
    }

    fn typed_variants(&self) -> Vec<String> {
        labelled(
            self.kind(),
            &[
                self.state.canonical().map(str::to_string),
                self.format(),
                self.legacy_format(),
            ],
        )
    }
}
