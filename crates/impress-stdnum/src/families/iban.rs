//! International Bank Account Number
//!
//! Checked with ISO 7064 MOD 97-10 after moving the country code and check
//! digits to the end. Each country fixes the total length.

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::{first_foreign, mod97_10_check_digits, mod97_10_verify};
use crate::error::ValidationError;
use crate::number::{dehyphenate, labelled, strip_label, NumberKind, NumberState, StandardNumber};

lazy_static! {
    static ref IBAN_REGEX: Regex = Regex::new(
        r"\b(?:(?i:IBAN):?\s*)?([A-Za-z]{2}[0-9]{2}(?:[ \-]?[A-Za-z0-9]){11,32})\b"
    )
    .unwrap();
}

/// Registered IBAN lengths by ISO 3166 country code
const COUNTRY_LENGTHS: &[(&str, usize)] = &[
    ("AD", 24), ("AE", 23), ("AL", 28), ("AT", 20), ("AZ", 28), ("BA", 20),
    ("BE", 16), ("BG", 22), ("BH", 22), ("BI", 27), ("BR", 29), ("BY", 28),
    ("CH", 21), ("CR", 22), ("CY", 28), ("CZ", 24), ("DE", 22), ("DJ", 27),
    ("DK", 18), ("DO", 28), ("EE", 20), ("EG", 29), ("ES", 24), ("FI", 18),
    ("FK", 18), ("FO", 18), ("FR", 27), ("GB", 22), ("GE", 22), ("GI", 23),
    ("GL", 18), ("GR", 27), ("GT", 28), ("HR", 21), ("HU", 28), ("IE", 22),
    ("IL", 23), ("IQ", 23), ("IS", 26), ("IT", 27), ("JO", 30), ("KW", 30),
    ("KZ", 20), ("LB", 28), ("LC", 32), ("LI", 21), ("LT", 20), ("LU", 20),
    ("LV", 21), ("LY", 25), ("MC", 27), ("MD", 24), ("ME", 22), ("MK", 19),
    ("MN", 20), ("MR", 27), ("MT", 31), ("MU", 30), ("NI", 28), ("NL", 18),
    ("NO", 15), ("OM", 23), ("PK", 24), ("PL", 28), ("PS", 29), ("PT", 25),
    ("QA", 29), ("RO", 24), ("RS", 22), ("RU", 33), ("SA", 24), ("SC", 31),
    ("SD", 18), ("SE", 24), ("SI", 19), ("SK", 24), ("SM", 27), ("SO", 23),
    ("ST", 25), ("SV", 28), ("TL", 23), ("TN", 24), ("TR", 26), ("UA", 29),
    ("VA", 22), ("VG", 24), ("XK", 20), ("YE", 30),
];

/// Registered IBAN length for a country code
pub fn iban_length(country_code: &str) -> Option<usize> {
    COUNTRY_LENGTHS
        .iter()
        .find(|(code, _)| *code == country_code)
        .map(|(_, len)| *len)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Iban {
    state: NumberState,
    country_code: Option<String>,
}

impl Iban {
    /// Country code of the normalized value
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }
}

/// Symbols of a grouped candidate up to the separator that ends the
/// country's length, or `None` when no group ends there
fn fit_country_length(grouped: &str, expected: usize) -> Option<String> {
    let mut symbols = String::with_capacity(expected);
    for c in grouped.chars() {
        if c == '-' || c.is_whitespace() {
            if symbols.len() == expected {
                return Some(symbols);
            }
        } else {
            symbols.push(c.to_ascii_uppercase());
        }
    }
    None
}

/// BBAN followed by country code and check digits
fn rearrange(value: &str) -> String {
    format!("{}{}", &value[4..], &value[..4])
}

impl StandardNumber for Iban {
    fn set(&mut self, value: &str) -> &mut Self {
        self.state.set(value);
        self.country_code = None;
        self
    }

    fn create_checksum(&mut self, create: bool) -> &mut Self {
        self.state.set_create(create);
        self
    }

    fn canonical_value(&self) -> Option<&str> {
        self.state.canonical()
    }

    fn reset(&mut self) -> &mut Self {
        self.state.reset();
        self.country_code = None;
        self
    }

    fn kind(&self) -> NumberKind {
        NumberKind::Iban
    }

    /// Unregistered country codes leave no canonical value. Groups running
    /// past the country's length (a following BIC or currency) are dropped.
    fn normalize(&mut self) -> &mut Self {
        let candidate = self.state.candidate(&IBAN_REGEX).and_then(|raw| {
            let grouped = strip_label(&raw, "IBAN");
            let value = dehyphenate(grouped).to_uppercase();
            let expected = iban_length(value.get(..2)?)?;
            Some(fit_country_length(grouped, expected).unwrap_or(value))
        });
        self.country_code = candidate.as_ref().map(|c| c[..2].to_string());
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        let country = &value[..2];
        let expected = iban_length(country).ok_or(ValidationError::NoCandidateFound)?;
        if value.len() != expected {
            return Err(ValidationError::length(expected.to_string(), value.len()));
        }
        if let Some(err) = first_foreign(value, |c| c.is_ascii_alphanumeric()) {
            return Err(err);
        }

        if self.state.creates_checksum() {
            let zeroed = format!("{}{}00", &value[4..], country);
            let check = mod97_10_check_digits(&zeroed)?;
            let created = format!("{}{:02}{}", country, check, &value[4..]);
            self.state.set_canonical(Some(created));
            return Ok(self);
        }

        if !mod97_10_verify(&rearrange(value)) {
            let zeroed = format!("{}{}00", &value[4..], country);
            let check = mod97_10_check_digits(&zeroed)?;
            return Err(ValidationError::checksum(format!("{:02}", check), &value[2..4]));
        }
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        self.state.canonical().map(str::to_string)
    }

    fn typed_variants(&self) -> Vec<String> {
        labelled(self.kind(), &[self.format()])
    }
}
