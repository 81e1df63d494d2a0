//! International Standard Book Number
//!
//! ISBN-10 and ISBN-13 (the EAN form) are two spellings of one book
//! number. Verification computes both, so a valid `Isbn` always knows its
//! 13-digit form and, for `978` numbers, its 10-digit form. Which one
//! becomes canonical is chosen by [`Isbn::prefer_ean`].

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::{digit_char, gtin_check_digit, isbn10_check_char};
use crate::error::ValidationError;
use crate::isbn_range::RangeTable;
use crate::number::{dehyphenate, labelled, NumberKind, NumberState, StandardNumber};

lazy_static! {
    static ref ISBN_REGEX: Regex = Regex::new(r"[0-9][0-9xX\-\s]{7,34}[0-9xX]").unwrap();
}

/// The two spellings of a verified ISBN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsbnForms {
    /// Absent for `979` numbers and when the EAN form is preferred
    pub isbn10: Option<String>,
    pub isbn13: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isbn {
    state: NumberState,
    prefer_ean: bool,
    forms: Option<IsbnForms>,
    ranges: Arc<RangeTable>,
}

impl Default for Isbn {
    fn default() -> Self {
        Self::with_ranges(RangeTable::shared_default())
    }
}

impl Isbn {
    /// ISBN hyphenated with a caller-provided range table
    pub fn with_ranges(ranges: Arc<RangeTable>) -> Self {
        Self {
            state: NumberState::default(),
            prefer_ean: false,
            forms: None,
            ranges,
        }
    }

    /// Use the 13-digit form as canonical and formatted value
    pub fn prefer_ean(&mut self, prefer_ean: bool) -> &mut Self {
        self.prefer_ean = prefer_ean;
        self
    }

    pub fn is_ean_preferred(&self) -> bool {
        self.prefer_ean
    }

    /// 10-digit form, available after a successful verify
    pub fn isbn10(&self) -> Option<&str> {
        self.forms.as_ref()?.isbn10.as_deref()
    }

    /// 13-digit form, available after a successful verify
    pub fn isbn13(&self) -> Option<&str> {
        self.forms.as_ref().map(|f| f.isbn13.as_str())
    }

    fn hyphenated13(&self) -> Option<String> {
        self.ranges.hyphenate(self.isbn13()?)
    }

    /// ISBN-10 hyphenation follows the 978 form with its own check digit
    fn hyphenated10(&self) -> Option<String> {
        let isbn10 = self.isbn10()?;
        let hyphenated = self.hyphenated13()?;
        let body = hyphenated.strip_prefix("978-")?;
        let (without_check, _) = body.split_at(body.len() - 1);
        Some(format!("{}{}", without_check, &isbn10[9..]))
    }

    /// Both forms with their hyphenations, canonical form first
    fn all_forms(&self) -> Vec<Option<String>> {
        let ten = [self.isbn10().map(str::to_string), self.hyphenated10()];
        let thirteen = [self.isbn13().map(str::to_string), self.hyphenated13()];
        let (first, second) = if self.canonical_is_ean() {
            (thirteen, ten)
        } else {
            (ten, thirteen)
        };
        first.into_iter().chain(second).collect()
    }

    fn canonical_is_ean(&self) -> bool {
        self.prefer_ean || self.isbn10().is_none()
    }
}

/// Longest prefix of a grouped candidate that ends at a separator and
/// checks as a complete ISBN-10 or ISBN-13
fn leading_isbn(grouped: &str, prefer_ean: bool) -> Option<String> {
    let mut symbols = String::new();
    let mut longest = None;
    for c in grouped.chars() {
        if c == '-' || c.is_whitespace() {
            if matches!(symbols.len(), 10 | 13) && resolve(&symbols, false, prefer_ean).is_ok() {
                longest = Some(symbols.clone());
            }
        } else {
            symbols.push(c.to_ascii_uppercase());
        }
    }
    longest
}

/// Check (or in create mode complete) an ISBN-10 or ISBN-13 and derive its
/// other form.
///
/// Nine and twelve digit payloads are accepted only when `create` is set.
pub fn resolve(value: &str, create: bool, prefer_ean: bool) -> Result<IsbnForms, ValidationError> {
    let len = value.chars().count();
    for (i, c) in value.chars().enumerate() {
        let trailing_x = c.eq_ignore_ascii_case(&'X') && i == 9 && len == 10;
        if !(c.is_ascii_digit() || trailing_x) {
            return Err(ValidationError::malformed(c, i));
        }
    }

    match (len, create) {
        (10, _) | (9, true) => {
            let payload = &value[..9];
            let check = isbn10_check_char(payload)?;
            if len == 10 && !create {
                let found = value[9..].to_ascii_uppercase();
                if found != check.to_string() {
                    return Err(ValidationError::checksum(check, found));
                }
            }
            let ean_payload = format!("978{}", payload);
            let ean_check = digit_char(gtin_check_digit(&ean_payload)?);
            Ok(IsbnForms {
                isbn10: Some(format!("{}{}", payload, check)),
                isbn13: format!("{}{}", ean_payload, ean_check),
            })
        }
        (13, _) | (12, true) => {
            if let Some((i, c)) = value
                .chars()
                .zip(['9', '7', '8'])
                .enumerate()
                .find(|(i, (c, expected))| c != expected && !(*i == 2 && *c == '9'))
                .map(|(i, (c, _))| (i, c))
            {
                return Err(ValidationError::malformed(c, i));
            }
            let payload = &value[..12];
            let check = digit_char(gtin_check_digit(payload)?);
            if len == 13 && !create {
                let found = &value[12..];
                if found != check.to_string() {
                    return Err(ValidationError::checksum(check, found));
                }
            }
            let isbn10 = if payload.starts_with("978") && !prefer_ean {
                let body = &payload[3..];
                Some(format!("{}{}", body, isbn10_check_char(body)?))
            } else {
                None
            };
            Ok(IsbnForms {
                isbn10,
                isbn13: format!("{}{}", payload, check),
            })
        }
        _ => Err(ValidationError::length(
            if create { "9, 10, 12 or 13" } else { "10 or 13" },
            len,
        )),
    }
}

impl StandardNumber for Isbn {
    fn kind(&self) -> NumberKind {
        NumberKind::Isbn
    }

    fn set(&mut self, value: &str) -> &mut Self {
        self.forms = None;
        self.state.set(value);
        self
    }

    fn create_checksum(&mut self, create: bool) -> &mut Self {
        self.state.set_create(create);
        self
    }

    fn canonical_value(&self) -> Option<&str> {
        self.state.canonical()
    }

    /// A span of unexpected length (an ISBN followed by a year, say) is cut
    /// back to the complete ISBN it starts with, if any
    fn normalize(&mut self) -> &mut Self {
        self.forms = None;
        let prefer_ean = self.prefer_ean;
        let candidate = self.state.candidate(&ISBN_REGEX).map(|grouped| {
            let value = dehyphenate(&grouped).to_uppercase();
            if matches!(value.len(), 9 | 10 | 12 | 13) {
                value
            } else {
                leading_isbn(&grouped, prefer_ean).unwrap_or(value)
            }
        });
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        let forms = resolve(value, self.state.creates_checksum(), self.prefer_ean)?;
        let canonical = match (&forms.isbn10, self.prefer_ean) {
            (Some(isbn10), false) => isbn10.clone(),
            _ => forms.isbn13.clone(),
        };
        self.forms = Some(forms);
        self.state.set_canonical(Some(canonical));
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        let hyphenated = if self.canonical_is_ean() {
            self.hyphenated13()
        } else {
            self.hyphenated10()
        };
        hyphenated.or_else(|| self.state.canonical().map(str::to_string))
    }

    fn typed_variants(&self) -> Vec<String> {
        if self.forms.is_none() {
            return labelled(
                self.kind(),
                &[self.state.canonical().map(str::to_string), self.format()],
            );
        }
        labelled(self.kind(), &self.all_forms())
    }

    fn reset(&mut self) -> &mut Self {
        self.forms = None;
        self.state.reset();
        self
    }
}
