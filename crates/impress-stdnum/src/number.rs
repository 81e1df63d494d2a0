//! The standard number lifecycle shared by every family
//!
//! A number is built empty, given raw text with [`StandardNumber::set`],
//! normalized (candidate extraction plus cleanup) and then verified.
//! `normalize` never fails: a missing canonical value is how "this text is
//! not an X" is expressed. `verify` explains why a candidate was rejected.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Standard number families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum NumberKind {
    /// Archival Resource Key
    Ark,
    /// Digital Object Identifier
    Doi,
    /// International Article Number (EAN-13)
    Ean,
    /// Global Trade Item Number (8, 12, 13 or 14 digits)
    Gtin,
    /// International Bank Account Number
    Iban,
    /// International Standard Audiovisual Number
    Isan,
    /// International Standard Book Number
    Isbn,
    /// International Standard Music Number
    Ismn,
    /// International Standard Name Identifier
    Isni,
    /// International Standard Serial Number
    Issn,
    /// International Standard Text Code
    Istc,
    /// International Standard Musical Work Code
    Iswc,
    /// Open Researcher and Contributor ID
    Orcid,
    /// Pica Production Number
    Ppn,
    /// Serial Item and Contribution Identifier
    Sici,
    /// Universal Product Code (UPC-A)
    Upc,
    /// Zeitschriftendatenbank ID
    Zdb,
}

impl NumberKind {
    /// Get all families
    pub fn all() -> &'static [NumberKind] {
        &[
            NumberKind::Ark,
            NumberKind::Doi,
            NumberKind::Ean,
            NumberKind::Gtin,
            NumberKind::Iban,
            NumberKind::Isan,
            NumberKind::Isbn,
            NumberKind::Ismn,
            NumberKind::Isni,
            NumberKind::Issn,
            NumberKind::Istc,
            NumberKind::Iswc,
            NumberKind::Orcid,
            NumberKind::Ppn,
            NumberKind::Sici,
            NumberKind::Upc,
            NumberKind::Zdb,
        ]
    }

    /// Lowercase tag used in configuration and registry lookups
    pub fn tag(self) -> &'static str {
        match self {
            NumberKind::Ark => "ark",
            NumberKind::Doi => "doi",
            NumberKind::Ean => "ean",
            NumberKind::Gtin => "gtin",
            NumberKind::Iban => "iban",
            NumberKind::Isan => "isan",
            NumberKind::Isbn => "isbn",
            NumberKind::Ismn => "ismn",
            NumberKind::Isni => "isni",
            NumberKind::Issn => "issn",
            NumberKind::Istc => "istc",
            NumberKind::Iswc => "iswc",
            NumberKind::Orcid => "orcid",
            NumberKind::Ppn => "ppn",
            NumberKind::Sici => "sici",
            NumberKind::Upc => "upc",
            NumberKind::Zdb => "zdb",
        }
    }

    /// Uppercase label prefixed to typed variants (`"ISBN 0306406152"`)
    pub fn label(self) -> String {
        self.tag().to_uppercase()
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NumberKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        NumberKind::all()
            .iter()
            .copied()
            .find(|kind| kind.tag() == wanted)
            .ok_or_else(|| ValidationError::UnknownFamily(s.to_string()))
    }
}

/// Lifecycle contract every standard number family implements.
///
/// Setters return `&mut Self` so calls chain:
///
/// ```
/// use impress_stdnum::{Issn, StandardNumber};
///
/// let mut issn = Issn::default();
/// assert!(issn.set("ISSN 0317-8471").normalize().is_valid());
/// assert_eq!(issn.format().as_deref(), Some("0317-8471"));
/// ```
pub trait StandardNumber {
    /// Family of this number
    fn kind(&self) -> NumberKind;

    /// Store raw input; never fails, clears any previous result
    fn set(&mut self, value: &str) -> &mut Self;

    /// Compute and overwrite the check symbol instead of verifying it
    fn create_checksum(&mut self, create: bool) -> &mut Self;

    /// Extract the candidate and clean it up
    fn normalize(&mut self) -> &mut Self;

    /// Check the candidate, reporting why it is not valid
    fn verify(&mut self) -> Result<&mut Self, ValidationError>;

    /// Non-failing sibling of [`verify`](StandardNumber::verify)
    fn is_valid(&mut self) -> bool {
        self.verify().is_ok()
    }

    /// Separator-free form used for equality and search
    fn canonical_value(&self) -> Option<&str>;

    /// Human-readable form
    fn format(&self) -> Option<String>;

    /// Family label combined with every available representation
    fn typed_variants(&self) -> Vec<String>;

    /// Forget input and results, keeping mode flags
    fn reset(&mut self) -> &mut Self;
}

/// Raw input, canonical value and checksum mode held by every family
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberState {
    raw: Option<String>,
    canonical: Option<String>,
    create: bool,
}

impl NumberState {
    pub fn set(&mut self, value: &str) {
        self.raw = Some(value.to_string());
        self.canonical = None;
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    pub fn set_canonical(&mut self, canonical: Option<String>) {
        self.canonical = canonical.filter(|c| !c.is_empty());
    }

    pub fn creates_checksum(&self) -> bool {
        self.create
    }

    pub fn set_create(&mut self, create: bool) {
        self.create = create;
    }

    pub fn reset(&mut self) {
        self.raw = None;
        self.canonical = None;
    }

    /// First span of the raw input matched by `grammar`.
    ///
    /// When the grammar has a capture group, the first group is returned.
    pub fn candidate(&self, grammar: &Regex) -> Option<String> {
        let raw = self.raw.as_deref()?;
        let captures = grammar.captures(raw)?;
        captures
            .get(1)
            .or_else(|| captures.get(0))
            .map(|m| m.as_str().to_string())
    }

    /// Canonical value, or `NoCandidateFound` when normalization found none
    pub fn require_canonical(&self) -> Result<&str, ValidationError> {
        self.canonical().ok_or(ValidationError::NoCandidateFound)
    }
}

/// Implements the state plumbing methods of [`StandardNumber`] for a family
/// holding a `state: NumberState` field.
macro_rules! number_state_methods {
    () => {
        fn set(&mut self, value: &str) -> &mut Self {
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

        fn reset(&mut self) -> &mut Self {
            self.state.reset();
            self
        }
    };
}
pub(crate) use number_state_methods;

/// Remove hyphens (any dash punctuation) and whitespace
pub fn dehyphenate(value: &str) -> String {
    value
        .chars()
        .filter(|c| !(*c == '-' || c.is_whitespace() || ('\u{2010}'..='\u{2015}').contains(c)))
        .collect()
}

/// Strip a case-insensitive family prefix such as `ISWC` and a following `:`
pub fn strip_label<'a>(value: &'a str, label: &str) -> &'a str {
    let trimmed = value.trim_start();
    match trimmed.get(..label.len()) {
        Some(head) if head.eq_ignore_ascii_case(label) => trimmed[label.len()..]
            .trim_start_matches(':')
            .trim_start(),
        _ => trimmed,
    }
}

/// Resolve the trailing check symbol of a fixed-length value.
///
/// `payload_len` symbols precede one check symbol. In create mode a value
/// that is exactly `payload_len` long gets its check symbol appended and a
/// complete value gets it overwritten.
pub(crate) fn settle_check<F>(
    value: &str,
    payload_len: usize,
    create: bool,
    compute: F,
) -> Result<String, ValidationError>
where
    F: Fn(&str) -> Result<char, ValidationError>,
{
    let len = value.chars().count();
    let payload: String = if len == payload_len + 1 || (create && len == payload_len) {
        value.chars().take(payload_len).collect()
    } else if create {
        return Err(ValidationError::length(
            format!("{} or {}", payload_len, payload_len + 1),
            len,
        ));
    } else {
        return Err(ValidationError::length((payload_len + 1).to_string(), len));
    };

    let expected = compute(&payload)?;
    if create {
        return Ok(format!("{}{}", payload, expected));
    }
    let found = value.chars().last().unwrap_or_default();
    if found.to_ascii_uppercase() == expected {
        Ok(value.to_string())
    } else {
        Err(ValidationError::checksum(expected, found))
    }
}

/// `"<LABEL> <value>"` for each value, dropping duplicates and keeping order
pub(crate) fn labelled(kind: NumberKind, values: &[Option<String>]) -> Vec<String> {
    let label = kind.label();
    let mut variants: Vec<String> = Vec::new();
    for value in values.iter().flatten() {
        let variant = if value.starts_with(&label) {
            value.clone()
        } else {
            format!("{} {}", label, value)
        };
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in NumberKind::all() {
            assert_eq!(kind.tag().parse::<NumberKind>().unwrap(), *kind);
        }
        assert_eq!("ISBN".parse::<NumberKind>().unwrap(), NumberKind::Isbn);
        assert_eq!(
            "nope".parse::<NumberKind>(),
            Err(ValidationError::UnknownFamily("nope".to_string()))
        );
    }

    #[test]
    fn test_dehyphenate() {
        assert_eq!(dehyphenate("0-306 40615\u{2013}2"), "0306406152");
    }

    #[test]
    fn test_strip_label() {
        assert_eq!(strip_label("ISWC T-034.524.680-1", "ISWC"), "T-034.524.680-1");
        assert_eq!(strip_label("istc: 0A9", "ISTC"), "0A9");
        assert_eq!(strip_label("T-034", "ISWC"), "T-034");
    }

    #[test]
    fn test_settle_check_modes() {
        fn compute(payload: &str) -> Result<char, ValidationError> {
            Ok(char::from_digit(payload.len() as u32, 10).unwrap())
        }
        assert_eq!(settle_check("1233", 3, false, compute).unwrap(), "1233");
        assert_eq!(
            settle_check("1234", 3, false, compute),
            Err(ValidationError::checksum('3', '4'))
        );
        assert_eq!(settle_check("123", 3, true, compute).unwrap(), "1233");
        assert_eq!(settle_check("1239", 3, true, compute).unwrap(), "1233");
        assert!(matches!(
            settle_check("12", 3, false, compute),
            Err(ValidationError::LengthMismatch { found: 2, .. })
        ));
    }

    #[test]
    fn test_state_candidate_prefers_group() {
        let grammar = Regex::new(r"id:(\d+)").unwrap();
        let mut state = NumberState::default();
        state.set("see id:42 here");
        assert_eq!(state.candidate(&grammar).as_deref(), Some("42"));
        state.set("nothing");
        assert_eq!(state.candidate(&grammar), None);
        assert_eq!(state.require_canonical(), Err(ValidationError::NoCandidateFound));
    }

    #[test]
    fn test_labelled_dedupes() {
        let variants = labelled(
            NumberKind::Ean,
            &[Some("123".into()), Some("123".into()), None, Some("EAN 9".into())],
        );
        assert_eq!(variants, vec!["EAN 123", "EAN 9"]);
    }
}
