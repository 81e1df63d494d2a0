//! International Standard Audiovisual Number
//!
//! Canonical layout (separators removed):
//!
//! ```text
//! root(12 hex) episode(4 hex) check1 [version(8 hex) check2]
//! ```
//!
//! `check1` covers root and episode, `check2` covers root, episode and
//! version. Both are ISO 7064 MOD 37-36 characters.

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::{first_foreign, mod37_36_check_char, mod37_36_verify};
use crate::error::ValidationError;
use crate::number::{dehyphenate, labelled, strip_label, NumberKind, NumberState, StandardNumber};

lazy_static! {
    static ref ISAN_REGEX: Regex =
        Regex::new(r"\b(?:(?i:ISAN):?\s*)?([0-9A-Fa-f]{4}(?:[\- ]?[0-9A-Za-z]){12,22})\b")
            .unwrap();
}

const ROOT_LEN: usize = 16;
const VERSION_LEN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Isan {
    state: NumberState,
    versioned: bool,
}

impl Isan {
    /// Whether the number carries a version segment
    pub fn is_versioned(&self) -> bool {
        self.versioned
    }
}

fn require_hex(segment: &str, offset: usize) -> Result<(), ValidationError> {
    match first_foreign(segment, |c| c.is_ascii_hexdigit()) {
        Some(ValidationError::MalformedCharacter {
            character,
            position,
        }) => Err(ValidationError::malformed(character, position + offset)),
        _ => Ok(()),
    }
}

/// Check one `payload + check` segment, or compute its check in create mode
fn settle(payload: &str, found: Option<char>, create: bool) -> Result<char, ValidationError> {
    let expected = mod37_36_check_char(payload)?;
    match found {
        Some(found) if !create => {
            let mut full = payload.to_string();
            full.push(found);
            if mod37_36_verify(&full) {
                Ok(found)
            } else {
                Err(ValidationError::checksum(expected, found))
            }
        }
        _ => Ok(expected),
    }
}

impl StandardNumber for Isan {
    fn set(&mut self, value: &str) -> &mut Self {
        self.state.set(value);
        self.versioned = false;
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
        self.versioned = false;
        self
    }

    fn kind(&self) -> NumberKind {
        NumberKind::Isan
    }

    fn normalize(&mut self) -> &mut Self {
        let candidate = self
            .state
            .candidate(&ISAN_REGEX)
            .map(|c| dehyphenate(strip_label(&c, "ISAN")).to_uppercase());
        self.versioned = candidate
            .as_ref()
            .is_some_and(|c| c.len() > ROOT_LEN + 1);
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?.to_string();
        let create = self.state.creates_checksum();
        let chars: Vec<char> = value.chars().collect();

        // (has check1, has version, has check2)
        let layout = match chars.len() {
            16 if create => (false, false, false),
            17 => (true, false, false),
            24 if create => (false, true, false),
            26 => (true, true, true),
            len => {
                let expected = if create { "16, 17, 24 or 26" } else { "17 or 26" };
                return Err(ValidationError::length(expected, len));
            }
        };

        let root: String = chars[..ROOT_LEN].iter().collect();
        require_hex(&root, 0)?;
        let check1 = settle(&root, layout.0.then(|| chars[ROOT_LEN]), create)?;
        let mut settled = format!("{}{}", root, check1);

        if layout.1 {
            let start = if layout.0 { ROOT_LEN + 1 } else { ROOT_LEN };
            let version: String = chars[start..start + VERSION_LEN].iter().collect();
            require_hex(&version, start)?;
            let found = layout.2.then(|| chars[start + VERSION_LEN]);
            let check2 = settle(&format!("{}{}", root, version), found, create)?;
            settled.push_str(&version);
            settled.push(check2);
        }

        self.versioned = layout.1;
        self.state.set_canonical(Some(settled));
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        let value = self.state.canonical()?;
        let blocks = |s: &str| -> String {
            s.as_bytes()
                .chunks(4)
                .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                .collect::<Vec<_>>()
                .join("-")
        };
        match value.len() {
            17 => Some(format!(
                "ISAN {}-{}",
                blocks(&value[..ROOT_LEN]),
                &value[ROOT_LEN..]
            )),
            26 => Some(format!(
                "ISAN {}-{}-{}-{}",
                blocks(&value[..ROOT_LEN]),
                &value[ROOT_LEN..ROOT_LEN + 1],
                blocks(&value[ROOT_LEN + 1..ROOT_LEN + 1 + VERSION_LEN]),
                &value[25..]
            )),
            _ => None,
        }
    }

    fn typed_variants(&self) -> Vec<String> {
        labelled(
            self.kind(),
            &[self.state.canonical().map(str::to_string), self.format()],
        )
    }
}
