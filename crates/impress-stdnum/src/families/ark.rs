//! Archival Resource Key (`ark:/13030/tf5p30086k`)
//!
//! ARKs have no check character in their general form. Normalization
//! lowercases the scheme, restores the `ark:/` slash and drops hyphens,
//! which carry no identity in an ARK.

use lazy_static::lazy_static;
use regex::Regex;

use crate::checksum::first_foreign;
use crate::error::ValidationError;
use crate::number::{labelled, number_state_methods, NumberKind, NumberState, StandardNumber};

lazy_static! {
    static ref ARK_REGEX: Regex =
        Regex::new(r#"(?i)\bark:/?([0-9bcdfghjkmnpqrstvwxz]{5,})/([^\s"<>]+)"#).unwrap();
}

pub const ARK_RESOLVER: &str = "http://n2t.net/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ark {
    state: NumberState,
}

fn is_ark_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "=~*+@_$./%:".contains(c)
}

impl Ark {
    /// Name Assigning Authority Number
    pub fn naan(&self) -> Option<&str> {
        self.parts().map(|(naan, _)| naan)
    }

    /// Name (with qualifiers) assigned by the NAAN
    pub fn name(&self) -> Option<&str> {
        self.parts().map(|(_, name)| name)
    }

    fn parts(&self) -> Option<(&str, &str)> {
        self.state.canonical()?.strip_prefix("ark:/")?.split_once('/')
    }
}

impl StandardNumber for Ark {
    number_state_methods!();

    fn kind(&self) -> NumberKind {
        NumberKind::Ark
    }

    fn normalize(&mut self) -> &mut Self {
        let candidate = self.state.raw().and_then(|raw| {
            let captures = ARK_REGEX.captures(raw)?;
            let naan = captures.get(1)?.as_str().to_lowercase();
            let name: String = captures
                .get(2)?
                .as_str()
                .trim_end_matches(['.', ',', ';', ')', ']', '/'])
                .chars()
                .filter(|c| *c != '-')
                .collect();
            Some(format!("ark:/{}/{}", naan, name))
        });
        self.state.set_canonical(candidate);
        self
    }

    fn verify(&mut self) -> Result<&mut Self, ValidationError> {
        let value = self.state.require_canonical()?;
        let name = self.name().unwrap_or_default();
        if name.is_empty() {
            return Err(ValidationError::NoCandidateFound);
        }
        let offset = value.len() - name.len();
        if let Some(ValidationError::MalformedCharacter {
            character,
            position,
        }) = first_foreign(name, is_ark_char)
        {
            return Err(ValidationError::malformed(character, position + offset));
        }
        Ok(self)
    }

    fn format(&self) -> Option<String> {
        self.state.canonical().map(str::to_string)
    }

    fn typed_variants(&self) -> Vec<String> {
        let mut variants = labelled(self.kind(), &[self.format()]);
        variants.extend(
            self.state
                .canonical()
                .map(|c| format!("{}{}", ARK_RESOLVER, c)),
        );
        variants
    }
}
