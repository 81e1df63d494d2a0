//! Checksum primitives
//!
//! Stateless functions implementing the check character algorithms used by
//! the standard number families. They know nothing about the families
//! themselves and are safe to call from any thread.

pub mod iso7064;
pub mod weighted;

pub use iso7064::*;
pub use weighted::*;

use crate::error::ValidationError;

/// Symbols `0-9A-Z` in value order
pub(crate) const ALPHABET_36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Value of a decimal digit, or `MalformedCharacter` at `position`
pub(crate) fn decimal_value(c: char, position: usize) -> Result<u32, ValidationError> {
    c.to_digit(10)
        .ok_or_else(|| ValidationError::malformed(c, position))
}

/// Value of a base-36 symbol (case-insensitive)
pub(crate) fn symbol_value(c: char, position: usize) -> Result<u32, ValidationError> {
    c.to_digit(36)
        .ok_or_else(|| ValidationError::malformed(c, position))
}

/// Position and character of the first symbol rejected by `accept`
pub(crate) fn first_foreign(value: &str, accept: impl Fn(char) -> bool) -> Option<ValidationError> {
    value
        .chars()
        .enumerate()
        .find(|(_, c)| !accept(*c))
        .map(|(i, c)| ValidationError::malformed(c, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_values() {
        assert_eq!(decimal_value('7', 0).unwrap(), 7);
        assert_eq!(symbol_value('a', 0).unwrap(), 10);
        assert_eq!(symbol_value('Z', 0).unwrap(), 35);
        assert!(symbol_value('#', 4).is_err());
    }

    #[test]
    fn test_first_foreign() {
        assert_eq!(first_foreign("12345", |c| c.is_ascii_digit()), None);
        assert_eq!(
            first_foreign("12X45", |c| c.is_ascii_digit()),
            Some(ValidationError::malformed('X', 2))
        );
    }
}
