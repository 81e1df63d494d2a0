//! ISO 7064 pure and hybrid check character systems
//!
//! - MOD 11-2: ISNI, ORCID
//! - MOD 97-10: IBAN
//! - MOD 37-36 (hybrid): ISAN

use super::{decimal_value, symbol_value, ALPHABET_36};
use crate::error::ValidationError;

/// MOD 11-2 check character over a run of decimal digits (`X` for ten)
pub fn mod11_2_check_char(payload: &str) -> Result<char, ValidationError> {
    let mut total = 0;
    for (i, c) in payload.chars().enumerate() {
        total = ((total + decimal_value(c, i)?) * 2) % 11;
    }
    Ok(match (12 - total) % 11 {
        10 => 'X',
        r => char::from_digit(r, 10).unwrap_or('0'),
    })
}

/// Verify a value whose last character is a MOD 11-2 check character
pub fn mod11_2_verify(value: &str) -> bool {
    super::weighted::verify_trailing(value, mod11_2_check_char)
}

/// Remainder of an alphanumeric numeral string modulo 97.
///
/// Letters are expanded to two-digit numbers (A=10 … Z=35) before reduction.
/// The reduction runs digit by digit so arbitrarily long inputs never
/// overflow.
pub fn mod97_10_remainder(numeral: &str) -> Result<u32, ValidationError> {
    let mut remainder = 0u32;
    for (i, c) in numeral.chars().enumerate() {
        let value = symbol_value(c, i)?;
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }
    Ok(remainder)
}

/// Valid iff the remainder equals 1
pub fn mod97_10_verify(numeral: &str) -> bool {
    matches!(mod97_10_remainder(numeral), Ok(1))
}

/// Two check digits for a numeral whose check position holds `00`
pub fn mod97_10_check_digits(numeral_with_zeroes: &str) -> Result<u32, ValidationError> {
    Ok(98 - mod97_10_remainder(numeral_with_zeroes)?)
}

fn mod37_36_state(payload: &str) -> Result<u32, ValidationError> {
    const M: u32 = 36;
    let mut product = M;
    for (i, c) in payload.chars().enumerate() {
        let mut sum = (product + symbol_value(c, i)?) % M;
        if sum == 0 {
            sum = M;
        }
        product = (sum * 2) % (M + 1);
    }
    Ok(product)
}

/// MOD 37-36 check character over `0-9A-Z`
pub fn mod37_36_check_char(payload: &str) -> Result<char, ValidationError> {
    let product = mod37_36_state(payload)?;
    Ok(ALPHABET_36[((37 - product) % 36) as usize] as char)
}

/// Running check of payload plus check character; valid iff it equals 1
pub fn mod37_36_verify(value: &str) -> bool {
    let Some(last) = value.chars().last() else {
        return false;
    };
    let payload = &value[..value.len() - last.len_utf8()];
    match (mod37_36_state(payload), symbol_value(last, payload.len())) {
        (Ok(product), Ok(check)) => (product + check) % 36 == 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod11_2() {
        assert_eq!(mod11_2_check_char("000000021825009").unwrap(), '7');
        assert_eq!(mod11_2_check_char("000000012281955").unwrap(), 'X');
        assert!(mod11_2_verify("0000000218250097"));
        assert!(mod11_2_verify("000000012146438X"));
        assert!(!mod11_2_verify("0000000218250098"));
    }

    #[test]
    fn test_mod97_10() {
        // DE89370400440532013000 rearranged
        assert!(mod97_10_verify("370400440532013000DE89"));
        assert!(!mod97_10_verify("370400440532013001DE89"));
        assert_eq!(mod97_10_check_digits("370400440532013000DE00").unwrap(), 89);
    }

    #[test]
    fn test_mod37_36() {
        assert_eq!(mod37_36_check_char("00000000D07A0090").unwrap(), 'Q');
        assert_eq!(
            mod37_36_check_char("00000000D07A009000000000").unwrap(),
            'X'
        );
        assert!(mod37_36_verify("00000000D07A0090Q"));
        assert!(!mod37_36_verify("00000000D07A0090R"));
    }

    #[test]
    fn test_rejects_foreign_symbols() {
        assert!(mod37_36_check_char("00-0").is_err());
        assert!(mod97_10_remainder("12 34").is_err());
        assert!(!mod11_2_verify(""));
    }
}
