//! Weighted-sum check digit schemes (mod 10, mod 11, mod 16, mod 37)
//!
//! All functions are pure. `*_check_*` functions take the payload without
//! its check symbol and return the symbol to append; `*_verify` functions
//! take the complete value and never fail.

use super::{decimal_value, symbol_value, ALPHABET_36};
use crate::error::ValidationError;

/// Alphabet used by SICI check characters; `#` stands for 36
pub const SICI_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ#";

/// Mod 10 check digit with weights alternating from the left.
///
/// `first_weight` is 1 for EAN-13/ISBN-13/ISMN and 3 for UPC-A.
pub fn mod10_check_digit(payload: &str, first_weight: u32) -> Result<u32, ValidationError> {
    let second_weight = 4 - first_weight;
    let mut sum = 0;
    for (i, c) in payload.chars().enumerate() {
        let weight = if i % 2 == 0 { first_weight } else { second_weight };
        sum += decimal_value(c, i)? * weight;
    }
    Ok((10 - sum % 10) % 10)
}

/// Verify a value whose last digit is a [`mod10_check_digit`]
pub fn mod10_verify(value: &str, first_weight: u32) -> bool {
    verify_trailing(value, |payload| {
        mod10_check_digit(payload, first_weight).map(digit_char)
    })
}

/// GS1 check digit: weights 3,1,3,… counted from the rightmost payload digit.
///
/// Works for GTIN-8, GTIN-12, GTIN-13 and GTIN-14 alike.
pub fn gtin_check_digit(payload: &str) -> Result<u32, ValidationError> {
    let len = payload.chars().count();
    let mut sum = 0;
    for (i, c) in payload.chars().enumerate() {
        let weight = if (len - i) % 2 == 1 { 3 } else { 1 };
        sum += decimal_value(c, i)? * weight;
    }
    Ok((10 - sum % 10) % 10)
}

/// Verify a value whose last digit is a [`gtin_check_digit`]
pub fn gtin_verify(value: &str) -> bool {
    verify_trailing(value, |payload| gtin_check_digit(payload).map(digit_char))
}

/// ISBN-10 check character: weights 10..2 over nine digits, `X` for ten
pub fn isbn10_check_char(payload: &str) -> Result<char, ValidationError> {
    let mut sum = 0;
    for (i, c) in payload.chars().enumerate() {
        sum += decimal_value(c, i)? * 10u32.saturating_sub(i as u32);
    }
    Ok(mod11_symbol((11 - sum % 11) % 11))
}

/// Verify an ISBN-10; `X` is accepted only in the last position
pub fn isbn10_verify(value: &str) -> bool {
    verify_trailing(value, isbn10_check_char)
}

/// ISSN check character: weights 8..2 over seven digits.
///
/// Remainder 0 gives `0`, remainder 1 gives `X`, otherwise `11 - r`.
pub fn issn_check_char(payload: &str) -> Result<char, ValidationError> {
    let mut sum = 0;
    for (i, c) in payload.chars().enumerate() {
        sum += decimal_value(c, i)? * 8u32.saturating_sub(i as u32);
    }
    let remainder = sum % 11;
    Ok(match remainder {
        0 => '0',
        1 => 'X',
        r => digit_char(11 - r),
    })
}

/// Sum of digits weighted 2,3,4,… starting from the rightmost digit
fn ascending_weighted_sum(payload: &str) -> Result<u32, ValidationError> {
    let digits = payload
        .chars()
        .enumerate()
        .map(|(i, c)| decimal_value(c, i))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| d * (i as u32 + 2))
        .sum())
}

/// PPN check character: `11 - (sum mod 11)`, with 10 as `X` and 11 as `0`
pub fn ppn_check_char(payload: &str) -> Result<char, ValidationError> {
    let sum = ascending_weighted_sum(payload)?;
    Ok(mod11_symbol((11 - sum % 11) % 11))
}

/// ZDB check character: the remainder itself, with 10 as `X`
pub fn zdb_check_char(payload: &str) -> Result<char, ValidationError> {
    let sum = ascending_weighted_sum(payload)?;
    Ok(mod11_symbol(sum % 11))
}

/// ISWC check digit over the nine digits following the `T`
pub fn iswc_check_digit(payload: &str) -> Result<u32, ValidationError> {
    let mut sum = 1;
    for (i, c) in payload.chars().enumerate() {
        sum += decimal_value(c, i)? * (i as u32 + 1);
    }
    Ok((10 - sum % 10) % 10)
}

/// ISTC check character over fifteen base-36 symbols, weights 11,9,3,1
pub fn istc_check_char(payload: &str) -> Result<char, ValidationError> {
    const WEIGHTS: [u32; 4] = [11, 9, 3, 1];
    let mut sum = 0;
    for (i, c) in payload.chars().enumerate() {
        sum += symbol_value(c, i)? * WEIGHTS[i % 4];
    }
    Ok(ALPHABET_36[(sum % 16) as usize] as char)
}

/// SICI check character.
///
/// Characters outside `0-9A-Z` (punctuation) count as 36. Weights alternate
/// 3,1 starting from the rightmost payload character.
pub fn sici_check_char(payload: &str) -> char {
    let alphabet = SICI_ALPHABET.as_bytes();
    let sum: u32 = payload
        .chars()
        .rev()
        .enumerate()
        .map(|(i, c)| {
            let value = SICI_ALPHABET
                .find(c.to_ascii_uppercase())
                .map(|v| v as u32)
                .unwrap_or(36);
            value * if i % 2 == 0 { 3 } else { 1 }
        })
        .sum();
    alphabet[((37 - sum % 37) % 37) as usize] as char
}

/// Verify a complete SICI (last character is the check character)
pub fn sici_verify(value: &str) -> bool {
    verify_trailing(value, |payload| Ok(sici_check_char(payload)))
}

/// Decimal digit as a character
pub fn digit_char(digit: u32) -> char {
    char::from_digit(digit, 10).unwrap_or('0')
}

fn mod11_symbol(value: u32) -> char {
    if value == 10 {
        'X'
    } else {
        digit_char(value)
    }
}

/// Split off the last character and compare it against `compute(payload)`
pub(crate) fn verify_trailing<F>(value: &str, compute: F) -> bool
where
    F: Fn(&str) -> Result<char, ValidationError>,
{
    let Some(last) = value.chars().last() else {
        return false;
    };
    let payload = &value[..value.len() - last.len_utf8()];
    match compute(payload) {
        Ok(expected) => expected == last.to_ascii_uppercase(),
        Err(_) => false,
    }
}
