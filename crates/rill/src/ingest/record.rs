//! Record splitting and fixed-point measurement parsing.
//!
//! A record line has the form `<key>;<value>` where the value is a signed
//! decimal with exactly one fractional digit. Values are parsed into integer
//! tenths (`"12.3"` → 123) so aggregation downstream is exact integer
//! arithmetic; the decimal point is a formatting artifact, not a scale
//! marker.
//!
//! Unlike the lenient scanner this design descends from, malformed input is
//! rejected with a typed error instead of being misparsed into the tables.

use crate::error::{Result, RillError};

/// One parsed input record, borrowing the key bytes from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Key bytes, everything before the first `;`.
    pub key: &'a [u8],
    /// Measurement in tenths.
    pub value: i64,
}

/// Splits a line (terminator already stripped) into key and measurement.
///
/// # Errors
///
/// - [`RillError::MissingSeparator`] if the line has no `;`
/// - [`RillError::EmptyKey`] if nothing precedes the `;`
/// - [`RillError::InvalidValue`] if the value text is malformed
pub fn parse_record(line: &[u8]) -> Result<Record<'_>> {
    let separator = line
        .iter()
        .position(|&byte| byte == b';')
        .ok_or_else(|| RillError::MissingSeparator(String::from_utf8_lossy(line).into_owned()))?;
    let (key, rest) = (&line[..separator], &line[separator + 1..]);
    if key.is_empty() {
        return Err(RillError::EmptyKey);
    }
    let value = parse_fixed(rest)?;
    Ok(Record { key, value })
}

/// Parses a signed one-decimal fixed-point number into integer tenths.
///
/// Accepts exactly `-?<digits>.<digit>`: an optional leading minus, one or
/// more integer digits, a decimal point, and a single fractional digit with
/// nothing after it. This matches the fixed-one-decimal input format; it is
/// not a general decimal parser.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(parse_fixed(b"12.3")?, 123);
/// assert_eq!(parse_fixed(b"-5.0")?, -50);
/// ```
pub fn parse_fixed(text: &[u8]) -> Result<i64> {
    let invalid = || RillError::InvalidValue(String::from_utf8_lossy(text).into_owned());

    let (negative, digits) = match text.first() {
        Some(b'-') => (true, &text[1..]),
        _ => (false, text),
    };

    // The dot must leave at least one digit before it and exactly one after.
    let dot = digits
        .iter()
        .position(|&byte| byte == b'.')
        .ok_or_else(invalid)?;
    if dot == 0 || dot + 2 != digits.len() {
        return Err(invalid());
    }

    let mut value: i64 = 0;
    for &byte in digits[..dot].iter().chain(std::iter::once(&digits[dot + 1])) {
        if !byte.is_ascii_digit() {
            return Err(invalid());
        }
        value = value
            .checked_mul(10)
            .and_then(|scaled| scaled.checked_add(i64::from(byte - b'0')))
            .ok_or_else(invalid)?;
    }

    Ok(if negative { -value } else { value })
}
