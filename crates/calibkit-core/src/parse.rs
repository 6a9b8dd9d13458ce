//! Field parsing
//!
//! Turns raw form text into numbers. Surrounding whitespace is ignored;
//! empty text and non-finite floats are rejected.

use crate::error::{NumericKind, ParseError};
use tracing::debug;

/// Parse a floating-point field.
pub fn parse_f64(field: &'static str, text: &str) -> Result<f64, ParseError> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::new(field, text, NumericKind::Float)),
    }
}

/// Parse an unsigned integer field.
pub fn parse_u32(field: &'static str, text: &str) -> Result<u32, ParseError> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| ParseError::new(field, text, NumericKind::Unsigned))
}

/// Parse a comma/space separated list, keeping strictly positive integers.
///
/// Order and duplicates are preserved. Each read takes the leading integer
/// of what is left and resumes right after its digits, so `"2000.5"` yields
/// 2000 and then stops at `.5`. Reading also stops at a token with no leading
/// integer (`"10, abc, 5"` yields `[10]`) and at a value that overflows `i32`.
pub fn parse_positive_ints(text: &str) -> Vec<u32> {
    let mut values = Vec::new();
    let mut rest = text;
    while let Some((value, tail)) = next_int(rest) {
        if let Ok(value) = u32::try_from(value) {
            if value > 0 {
                values.push(value);
            }
        }
        rest = tail;
    }

    let unread = rest.trim_matches(is_list_separator);
    if !unread.is_empty() {
        debug!(unread, "stopped reading integer list");
    }
    values
}

fn is_list_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

/// Read one signed integer after any separators, returning it with the
/// unread remainder.
fn next_int(text: &str) -> Option<(i32, &str)> {
    let text = text.trim_start_matches(is_list_separator);
    let sign = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let (number, tail) = text.split_at(sign + digits);
    number.parse::<i32>().ok().map(|value| (value, tail))
}
