//! Text length helpers.
//!
//! Lengths are counted in Unicode scalar values, so "café" is 4 characters
//! and an emoji counts once.

use std::ops::RangeInclusive;

/// Number of characters in `value`
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Outcome of checking a string against a length range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthCheck {
    Ok,
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
}

/// Check that `value` has between `bounds.start()` and `bounds.end()` characters
///
/// # Examples
///
/// ```
/// use hackathon_judging_common::validation::{check_length, LengthCheck};
///
/// assert_eq!(check_length("great work", 10..=2000), LengthCheck::Ok);
/// assert_eq!(
///     check_length("short", 10..=2000),
///     LengthCheck::TooShort { min: 10, actual: 5 }
/// );
/// ```
pub fn check_length(value: &str, bounds: RangeInclusive<usize>) -> LengthCheck {
    let actual = char_len(value);
    if actual < *bounds.start() {
        LengthCheck::TooShort {
            min: *bounds.start(),
            actual,
        }
    } else if actual > *bounds.end() {
        LengthCheck::TooLong {
            max: *bounds.end(),
            actual,
        }
    } else {
        LengthCheck::Ok
    }
}
