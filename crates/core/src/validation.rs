#![allow(missing_docs)]

//! Keystroke-level input cleaning and field validation rules.
//!
//! Every function here is pure: it takes the raw text a user produced and
//! returns either the value the field should hold or the error to show
//! beneath it. Form containers in [`crate::forms`] decide what to store.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Digits in a mobile number.
pub const PHONE_LEN: usize = 10;
/// Digits in a one-time password.
pub const OTP_LEN: usize = 6;
/// Digits in a postal PIN code.
pub const PIN_LEN: usize = 6;
/// Upper bound on units offered in one bid.
pub const MAX_BID_UNITS: f64 = 500.0;
/// Lowest accepted bid rate and solar capacity.
pub const RANGE_MIN: f64 = 3.0;
/// Highest accepted bid rate and solar capacity.
pub const RANGE_MAX: f64 = 5.9;

static CAPACITY_INPUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d*\.?\d{0,2}$").expect("invalid capacity regex"));

/// Inline error for the mobile number field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error("Only numbers allowed")]
    NonDigit,
    #[error("Mobile number should be 10 digits long")]
    TooShort,
}

/// Result of feeding raw text to the phone field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneInput {
    /// Store `digits` and show `error` (if any).
    Accepted {
        digits: String,
        error: Option<PhoneError>,
    },
    /// Input would exceed [`PHONE_LEN`] digits; keep the previous value.
    Rejected,
}

/// Strip non-digits from a phone entry and classify it.
pub fn clean_phone(raw: &str) -> PhoneInput {
    let digits = digits_only(raw);
    if digits.len() > PHONE_LEN {
        return PhoneInput::Rejected;
    }
    let error = if digits.len() != raw.len() {
        Some(PhoneError::NonDigit)
    } else if !digits.is_empty() && digits.len() < PHONE_LEN {
        Some(PhoneError::TooShort)
    } else {
        None
    };
    PhoneInput::Accepted { digits, error }
}

/// Digits of an OTP entry, or `None` when it would exceed [`OTP_LEN`].
pub fn clean_otp(raw: &str) -> Option<String> {
    let digits = digits_only(raw);
    (digits.len() <= OTP_LEN).then_some(digits)
}

/// Digits of a PIN code entry truncated to [`PIN_LEN`].
pub fn clean_pin(raw: &str) -> String {
    digits_only(raw).chars().take(PIN_LEN).collect()
}

/// Whether `raw` is an acceptable keystroke state for the capacity field:
/// digits with at most one decimal point and two decimals.
pub fn accepts_capacity_input(raw: &str) -> bool {
    CAPACITY_INPUT_RE.is_match(raw)
}

/// Inline error for the solar capacity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("Enter a valid solar capacity")]
    Malformed,
    #[error("Solar capacity must be between 3 and 5.9 kW")]
    OutOfRange,
}

/// Validate a stored capacity value. Empty means "not entered yet" and is not an error.
pub fn capacity_error(value: &str) -> Option<CapacityError> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(capacity) if in_range(capacity) => None,
        Ok(_) => Some(CapacityError::OutOfRange),
        Err(_) => Some(CapacityError::Malformed),
    }
}

/// Inline errors for the numeric bid fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BidFieldError {
    #[error("Number of units must be less than or equal to 500.")]
    TooManyUnits,
    #[error("Bid rate must be between ₹ 3 and ₹ 5.9")]
    RateOutOfRange,
    #[error("Enter a valid number")]
    NotANumber,
}

/// Validate the units field; empty is not an error.
pub fn units_error(value: &str) -> Option<BidFieldError> {
    match parse_optional(value) {
        Ok(Some(units)) if units > MAX_BID_UNITS => Some(BidFieldError::TooManyUnits),
        Ok(_) => None,
        Err(err) => Some(err),
    }
}

/// Validate the bid rate field; empty is not an error.
pub fn rate_error(value: &str) -> Option<BidFieldError> {
    match parse_optional(value) {
        Ok(Some(rate)) if !in_range(rate) => Some(BidFieldError::RateOutOfRange),
        Ok(_) => None,
        Err(err) => Some(err),
    }
}

/// Keep only characters that can form a decimal number.
pub fn numeric_chars(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect()
}

fn parse_optional(value: &str) -> Result<Option<f64>, BidFieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| BidFieldError::NotANumber)
}

fn in_range(value: f64) -> bool {
    (RANGE_MIN..=RANGE_MAX).contains(&value)
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_cleaner_never_yields_more_than_ten_digits() {
        let samples = [
            "",
            "9",
            "98765abc",
            "98765432011",
            "+91 98765 43210",
            "9876543210",
            "१२३",
            "12345678901234567890",
        ];
        for sample in samples {
            if let PhoneInput::Accepted { digits, .. } = clean_phone(sample) {
                assert!(digits.len() <= PHONE_LEN, "{sample:?} -> {digits:?}");
                assert!(digits.chars().all(|ch| ch.is_ascii_digit()));
            }
        }
    }

    #[test]
    fn phone_errors_follow_input_shape() {
        assert_eq!(clean_phone("98765432011"), PhoneInput::Rejected);
        assert_eq!(
            clean_phone("987654320"),
            PhoneInput::Accepted {
                digits: "987654320".to_string(),
                error: Some(PhoneError::TooShort),
            }
        );
        assert_eq!(
            clean_phone("98a"),
            PhoneInput::Accepted {
                digits: "98".to_string(),
                error: Some(PhoneError::NonDigit),
            }
        );
        assert_eq!(
            clean_phone("9876543210"),
            PhoneInput::Accepted {
                digits: "9876543210".to_string(),
                error: None,
            }
        );
        assert_eq!(
            clean_phone(""),
            PhoneInput::Accepted {
                digits: String::new(),
                error: None,
            }
        );
    }

    #[test]
    fn otp_and_pin_cleaning() {
        assert_eq!(clean_otp("12a34").as_deref(), Some("1234"));
        assert_eq!(clean_otp("1234567"), None);
        assert_eq!(clean_pin("56-00-66-9"), "560066");
    }

    #[test]
    fn capacity_input_and_range() {
        assert!(accepts_capacity_input(""));
        assert!(accepts_capacity_input("5."));
        assert!(accepts_capacity_input("5.9"));
        assert!(accepts_capacity_input(".25"));
        assert!(!accepts_capacity_input("abc"));
        assert!(!accepts_capacity_input("5.999"));
        assert!(!accepts_capacity_input("1.2.3"));

        assert_eq!(capacity_error("6"), Some(CapacityError::OutOfRange));
        assert_eq!(capacity_error("2.99"), Some(CapacityError::OutOfRange));
        assert_eq!(capacity_error("5.9"), None);
        assert_eq!(capacity_error("3"), None);
        assert_eq!(capacity_error(""), None);
        assert_eq!(capacity_error("."), Some(CapacityError::Malformed));
    }

    #[test]
    fn bid_numbers_validate_and_recover() {
        assert_eq!(units_error("501"), Some(BidFieldError::TooManyUnits));
        assert_eq!(units_error("500"), None);
        assert_eq!(units_error(""), None);
        assert_eq!(rate_error("6"), Some(BidFieldError::RateOutOfRange));
        assert_eq!(rate_error("2.5"), Some(BidFieldError::RateOutOfRange));
        assert_eq!(rate_error("4.25"), None);
        assert_eq!(rate_error("."), Some(BidFieldError::NotANumber));
        assert_eq!(numeric_chars("4,5x.1"), "45.1");
    }
}
