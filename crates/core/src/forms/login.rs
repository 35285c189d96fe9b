//! Phone number, OTP and terms acceptance.

use crate::validation::{clean_otp, clean_phone, PhoneError, PhoneInput, OTP_LEN, PHONE_LEN};

/// Login form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    phone: String,
    otp: String,
    terms_accepted: bool,
    phone_error: Option<PhoneError>,
}

impl Credentials {
    /// Entered phone digits.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Entered OTP digits.
    pub fn otp(&self) -> &str {
        &self.otp
    }

    /// Whether the terms checkbox is ticked.
    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    /// Inline error under the phone field.
    pub fn phone_error(&self) -> Option<PhoneError> {
        self.phone_error
    }

    /// Feed the whole raw field text. Returns `false` when the input was
    /// rejected and the field left unchanged.
    pub fn set_phone(&mut self, raw: &str) -> bool {
        match clean_phone(raw) {
            PhoneInput::Accepted { digits, error } => {
                self.phone = digits;
                self.phone_error = error;
                true
            }
            PhoneInput::Rejected => false,
        }
    }

    /// Feed the whole raw OTP text. Input longer than six digits is rejected.
    pub fn set_otp(&mut self, raw: &str) -> bool {
        match clean_otp(raw) {
            Some(digits) => {
                self.otp = digits;
                true
            }
            None => false,
        }
    }

    /// Forget the entered OTP.
    pub fn clear_otp(&mut self) {
        self.otp.clear();
    }

    /// Tick or untick the terms checkbox.
    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    /// Whether "Get OTP" is enabled.
    pub fn can_request_otp(&self) -> bool {
        self.phone.len() == PHONE_LEN && self.terms_accepted && self.phone_error.is_none()
    }

    /// Whether "Verify" is enabled.
    pub fn can_submit_otp(&self) -> bool {
        self.otp.len() == OTP_LEN
    }

    /// Back to the empty form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_request_needs_full_number_and_terms() {
        let mut creds = Credentials::default();
        assert!(creds.set_phone("98765"));
        creds.set_terms_accepted(true);
        assert!(!creds.can_request_otp());
        assert_eq!(creds.phone_error(), Some(PhoneError::TooShort));

        assert!(creds.set_phone("9876543210"));
        assert!(creds.can_request_otp());

        creds.set_terms_accepted(false);
        assert!(!creds.can_request_otp());
    }

    #[test]
    fn non_digit_input_keeps_error_until_corrected() {
        let mut creds = Credentials::default();
        creds.set_terms_accepted(true);
        creds.set_phone("987654321x");
        assert_eq!(creds.phone(), "987654321");
        assert_eq!(creds.phone_error(), Some(PhoneError::NonDigit));
        assert!(!creds.can_request_otp());
    }

    #[test]
    fn eleventh_digit_is_dropped() {
        let mut creds = Credentials::default();
        creds.set_phone("9876543210");
        assert!(!creds.set_phone("98765432101"));
        assert_eq!(creds.phone(), "9876543210");
        assert_eq!(creds.phone_error(), None);
    }

    #[test]
    fn otp_submit_enabled_only_at_six_digits() {
        let mut creds = Credentials::default();
        for (input, enabled) in [("1", false), ("12345", false), ("123456", true)] {
            assert!(creds.set_otp(input));
            assert_eq!(creds.can_submit_otp(), enabled, "{input}");
        }
        assert!(!creds.set_otp("1234567"));
        assert_eq!(creds.otp(), "123456");
    }
}
