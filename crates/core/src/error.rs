//! Error types surfaced by the services and form submission.

use thiserror::Error;

/// Failure talking to the registration backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// The base URL could not be combined with the endpoint path.
    #[error("invalid backend URL {0:?}")]
    InvalidUrl(String),
}

/// Failure of a wallet operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// The wallet app could not be reached.
    #[error("Couldn't open the CBDC app. Please try again later.")]
    Unavailable,
    /// Redeeming needs a VPA to pay out to.
    #[error("A VPA must be created before you can redeem tokens.")]
    MissingVpa,
}

/// Why a registration form cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// At least one required field is blank.
    #[error("Please fill all required fields")]
    MissingFields(Vec<&'static str>),
    /// The PIN code is not six digits.
    #[error("Please enter a valid 6-digit PIN code")]
    InvalidPin,
    /// Capacity is malformed or out of range.
    #[error("Solar capacity must be between 3 and 5.9 kW")]
    InvalidCapacity,
}

/// User-facing message shown when registration fails for any reason.
pub const REGISTRATION_FAILED: &str = "Something went wrong. Please try again.";

/// User-facing message shown when the support link cannot be opened.
pub const SUPPORT_LINK_FAILED: &str = "Couldn't open the support chat. Please try again later.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            RegistrationError::MissingFields(vec!["City"]).to_string(),
            "Please fill all required fields"
        );
        assert_eq!(
            WalletError::Unavailable.to_string(),
            "Couldn't open the CBDC app. Please try again later."
        );
        let status = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(status.to_string(), "backend returned HTTP 500: boom");
    }
}
