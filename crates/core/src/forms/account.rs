//! Wallet token panel, VPA form and account change request.

use crate::{error::WalletError, validation::numeric_chars};

/// Token amount entry shared by the buy and redeem modals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenPanel {
    amount: String,
    connecting: bool,
    error: Option<WalletError>,
    balance: f64,
}

impl TokenPanel {
    /// Entered amount text.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Parsed amount, `None` when empty or not a number.
    pub fn amount_value(&self) -> Option<f64> {
        self.amount.trim().parse().ok()
    }

    /// Whether a wallet call is in flight.
    pub fn is_connecting(&self) -> bool {
        self.connecting
    }

    /// Inline wallet error.
    pub fn error(&self) -> Option<&WalletError> {
        self.error.as_ref()
    }

    /// Tokens available to redeem.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Store the amount text, keeping only numeric characters.
    pub fn set_amount(&mut self, raw: &str) {
        self.amount = numeric_chars(raw);
    }

    /// Whether "Buy" is enabled.
    pub fn can_buy(&self) -> bool {
        !self.connecting
    }

    /// Whether "Redeem" is enabled.
    pub fn can_redeem(&self) -> bool {
        !self.connecting && self.amount_value().is_some_and(|amount| amount > 0.0)
    }

    /// Whether the entered amount exceeds the balance. Shown as a warning only.
    pub fn exceeds_balance(&self) -> bool {
        self.amount_value()
            .is_some_and(|amount| amount > 0.0 && amount > self.balance)
    }

    /// Mark a wallet call as started and clear the previous error.
    pub fn begin_connecting(&mut self) {
        self.connecting = true;
        self.error = None;
    }

    /// Record the outcome of the wallet call.
    pub fn finish(&mut self, result: Result<(), WalletError>) {
        self.connecting = false;
        self.error = result.err();
    }

    /// Show an error without a wallet call.
    pub fn fail(&mut self, error: WalletError) {
        self.error = Some(error);
    }

    /// Clear the inline error, e.g. when a modal is reopened.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Virtual payment address entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VpaForm {
    /// Virtual payment address, e.g. `name@bank`.
    pub vpa: String,
    /// Account holder's username.
    pub username: String,
}

impl VpaForm {
    /// Hint shown while the address is blank.
    pub fn vpa_hint(&self) -> Option<&'static str> {
        self.vpa.trim().is_empty().then_some("VPA is required.")
    }
}

/// Free-text request to change account details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeRequest {
    /// Request body.
    pub text: String,
    /// Whether the text was saved as a draft.
    pub draft_saved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeem_needs_positive_amount_and_idle_wallet() {
        let mut panel = TokenPanel::default();
        assert!(panel.can_buy());
        assert!(!panel.can_redeem());

        panel.set_amount("0");
        assert!(!panel.can_redeem());
        panel.set_amount("25");
        assert!(panel.can_redeem());
        assert!(panel.exceeds_balance());

        panel.begin_connecting();
        assert!(!panel.can_buy());
        assert!(!panel.can_redeem());

        panel.finish(Err(WalletError::Unavailable));
        assert!(panel.can_redeem());
        assert_eq!(panel.error(), Some(&WalletError::Unavailable));

        panel.begin_connecting();
        assert_eq!(panel.error(), None);
    }

    #[test]
    fn vpa_hint_tracks_blank_address() {
        let mut form = VpaForm::default();
        assert_eq!(form.vpa_hint(), Some("VPA is required."));
        form.vpa = "asha@upi".to_string();
        assert_eq!(form.vpa_hint(), None);
    }
}
