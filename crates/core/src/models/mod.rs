#![allow(missing_docs)]

//! Shared domain models.

use serde::{Deserialize, Serialize};

/// Maximum number of characters of a notification shown in the list view.
pub const NOTIFICATION_PREVIEW_LEN: usize = 100;

/// Kind of platform user chosen after OTP verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    /// Consumes and sells solar energy.
    Prosumer,
    /// Only consumes energy.
    Consumer,
    /// Installs solar panels for others.
    Installer,
}

impl UserType {
    /// All user types in display order.
    pub const ALL: [UserType; 3] = [UserType::Prosumer, UserType::Consumer, UserType::Installer];

    /// Label shown on the selection screen.
    pub fn label(&self) -> &'static str {
        match self {
            UserType::Prosumer => "Prosumer",
            UserType::Consumer => "Consumer",
            UserType::Installer => "Install Solar",
        }
    }
}

/// Inbox entry shown on the notifications view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Stable identifier.
    pub id: u32,
    /// Headline.
    pub title: String,
    /// Full message body.
    pub message: String,
    /// Whether the user has already seen it.
    pub is_read: bool,
}

impl Notification {
    /// Message body cut to [`NOTIFICATION_PREVIEW_LEN`] characters with a trailing ellipsis.
    pub fn preview(&self) -> String {
        truncate_text(&self.message, NOTIFICATION_PREVIEW_LEN)
    }
}

/// Sample inbox bundled with the client.
pub fn sample_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            title: "Energy Supply Recorded".to_string(),
            message: "Your solar panel has successfully supplied 25 kWh of energy to the grid today. This is a detailed notification with more information.".to_string(),
            is_read: false,
        },
        Notification {
            id: 2,
            title: "Payment Received".to_string(),
            message: "Payment of ₹ 1,250 received for energy supplied this week.".to_string(),
            is_read: true,
        },
        Notification {
            id: 3,
            title: "System Update".to_string(),
            message: "Platform maintenance scheduled for tomorrow at 2 AM IST.".to_string(),
            is_read: true,
        },
    ]
}

/// Label/value row on the account page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountDetail {
    pub label: &'static str,
    pub value: &'static str,
}

/// Account details shown until a profile endpoint exists.
pub const ACCOUNT_DETAILS: &[AccountDetail] = &[
    AccountDetail { label: "First Name", value: "John" },
    AccountDetail { label: "Last Name", value: "Doe" },
    AccountDetail { label: "Phone Number", value: "+91-9876543210" },
    AccountDetail { label: "State", value: "Karnataka" },
    AccountDetail { label: "City", value: "Bangalore" },
    AccountDetail { label: "DISCOM", value: "BESCOM" },
    AccountDetail { label: "Locality", value: "Whitefield" },
    AccountDetail { label: "PIN Code", value: "560066" },
    AccountDetail { label: "Meter Number", value: "1234678" },
    AccountDetail { label: "Connection Number", value: "5679054332q" },
    AccountDetail { label: "Metering Category", value: "Net Metering" },
    AccountDetail { label: "Solar Capacity", value: "40.00 kW" },
    AccountDetail { label: "Customer ID", value: "CUST-12345" },
];

/// Energy supplied over a period together with the average price obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyStats {
    pub label: &'static str,
    pub supplied_kwh: f64,
    pub avg_price: f64,
}

impl SupplyStats {
    /// Two-line summary used on dashboard cards.
    pub fn summary(&self) -> String {
        format!(
            "{:.2} kWh with an avg price of ₹ {:.2}",
            self.supplied_kwh, self.avg_price
        )
    }
}

/// The signed-in user's own statistics.
pub const USER_STATS: [SupplyStats; 2] = [
    SupplyStats { label: "Supplied this Week", supplied_kwh: 0.0, avg_price: 0.0 },
    SupplyStats { label: "Total Supplied", supplied_kwh: 0.0, avg_price: 0.0 },
];

/// Platform-wide statistics.
pub const PLATFORM_STATS: [SupplyStats; 2] = [
    SupplyStats { label: "Supplied this Week", supplied_kwh: 90.0, avg_price: 4.36 },
    SupplyStats { label: "Total Supplied", supplied_kwh: 892.0, avg_price: 4.41 },
];

/// Cut `text` to at most `max_len` characters, appending `...` when shortened.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let mut truncated: String = text.chars().take(max_len).collect();
        truncated.push_str("...");
        truncated
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_notifications_are_truncated() {
        let notifications = sample_notifications();
        let preview = notifications[0].preview();
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), NOTIFICATION_PREVIEW_LEN + 3);
        assert_eq!(notifications[1].preview(), notifications[1].message);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_text("₹₹₹₹", 2), "₹₹...");
        assert_eq!(truncate_text("₹₹", 2), "₹₹");
    }
}
