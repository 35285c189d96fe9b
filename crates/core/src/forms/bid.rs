//! Sell-bid form.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::MONTHS,
    validation::{numeric_chars, rate_error, units_error, BidFieldError},
};

/// Date format accepted for the preferential exchange window.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// Date format used to show the day-ahead delivery date.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Kind of bid being placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidCategory {
    /// Direct sale to a named partner over a date window.
    PreferentialExchange,
    /// Sale for the coming calendar month.
    Monthly,
    /// Sale for tomorrow.
    DayAhead,
}

impl BidCategory {
    /// Categories in display order.
    pub const ALL: [BidCategory; 3] = [
        BidCategory::PreferentialExchange,
        BidCategory::Monthly,
        BidCategory::DayAhead,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            BidCategory::PreferentialExchange => "Preferential Exchange of Energy",
            BidCategory::Monthly => "Monthly",
            BidCategory::DayAhead => "Day ahead",
        }
    }
}

/// Editable text field of the bid form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BidField {
    /// Partner's customer id.
    PartnerId,
    /// Window start, `YYYY-MM-DD`.
    StartDate,
    /// Window end, `YYYY-MM-DD`.
    EndDate,
    /// Chosen month.
    Period,
    /// kWh offered.
    Units,
    /// Price per kWh in rupees.
    BidRate,
}

impl BidField {
    /// Field label.
    pub fn label(&self) -> &'static str {
        match self {
            BidField::PartnerId => "Partner's Customer ID",
            BidField::StartDate => "Start Date (YYYY-MM-DD)",
            BidField::EndDate => "End Date (YYYY-MM-DD)",
            BidField::Period => "Month",
            BidField::Units => "Number of Units (kWh)",
            BidField::BidRate => "Sell - Bid rate (₹)",
        }
    }

    /// Fields shown for `category`, category-specific ones first.
    pub fn for_category(category: BidCategory) -> &'static [BidField] {
        match category {
            BidCategory::PreferentialExchange => &[
                BidField::PartnerId,
                BidField::StartDate,
                BidField::EndDate,
                BidField::Units,
                BidField::BidRate,
            ],
            BidCategory::Monthly => &[BidField::Period, BidField::Units, BidField::BidRate],
            BidCategory::DayAhead => &[BidField::Units, BidField::BidRate],
        }
    }
}

/// Inline errors for the numeric fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BidErrors {
    /// Error under the units field.
    pub units: Option<BidFieldError>,
    /// Error under the bid rate field.
    pub bid_rate: Option<BidFieldError>,
}

impl BidErrors {
    /// Whether no error is showing.
    pub fn is_empty(&self) -> bool {
        self.units.is_none() && self.bid_rate.is_none()
    }
}

/// Bid form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidForm {
    category: Option<BidCategory>,
    partner_id: String,
    start_date: String,
    end_date: String,
    period: String,
    units: String,
    bid_rate: String,
    errors: BidErrors,
}

impl BidForm {
    /// Chosen category, if any.
    pub fn category(&self) -> Option<BidCategory> {
        self.category
    }

    /// Current inline errors.
    pub fn errors(&self) -> BidErrors {
        self.errors
    }

    /// Value of `field`.
    pub fn value(&self, field: BidField) -> &str {
        match field {
            BidField::PartnerId => &self.partner_id,
            BidField::StartDate => &self.start_date,
            BidField::EndDate => &self.end_date,
            BidField::Period => &self.period,
            BidField::Units => &self.units,
            BidField::BidRate => &self.bid_rate,
        }
    }

    /// Choose a category. Every other field and all errors are cleared,
    /// even when the same category is chosen again.
    pub fn select_category(&mut self, category: BidCategory) {
        *self = Self {
            category: Some(category),
            ..Self::default()
        };
    }

    /// Store `raw` into `field`. Numeric fields drop non-numeric characters
    /// and are revalidated immediately.
    pub fn set(&mut self, field: BidField, raw: &str) {
        match field {
            BidField::PartnerId => self.partner_id = raw.to_string(),
            BidField::StartDate => self.start_date = raw.to_string(),
            BidField::EndDate => self.end_date = raw.to_string(),
            BidField::Period => self.period = raw.to_string(),
            BidField::Units => {
                self.units = numeric_chars(raw);
                self.validate();
            }
            BidField::BidRate => {
                self.bid_rate = numeric_chars(raw);
                self.validate();
            }
        }
    }

    /// Recompute the numeric field errors. Returns whether the form is error free.
    pub fn validate(&mut self) -> bool {
        self.errors = BidErrors {
            units: units_error(&self.units),
            bid_rate: rate_error(&self.bid_rate),
        };
        self.errors.is_empty()
    }

    /// Whether every field the chosen category needs has a usable value.
    pub fn is_complete(&self) -> bool {
        let Some(category) = self.category else {
            return false;
        };
        let specific = match category {
            BidCategory::PreferentialExchange => {
                !self.partner_id.trim().is_empty()
                    && match (parse_iso(&self.start_date), parse_iso(&self.end_date)) {
                        (Some(start), Some(end)) => start <= end,
                        _ => false,
                    }
            }
            BidCategory::Monthly => !self.period.is_empty(),
            BidCategory::DayAhead => true,
        };
        specific && !self.units.trim().is_empty() && !self.bid_rate.trim().is_empty()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.is_complete() && self.errors.is_empty()
    }

    /// Back to the empty form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The day after `today` formatted `dd/mm/yyyy`.
pub fn next_day_label(today: NaiveDate) -> String {
    (today + Duration::days(1))
        .format(DISPLAY_DATE_FORMAT)
        .to_string()
}

/// Name of the calendar month after the one containing `today`.
pub fn next_month_name(today: NaiveDate) -> &'static str {
    MONTHS[(today.month0() as usize + 1) % MONTHS.len()]
}

fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn category_change_clears_everything() {
        let mut form = BidForm::default();
        form.select_category(BidCategory::PreferentialExchange);
        for (field, value) in [
            (BidField::PartnerId, "CUST-1"),
            (BidField::StartDate, "2026-01-01"),
            (BidField::EndDate, "2026-01-31"),
            (BidField::Period, "March"),
            (BidField::Units, "900"),
            (BidField::BidRate, "4"),
        ] {
            form.set(field, value);
        }
        assert!(form.errors().units.is_some());

        form.select_category(BidCategory::Monthly);
        for field in [
            BidField::PartnerId,
            BidField::StartDate,
            BidField::EndDate,
            BidField::Period,
            BidField::Units,
            BidField::BidRate,
        ] {
            assert_eq!(form.value(field), "", "{field:?}");
        }
        assert!(form.errors().is_empty());
        assert_eq!(form.category(), Some(BidCategory::Monthly));
    }

    #[test]
    fn numeric_errors_appear_and_clear() {
        let mut form = BidForm::default();
        form.select_category(BidCategory::DayAhead);
        form.set(BidField::Units, "501");
        assert_eq!(form.errors().units, Some(BidFieldError::TooManyUnits));
        form.set(BidField::Units, "500");
        assert_eq!(form.errors().units, None);

        form.set(BidField::BidRate, "6");
        assert_eq!(form.errors().bid_rate, Some(BidFieldError::RateOutOfRange));
        form.set(BidField::BidRate, "5.9");
        assert_eq!(form.errors().bid_rate, None);
        assert!(form.can_submit());
    }

    #[test]
    fn completeness_depends_on_category() {
        let mut form = BidForm::default();
        form.set(BidField::Units, "10");
        form.set(BidField::BidRate, "4");
        assert!(!form.can_submit());

        form.select_category(BidCategory::PreferentialExchange);
        form.set(BidField::Units, "10");
        form.set(BidField::BidRate, "4");
        form.set(BidField::PartnerId, "CUST-9");
        form.set(BidField::StartDate, "2026-02-10");
        form.set(BidField::EndDate, "not a date");
        assert!(!form.is_complete());
        form.set(BidField::EndDate, "2026-02-01");
        assert!(!form.is_complete());
        form.set(BidField::EndDate, "2026-02-20");
        assert!(form.can_submit());

        form.select_category(BidCategory::Monthly);
        form.set(BidField::Units, "10");
        form.set(BidField::BidRate, "4");
        assert!(!form.is_complete());
        form.set(BidField::Period, "March");
        assert!(form.can_submit());
    }

    #[test]
    fn units_drop_letters() {
        let mut form = BidForm::default();
        form.set(BidField::Units, "1a2b");
        assert_eq!(form.value(BidField::Units), "12");
    }

    #[test]
    fn next_day_and_month_helpers() {
        assert_eq!(next_day_label(date(2026, 12, 31)), "01/01/2027");
        assert_eq!(next_day_label(date(2026, 3, 9)), "10/03/2026");
        assert_eq!(next_month_name(date(2026, 12, 5)), "January");
        assert_eq!(next_month_name(date(2026, 10, 16)), "November");
    }
}
