//! Prosumer registration form.

use serde::{Deserialize, Serialize};

use crate::{
    catalog,
    error::RegistrationError,
    validation::{accepts_capacity_input, capacity_error, clean_pin, CapacityError, PIN_LEN},
};

/// One input on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    /// First name.
    FirstName,
    /// Last name.
    LastName,
    /// State, chosen from the catalogue.
    State,
    /// City within the chosen state.
    City,
    /// Distribution company.
    Discom,
    /// Locality or neighbourhood.
    Locality,
    /// Six-digit PIN code.
    PinCode,
    /// Electricity meter number.
    MeterNumber,
    /// Utility connection number.
    ConnectionNumber,
    /// Net or gross metering.
    MeteringCategory,
    /// Installed solar capacity in kW.
    SolarCapacity,
}

impl RegistrationField {
    /// Fields in form order.
    pub const ALL: [RegistrationField; 11] = [
        RegistrationField::FirstName,
        RegistrationField::LastName,
        RegistrationField::State,
        RegistrationField::City,
        RegistrationField::Discom,
        RegistrationField::Locality,
        RegistrationField::PinCode,
        RegistrationField::MeterNumber,
        RegistrationField::ConnectionNumber,
        RegistrationField::MeteringCategory,
        RegistrationField::SolarCapacity,
    ];

    /// Field label.
    pub fn label(&self) -> &'static str {
        match self {
            RegistrationField::FirstName => "First Name",
            RegistrationField::LastName => "Last Name",
            RegistrationField::State => "State",
            RegistrationField::City => "City",
            RegistrationField::Discom => "DISCOM",
            RegistrationField::Locality => "Locality",
            RegistrationField::PinCode => "PIN Code",
            RegistrationField::MeterNumber => "Meter Number",
            RegistrationField::ConnectionNumber => "Connection Number",
            RegistrationField::MeteringCategory => "Metering Category",
            RegistrationField::SolarCapacity => "Solar Capacity (kW)",
        }
    }

    /// Whether the value is picked from a fixed list rather than typed.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            RegistrationField::State
                | RegistrationField::City
                | RegistrationField::Discom
                | RegistrationField::MeteringCategory
        )
    }
}

/// Body of `POST /api/prosumers`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProsumerRecord {
    pub first_name: String,
    pub last_name: String,
    pub state: String,
    pub city: String,
    pub discom: String,
    pub locality: String,
    pub pin_code: String,
    pub meter_number: String,
    pub connection_number: String,
    pub metering_category: String,
    pub solar_capacity: String,
}

impl ProsumerRecord {
    fn slot(&self, field: RegistrationField) -> &String {
        match field {
            RegistrationField::FirstName => &self.first_name,
            RegistrationField::LastName => &self.last_name,
            RegistrationField::State => &self.state,
            RegistrationField::City => &self.city,
            RegistrationField::Discom => &self.discom,
            RegistrationField::Locality => &self.locality,
            RegistrationField::PinCode => &self.pin_code,
            RegistrationField::MeterNumber => &self.meter_number,
            RegistrationField::ConnectionNumber => &self.connection_number,
            RegistrationField::MeteringCategory => &self.metering_category,
            RegistrationField::SolarCapacity => &self.solar_capacity,
        }
    }

    fn slot_mut(&mut self, field: RegistrationField) -> &mut String {
        match field {
            RegistrationField::FirstName => &mut self.first_name,
            RegistrationField::LastName => &mut self.last_name,
            RegistrationField::State => &mut self.state,
            RegistrationField::City => &mut self.city,
            RegistrationField::Discom => &mut self.discom,
            RegistrationField::Locality => &mut self.locality,
            RegistrationField::PinCode => &mut self.pin_code,
            RegistrationField::MeterNumber => &mut self.meter_number,
            RegistrationField::ConnectionNumber => &mut self.connection_number,
            RegistrationField::MeteringCategory => &mut self.metering_category,
            RegistrationField::SolarCapacity => &mut self.solar_capacity,
        }
    }
}

/// Registration form values plus the inline capacity error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    record: ProsumerRecord,
    capacity_error: Option<CapacityError>,
}

impl RegistrationForm {
    /// Current value of `field`.
    pub fn value(&self, field: RegistrationField) -> &str {
        self.record.slot(field)
    }

    /// All values as the request body.
    pub fn record(&self) -> &ProsumerRecord {
        &self.record
    }

    /// Inline error under the capacity field.
    pub fn capacity_error(&self) -> Option<CapacityError> {
        self.capacity_error
    }

    /// Options for a choice field; empty for free-text fields.
    pub fn options(&self, field: RegistrationField) -> Vec<&'static str> {
        match field {
            RegistrationField::State => catalog::states(),
            RegistrationField::City => catalog::cities_for(&self.record.state).to_vec(),
            RegistrationField::Discom => catalog::DISCOMS.to_vec(),
            RegistrationField::MeteringCategory => catalog::METERING_CATEGORIES.to_vec(),
            _ => Vec::new(),
        }
    }

    /// Store `raw` into `field`, applying that field's cleaning rules.
    /// Returns `false` when the input was rejected and nothing changed.
    ///
    /// Choosing a state clears the city; a city can only be chosen once a
    /// state is.
    pub fn set(&mut self, field: RegistrationField, raw: &str) -> bool {
        match field {
            RegistrationField::State => {
                self.record.state = raw.to_string();
                self.record.city.clear();
            }
            RegistrationField::City => {
                if self.record.state.is_empty() {
                    return false;
                }
                self.record.city = raw.to_string();
            }
            RegistrationField::PinCode => {
                self.record.pin_code = clean_pin(raw);
            }
            RegistrationField::SolarCapacity => {
                if !accepts_capacity_input(raw) {
                    return false;
                }
                self.record.solar_capacity = raw.to_string();
                self.capacity_error = capacity_error(&self.record.solar_capacity);
            }
            _ => *self.record.slot_mut(field) = raw.to_string(),
        }
        true
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.record.pin_code.len() == PIN_LEN && self.capacity_error.is_none()
    }

    /// Check every rule and hand back the record to send.
    pub fn validate(&self) -> Result<ProsumerRecord, RegistrationError> {
        let missing: Vec<&'static str> = RegistrationField::ALL
            .iter()
            .filter(|field| self.record.slot(**field).trim().is_empty())
            .map(|field| field.label())
            .collect();
        if !missing.is_empty() {
            return Err(RegistrationError::MissingFields(missing));
        }
        if self.record.pin_code.len() != PIN_LEN {
            return Err(RegistrationError::InvalidPin);
        }
        if capacity_error(&self.record.solar_capacity).is_some() {
            return Err(RegistrationError::InvalidCapacity);
        }
        Ok(self.record.clone())
    }

    /// Back to the empty form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegistrationForm {
        let mut form = RegistrationForm::default();
        for (field, value) in [
            (RegistrationField::FirstName, "Asha"),
            (RegistrationField::LastName, "Rao"),
            (RegistrationField::State, "Karnataka"),
            (RegistrationField::City, "Mysore"),
            (RegistrationField::Discom, "CESC"),
            (RegistrationField::Locality, "Jayalakshmipuram"),
            (RegistrationField::PinCode, "570012"),
            (RegistrationField::MeterNumber, "M-1"),
            (RegistrationField::ConnectionNumber, "C-1"),
            (RegistrationField::MeteringCategory, "Net Metering"),
            (RegistrationField::SolarCapacity, "4.5"),
        ] {
            assert!(form.set(field, value), "{field:?}");
        }
        form
    }

    #[test]
    fn changing_state_empties_city() {
        let mut form = filled();
        assert_eq!(form.value(RegistrationField::City), "Mysore");
        form.set(RegistrationField::State, "Delhi");
        assert_eq!(form.value(RegistrationField::City), "");
        assert_eq!(form.options(RegistrationField::City), vec!["New Delhi", "East Delhi", "South Delhi"]);
    }

    #[test]
    fn city_needs_a_state() {
        let mut form = RegistrationForm::default();
        assert!(!form.set(RegistrationField::City, "Pune"));
        assert!(form.options(RegistrationField::City).is_empty());
    }

    #[test]
    fn capacity_rejects_malformed_keystrokes() {
        let mut form = RegistrationForm::default();
        assert!(form.set(RegistrationField::SolarCapacity, "5.9"));
        assert!(!form.set(RegistrationField::SolarCapacity, "abc"));
        assert_eq!(form.value(RegistrationField::SolarCapacity), "5.9");
        assert_eq!(form.capacity_error(), None);

        assert!(form.set(RegistrationField::SolarCapacity, "6"));
        assert_eq!(form.capacity_error(), Some(CapacityError::OutOfRange));
    }

    #[test]
    fn submit_disabled_iff_pin_or_capacity_invalid() {
        let mut form = filled();
        assert!(form.can_submit());

        form.set(RegistrationField::PinCode, "5700");
        assert!(!form.can_submit());
        form.set(RegistrationField::PinCode, "570012-99");
        assert_eq!(form.value(RegistrationField::PinCode), "570012");
        assert!(form.can_submit());

        form.set(RegistrationField::SolarCapacity, "2.5");
        assert!(!form.can_submit());
        form.set(RegistrationField::SolarCapacity, "3");
        assert!(form.can_submit());
    }

    #[test]
    fn validate_reports_blank_fields() {
        let mut form = filled();
        form.set(RegistrationField::Locality, "   ");
        form.set(RegistrationField::State, "Delhi");
        match form.validate() {
            Err(RegistrationError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["City", "Locality"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn record_serializes_with_camel_case_keys() -> serde_json::Result<()> {
        let record = filled().validate().expect("valid form");
        let json = serde_json::to_value(&record)?;
        assert_eq!(json["firstName"], "Asha");
        assert_eq!(json["pinCode"], "570012");
        assert_eq!(json["meteringCategory"], "Net Metering");
        assert_eq!(json["solarCapacity"], "4.5");
        assert_eq!(json.as_object().map(|obj| obj.len()), Some(11));
        Ok(())
    }
}
