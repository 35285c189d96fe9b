//! Static option tables used by the registration and bidding forms.

/// States offered on the registration form, paired with their cities.
pub const STATES_CITIES: &[(&str, &[&str])] = &[
    ("Andhra Pradesh", &["Hyderabad", "Vijayawada", "Visakhapatnam"]),
    ("Karnataka", &["Bangalore", "Mysore", "Mangalore"]),
    ("Maharashtra", &["Mumbai", "Pune", "Nagpur"]),
    ("Tamil Nadu", &["Chennai", "Coimbatore", "Madurai"]),
    ("Delhi", &["New Delhi", "East Delhi", "South Delhi"]),
];

/// Distribution companies a prosumer can be connected to.
pub const DISCOMS: &[&str] = &["BESCOM", "CESC", "HESCOM", "GESCOM", "MESCOM"];

/// Metering arrangements.
pub const METERING_CATEGORIES: &[&str] = &["Net Metering", "Gross Metering"];

/// Calendar month names, January first.
pub const MONTHS: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Names of all known states in display order.
pub fn states() -> Vec<&'static str> {
    STATES_CITIES.iter().map(|(state, _)| *state).collect()
}

/// Cities for `state`, or an empty slice when the state is unknown.
pub fn cities_for(state: &str) -> &'static [&'static str] {
    STATES_CITIES
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, cities)| *cities)
        .unwrap_or(&[])
}
