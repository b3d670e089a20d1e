//! Property-Based Test Generators
//!
//! Provides proptest strategies for request field values on both sides of
//! the built-in rules.

use proptest::prelude::*;

/// Strategy for registration plates such as `MH02AB1234`
pub fn vehicle_number_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{2}[0-9]{1,2}[A-Z]{0,3}[0-9]{4}"
}

/// Strategy for strings that are never a registration plate
pub fn malformed_vehicle_number_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{3,10}",
        "[A-Z]{2}-[0-9]{2}-[A-Z]{2}-[0-9]{4}",
        "[A-Z]{2}[0-9]{1,2}[A-Z]{4,6}[0-9]{4}",
    ]
}

/// Strategy for Indian mobile numbers with an optional country prefix
pub fn indian_mobile_strategy() -> impl Strategy<Value = String> {
    (prop_oneof![Just(""), Just("+91"), Just("91"), Just("0")], "[6-9][0-9]{9}")
        .prop_map(|(prefix, number)| format!("{}{}", prefix, number))
}

/// Strategy for ISO-8601 calendar dates that exist
pub fn iso_date_strategy() -> impl Strategy<Value = String> {
    (2000i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d))
}
