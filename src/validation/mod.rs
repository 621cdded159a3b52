// ABOUTME: Field validation for the registration forms
// Pure predicates with their user-facing messages, plus the versioned
// rule profiles that select which plate/password rules are active

#![allow(dead_code)]

pub mod profile;
pub mod rules;

pub use profile::{PasswordPolicy, PlateFormat, ValidationProfile};
pub use rules::{
    age_on, check_license_dates, check_vehicle_year, is_numeric, is_valid_email, is_valid_name,
    is_valid_phone, parse_date, MAX_UPLOAD_BYTES, MSG_REQUIRED_FIELD,
};
