//! Per-step field rules. Every function here is pure.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::state::{AccountType, BasicIdentity, SecondaryProfile};
use super::Step;

/// Field name (wire name) -> message. Empty means valid.
pub type FieldErrors = BTreeMap<&'static str, String>;

pub const BASIC_INCOMPLETE: &str = "Please fill all required basic details.";
pub const BASIC_INVALID: &str = "Please correct the highlighted basic details.";
pub const SECONDARY_INCOMPLETE: &str = "Please fill all required details.";

/// Why the controller refused to leave a step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRejection {
    pub warning: String,
    pub errors: FieldErrors,
}

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// Exactly ten ASCII digits, no separators.
pub fn is_valid_phone(phone: &str) -> bool {
    phone_pattern().is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_basic(basic: &BasicIdentity) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if blank(&basic.first_name) {
        errors.insert("name", "First name is required".to_string());
    }
    if !is_valid_phone(&basic.phone) {
        errors.insert("phone", "Phone number must be exactly 10 digits".to_string());
    }
    if blank(&basic.email) {
        errors.insert("email", "Email is required".to_string());
    } else if !is_valid_email(&basic.email) {
        errors.insert("email", "Please enter a valid email address".to_string());
    }
    if blank(&basic.password) {
        errors.insert("password", "Password is required".to_string());
    }
    if blank(&basic.password_confirmation) {
        errors.insert("confirmPassword", "Confirm password is required".to_string());
    }
    if basic.password != basic.password_confirmation {
        errors.insert("confirmPassword", "Passwords do not match".to_string());
    }

    errors
}

/// Presence-only gate for step 0: no required field is blank.
pub fn basic_details_complete(basic: &BasicIdentity) -> bool {
    [
        basic.first_name.as_str(),
        basic.phone.as_str(),
        basic.email.as_str(),
        basic.password.as_str(),
        basic.password_confirmation.as_str(),
    ]
    .iter()
    .all(|value| !blank(value))
}

pub fn validate_secondary(profile: &SecondaryProfile, account_type: AccountType) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let address = &profile.address;

    if blank(&address.street) {
        errors.insert("street", "Street is required".to_string());
    }
    if blank(&address.city) {
        errors.insert("city", "City is required".to_string());
    }
    if blank(&address.state) {
        errors.insert("state", "State is required".to_string());
    }
    if blank(&address.postal_code) {
        errors.insert("postalCode", "Pin Code is required".to_string());
    }

    match account_type {
        AccountType::Patient => {
            if profile.gender.is_none() {
                errors.insert("gender", "Gender is required".to_string());
            }
            if profile.date_of_birth.is_none() {
                errors.insert("dob", "DOB is required".to_string());
            }
        }
        AccountType::Provider => {
            let unknown = profile.unknown_departments();
            if profile.departments.is_empty() {
                errors.insert("department", "Departments is required".to_string());
            } else if !unknown.is_empty() {
                errors.insert("department", format!("Unknown department: {}", unknown.join(", ")));
            }
            if profile.available_services.is_empty() {
                errors.insert("availableServices", "At least one service is required".to_string());
            }
        }
    }

    errors
}

/// Display names of the missing step 1 fields, in form order.
pub fn missing_secondary_fields(profile: &SecondaryProfile, account_type: AccountType) -> Vec<&'static str> {
    let errors = validate_secondary(profile, account_type);
    [
        ("street", "Street"),
        ("city", "City"),
        ("state", "State"),
        ("postalCode", "Postal Code"),
        ("gender", "Gender"),
        ("dob", "Date of Birth"),
        ("department", "Department"),
        ("availableServices", "Available Services"),
    ]
    .into_iter()
    .filter(|(key, _)| errors.contains_key(key))
    .map(|(_, label)| label)
    .collect()
}

/// The check the controller runs before leaving `step` forwards.
///
/// Step 0 runs both the presence gate and the format rules.
pub fn step_gate(
    step: Step,
    basic: &BasicIdentity,
    secondary: &SecondaryProfile,
) -> Result<(), StepRejection> {
    match step {
        Step::Basic => {
            let errors = validate_basic(basic);
            if !basic_details_complete(basic) {
                return Err(StepRejection {
                    warning: BASIC_INCOMPLETE.to_string(),
                    errors,
                });
            }
            if !errors.is_empty() {
                return Err(StepRejection {
                    warning: BASIC_INVALID.to_string(),
                    errors,
                });
            }
            Ok(())
        }
        Step::Secondary => {
            let errors = validate_secondary(secondary, basic.account_type);
            if errors.is_empty() {
                Ok(())
            } else {
                Err(StepRejection {
                    warning: SECONDARY_INCOMPLETE.to_string(),
                    errors,
                })
            }
        }
        Step::Review => Ok(()),
    }
}
