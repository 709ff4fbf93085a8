use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Departments a provider can pick from.
pub const DEPARTMENTS: [&str; 6] = [
    "cardiology",
    "neurology",
    "orthopedics",
    "pediatrics",
    "gynecology",
    "dermatology",
];

pub fn is_known_department(name: &str) -> bool {
    DEPARTMENTS.contains(&name)
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountType {
    #[serde(rename = "user")]
    Patient,
    #[default]
    #[serde(rename = "hospital")]
    Provider,
}

impl AccountType {
    pub fn label(self) -> &'static str {
        match self {
            AccountType::Patient => "Patient",
            AccountType::Provider => "Doctor",
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            AccountType::Patient => "user",
            AccountType::Provider => "hospital",
        }
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "patient" => Ok(AccountType::Patient),
            "hospital" | "provider" | "doctor" => Ok(AccountType::Provider),
            other => Err(format!("unknown account type '{other}'")),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender '{other}'")),
        }
    }
}

/// Step 0 fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BasicIdentity {
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(rename = "name")]
    pub first_name: String,
    #[serde(rename = "surname", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub phone: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub password_confirmation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Step 1 fields. Which of them are required depends on the account type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SecondaryProfile {
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(rename = "dob", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    pub medical_history: Vec<String>,
    #[serde(rename = "website", skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(rename = "department")]
    pub departments: BTreeSet<String>,
    pub available_services: Vec<String>,
}

impl SecondaryProfile {
    /// Select the department if absent, deselect it if present. Names outside
    /// [`DEPARTMENTS`] are ignored. Returns whether it is selected afterwards.
    pub fn toggle_department(&mut self, department: &str) -> bool {
        let department = department.trim().to_lowercase();
        if !is_known_department(&department) {
            tracing::warn!(%department, "ignoring unknown department");
            return false;
        }
        if self.departments.remove(&department) {
            false
        } else {
            self.departments.insert(department)
        }
    }

    /// Selected departments that are not in [`DEPARTMENTS`], e.g. from a hand-written draft.
    pub fn unknown_departments(&self) -> Vec<&str> {
        self.departments
            .iter()
            .map(String::as_str)
            .filter(|d| !is_known_department(d))
            .collect()
    }

    pub fn append_medical_history(&mut self, input: &str) {
        self.medical_history.extend(split_comma_list(input));
    }

    pub fn append_available_services(&mut self, input: &str) {
        self.available_services.extend(split_comma_list(input));
    }
}

/// "OPD, Cancer Treatment," -> ["OPD", "Cancer Treatment"]
pub fn split_comma_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Body of `POST /auth/register`: both records merged, confirmation left out.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegistrationPayload {
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    pub phone: String,
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub profile: SecondaryProfile,
}

impl RegistrationPayload {
    pub fn merge(basic: &BasicIdentity, secondary: &SecondaryProfile) -> Self {
        Self {
            account_type: basic.account_type,
            name: basic.first_name.clone(),
            surname: basic.last_name.clone().filter(|s| !s.trim().is_empty()),
            phone: basic.phone.clone(),
            email: basic.email.clone(),
            password: basic.password.clone(),
            profile: secondary.clone(),
        }
    }
}
