use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::registration::AccountType;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Field -> message. Server field names are not known ahead of time.
pub type LoginErrors = BTreeMap<String, String>;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginForm {
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub email: String,
    pub password: String,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            account_type: AccountType::Patient,
            email: String::new(),
            password: String::new(),
        }
    }
}

impl LoginForm {
    pub fn new(account_type: AccountType, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account_type,
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> LoginErrors {
        let mut errors = LoginErrors::new();
        if self.email.is_empty() {
            errors.insert("email".to_string(), "Email is required".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                "password".to_string(),
                "Password must be at least 8 characters long".to_string(),
            );
        }
        errors
    }
}
