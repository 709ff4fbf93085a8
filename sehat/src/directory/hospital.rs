use serde::{Deserialize, Serialize};
use std::fmt;

use crate::theme::DisplayTheme;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HospitalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
}

/// One row of `GET /hospitalapi`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Hospital {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub address: HospitalAddress,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub departments: Vec<String>,
    pub available_services: Vec<String>,
    pub ratings: Option<f64>,
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

fn join_or_na(items: &[String]) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(", ")
    }
}

impl Hospital {
    pub fn address_line(&self) -> String {
        format!(
            "{}, {}, {}",
            or_na(&self.address.street),
            or_na(&self.address.city),
            or_na(&self.address.state)
        )
    }

    /// Case-insensitive substring match on name, street, city and state.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [
            &self.name,
            &self.address.street,
            &self.address.city,
            &self.address.state,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }

    pub fn render(&self, theme: DisplayTheme) -> String {
        let rating = self
            .ratings
            .map(|r| format!("{r}/5"))
            .unwrap_or_else(|| "N/A/5".to_string());
        format!(
            "{}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n",
            theme.accent(&self.name),
            theme.heading("Address:"),
            self.address_line(),
            theme.heading("Phone:"),
            or_na(self.phone.as_deref().unwrap_or_default()),
            theme.heading("Website:"),
            or_na(self.website.as_deref().unwrap_or_default()),
            theme.heading("Departments:"),
            join_or_na(&self.departments),
            theme.heading("Available Services:"),
            join_or_na(&self.available_services),
            theme.heading("Ratings:"),
            rating,
        )
    }
}

impl fmt::Display for Hospital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address_line())
    }
}
