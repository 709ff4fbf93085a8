//! Read-only rendering of the collected record for the review step.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::state::{AccountType, BasicIdentity, SecondaryProfile};
use crate::theme::DisplayTheme;

const HIDDEN_FIELDS: [&str; 2] = ["password", "confirmPassword"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReviewEntry {
    Field { label: String, value: String },
    List { label: String, items: Vec<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewSheet {
    pub basic: Vec<ReviewEntry>,
    pub secondary: Vec<ReviewEntry>,
}

fn label_for(key: &str) -> String {
    let known = match key {
        "type" => "Account Type",
        "name" => "First Name",
        "surname" => "Last Name",
        "phone" => "Phone",
        "email" => "Email",
        "street" => "Street",
        "city" => "City",
        "state" => "State",
        "postalCode" => "Pin Code",
        "gender" => "Gender",
        "dob" => "Date of Birth",
        "medicalHistory" => "Medical History",
        "website" => "Website",
        "department" => "Departments",
        "availableServices" => "Available Services",
        _ => "",
    };
    if !known.is_empty() {
        return known.to_string();
    }

    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn scalar_text(key: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) if key == "type" => Some(
            s.parse::<AccountType>()
                .map(|t| t.label().to_string())
                .unwrap_or_else(|_| s.clone()),
        ),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Flattens nested objects, lists arrays, and drops empty or sensitive values.
fn collect_entries(object: &Value, out: &mut Vec<ReviewEntry>) {
    let Value::Object(map) = object else {
        return;
    };

    for (key, value) in map {
        if HIDDEN_FIELDS.contains(&key.as_str()) {
            continue;
        }
        match value {
            Value::Object(_) => collect_entries(value, out),
            Value::Array(items) => {
                let items: Vec<String> = items
                    .iter()
                    .filter_map(|item| scalar_text(key, item))
                    .collect();
                if !items.is_empty() {
                    out.push(ReviewEntry::List { label: label_for(key), items });
                }
            }
            scalar => {
                if let Some(value) = scalar_text(key, scalar) {
                    out.push(ReviewEntry::Field { label: label_for(key), value });
                }
            }
        }
    }
}

impl ReviewSheet {
    pub fn build(basic: &BasicIdentity, secondary: &SecondaryProfile) -> Self {
        let mut sheet = ReviewSheet::default();
        collect_entries(&serde_json::to_value(basic).unwrap_or_default(), &mut sheet.basic);
        collect_entries(&serde_json::to_value(secondary).unwrap_or_default(), &mut sheet.secondary);
        sheet
    }

    pub fn entries(&self) -> impl Iterator<Item = &ReviewEntry> {
        self.basic.iter().chain(self.secondary.iter())
    }

    pub fn render(&self, theme: DisplayTheme) -> String {
        let mut out = String::new();
        out.push_str(&theme.heading("Review and Register"));
        out.push('\n');
        for entry in self.entries() {
            match entry {
                ReviewEntry::Field { label, value } => {
                    out.push_str(&format!("{} {value}\n", theme.heading(&format!("{label}:"))));
                }
                ReviewEntry::List { label, items } => {
                    out.push_str(&theme.heading(&format!("{label}:")));
                    out.push('\n');
                    for (i, item) in items.iter().enumerate() {
                        out.push_str(&format!("  {}. {item}\n", i + 1));
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for ReviewSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries() {
            match entry {
                ReviewEntry::Field { label, value } => writeln!(f, "{label}: {value}")?,
                ReviewEntry::List { label, items } => {
                    writeln!(f, "{label}:")?;
                    for (i, item) in items.iter().enumerate() {
                        writeln!(f, "  {}. {item}", i + 1)?;
                    }
                }
            }
        }
        Ok(())
    }
}
