//! Registration drafts: both wizard steps written down in a TOML or JSON file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use sehat::registration::{BasicIdentity, SecondaryProfile};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Draft {
    pub basic: BasicIdentity,
    pub secondary: SecondaryProfile,
}

impl Draft {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read draft {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse draft {}", path.display()))
        } else {
            toml::from_str(&content).with_context(|| format!("Failed to parse draft {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sehat::registration::{AccountType, Gender};

    #[test]
    fn test_toml_draft_uses_wire_names() {
        let draft: Draft = toml::from_str(
            r#"
            [basic]
            type = "user"
            name = "Ann"
            phone = "1234567890"
            email = "a@b.com"
            password = "pw123456"
            confirmPassword = "pw123456"

            [secondary]
            gender = "Female"
            dob = "1990-04-12"
            medicalHistory = ["Asthma"]

            [secondary.address]
            street = "12 MG Road"
            city = "Pune"
            state = "Maharashtra"
            postalCode = "411001"
            "#,
        )
        .unwrap();

        assert_eq!(draft.basic.account_type, AccountType::Patient);
        assert_eq!(draft.basic.password_confirmation, "pw123456");
        assert_eq!(draft.secondary.gender, Some(Gender::Female));
        assert_eq!(draft.secondary.address.postal_code, "411001");
        assert_eq!(draft.secondary.medical_history, vec!["Asthma".to_string()]);
    }

    #[test]
    fn test_json_draft_for_provider() {
        let draft: Draft = serde_json::from_str(
            r#"{
                "basic": {"type": "hospital", "name": "Dr Rao", "phone": "9876543210"},
                "secondary": {"department": ["cardiology"], "availableServices": ["OPD"]}
            }"#,
        )
        .unwrap();

        assert_eq!(draft.basic.account_type, AccountType::Provider);
        assert!(draft.secondary.departments.contains("cardiology"));
        assert!(draft.basic.email.is_empty());
    }
}
