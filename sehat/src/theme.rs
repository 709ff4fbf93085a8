//! Display theme handed explicitly to renderers.

use console::{style, StyledObject};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayTheme {
    #[default]
    Light,
    Dark,
}

impl DisplayTheme {
    /// Field labels and card titles.
    pub fn heading(self, text: &str) -> String {
        self.heading_style(text).to_string()
    }

    /// Emphasised names, e.g. hospital names in a list.
    pub fn accent(self, text: &str) -> String {
        self.accent_style(text).to_string()
    }

    pub fn muted(self, text: &str) -> String {
        style(text).dim().to_string()
    }

    fn heading_style(self, text: &str) -> StyledObject<&str> {
        match self {
            DisplayTheme::Light => style(text).bold(),
            DisplayTheme::Dark => style(text).bold().yellow(),
        }
    }

    fn accent_style(self, text: &str) -> StyledObject<&str> {
        match self {
            DisplayTheme::Light => style(text).magenta(),
            DisplayTheme::Dark => style(text).yellow(),
        }
    }
}

impl FromStr for DisplayTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(DisplayTheme::Light),
            "dark" => Ok(DisplayTheme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

impl fmt::Display for DisplayTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayTheme::Light => f.write_str("light"),
            DisplayTheme::Dark => f.write_str("dark"),
        }
    }
}
