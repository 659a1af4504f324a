//! Per-visitor display preferences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// A missing flag means light.
    pub fn from_dark_flag(dark: Option<bool>) -> Self {
        if dark.unwrap_or(false) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Pick between two class lists.
    pub fn pick<'a>(&self, light: &'a str, dark: &'a str) -> &'a str {
        if self.is_dark() { dark } else { light }
    }
}

/// Interface language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl Locale {
    pub const AVAILABLE: [Locale; 2] = [Locale::Es, Locale::En];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// English switches back to Spanish, anything else to English.
    pub fn toggled(self) -> Self {
        match self {
            Locale::En => Locale::Es,
            Locale::Es => Locale::En,
        }
    }

    /// Resolve a stored code, falling back to the default.
    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(|c| c.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
