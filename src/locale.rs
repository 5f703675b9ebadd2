//! Supported locales.
//!
//! `Locale` is the closed set of locales a translation can be stored under.
//! The string token (`"de_DE"`, `"en_GB"`) is shared by the HTTP query
//! parameter, the JSON body and the PostgreSQL `locale` enum type, so the
//! same spelling is used for serde and sqlx.

use serde::Serialize;
use std::fmt;

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[sqlx(type_name = "locale")]
pub enum Locale {
    #[serde(rename = "de_DE")]
    #[sqlx(rename = "de_DE")]
    DeDe,
    #[serde(rename = "en_GB")]
    #[sqlx(rename = "en_GB")]
    EnGb,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Locale; 2] = [Locale::DeDe, Locale::EnGb];

    /// Parse a wire token. Only exact matches are accepted: `"en-GB"`,
    /// `"EN_GB"` or `" en_GB"` are all rejected.
    pub fn from_token(token: &str) -> Option<Locale> {
        match token {
            "de_DE" => Some(Locale::DeDe),
            "en_GB" => Some(Locale::EnGb),
            _ => None,
        }
    }

    /// The wire token for this locale.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::DeDe => "de_DE",
            Locale::EnGb => "en_GB",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
