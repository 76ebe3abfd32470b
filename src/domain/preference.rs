//! Preference values negotiated per client.
//!
//! Each preference category is a small closed enum that knows how it is
//! carried over the wire: the cookie that stores it, the client-hint header
//! that seeds it, and the HTML attribute that renders it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a stored preference value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {category} value: {value}")]
pub struct InvalidPreference {
    pub category: &'static str,
    pub value: String,
}

/// A categorical client preference negotiated through a client hint.
pub trait Preference: Copy + fmt::Display + FromStr + Send + Sync + 'static {
    /// Category name used in logs and errors.
    const CATEGORY: &'static str;

    /// Cookie that persists the resolved value.
    const COOKIE_NAME: &'static str;

    /// Client-hint request header that seeds the value.
    const HINT_HEADER: &'static str;

    /// HTML attribute carrying the value in the page shell.
    const ATTRIBUTE: &'static str;

    /// Value used when the hint is absent or does not signal the alternative.
    fn default_value() -> Self;

    /// Derive a value from the raw hint header value.
    fn from_hint(hint: Option<&str>) -> Self;

    /// Lowercase wire name.
    fn as_str(&self) -> &'static str;
}

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Preference for Theme {
    const CATEGORY: &'static str = "theme";
    const COOKIE_NAME: &'static str = "cogito-theme";
    const HINT_HEADER: &'static str = "Sec-CH-Prefers-Color-Scheme";
    const ATTRIBUTE: &'static str = "data-theme";

    fn default_value() -> Self {
        Theme::Light
    }

    fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some("dark") => Theme::Dark,
            _ => Self::default_value(),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = InvalidPreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(InvalidPreference {
                category: Self::CATEGORY,
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Mobile,
    Desktop,
}

impl Preference for Device {
    const CATEGORY: &'static str = "device";
    const COOKIE_NAME: &'static str = "cogito-device";
    const HINT_HEADER: &'static str = "Sec-CH-UA-Mobile";
    const ATTRIBUTE: &'static str = "data-device";

    fn default_value() -> Self {
        Device::Desktop
    }

    // Structured-header boolean: "?1" is true.
    fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some("?1") => Device::Mobile,
            _ => Self::default_value(),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Device::Mobile => "mobile",
            Device::Desktop => "desktop",
        }
    }
}

impl FromStr for Device {
    type Err = InvalidPreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Device::Mobile),
            "desktop" => Ok(Device::Desktop),
            other => Err(InvalidPreference {
                category: Self::CATEGORY,
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
