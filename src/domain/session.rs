//! Session and profile records.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Identity fields returned by the backend `/profile` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
}

impl Profile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Opaque bearer token issued by the backend.
///
/// The value is kept behind [`SecretString`] so it never ends up in `Debug`
/// output or log lines.
#[derive(Clone)]
pub struct BearerToken(SecretString);

impl BearerToken {
    /// Returns `None` for an empty token.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(SecretString::new(raw)))
        }
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

impl PartialEq for BearerToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

/// An authenticated session: token plus the profile it resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: BearerToken,
    pub profile: Profile,
}

impl Session {
    pub fn new(token: BearerToken, profile: Profile) -> Self {
        Self { token, profile }
    }
}
