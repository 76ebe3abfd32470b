//! Cookie configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Longest accepted cookie lifetime, in days
pub const MAX_COOKIE_AGE_DAYS: i64 = 3650;

/// Lifetimes and flags for the cookies the server sets
#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    /// Lifetime of `cogito-theme` / `cogito-device`
    #[serde(default = "default_preference_max_age_days")]
    pub preference_max_age_days: i64,

    /// Lifetime of `cogito-auth` / `cogito-profile`
    #[serde(default = "default_session_max_age_days")]
    pub session_max_age_days: i64,

    /// Mark cookies `Secure`
    #[serde(default)]
    pub secure: bool,
}

impl CookieConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let in_range = |days: i64| (1..=MAX_COOKIE_AGE_DAYS).contains(&days);
        if !in_range(self.preference_max_age_days) || !in_range(self.session_max_age_days) {
            return Err(ValidationError::InvalidCookieMaxAge);
        }
        Ok(())
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            preference_max_age_days: default_preference_max_age_days(),
            session_max_age_days: default_session_max_age_days(),
            secure: false,
        }
    }
}

fn default_preference_max_age_days() -> i64 {
    365
}

fn default_session_max_age_days() -> i64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_config_defaults() {
        let config = CookieConfig::default();
        assert_eq!(config.preference_max_age_days, 365);
        assert_eq!(config.session_max_age_days, 30);
        assert!(!config.secure);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_max_age_rejected() {
        let config = CookieConfig {
            session_max_age_days: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCookieMaxAge));
    }

    #[test]
    fn test_huge_max_age_rejected() {
        let config = CookieConfig {
            preference_max_age_days: 10_000_000,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCookieMaxAge));

        let config = CookieConfig {
            session_max_age_days: MAX_COOKIE_AGE_DAYS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
