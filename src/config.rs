//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Pacing configuration for a campaign: a rolling-window send cap plus
/// a minimum gap between consecutive transport attempts.
#[derive(Debug, Clone)]
pub struct PacingConfig {
    /// Maximum sends per rolling window.
    pub max_per_window: u32,
    /// Window over which `max_per_window` is enforced.
    pub window: Duration,
    /// Minimum delay between consecutive transport attempts.
    pub inter_send_delay: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            max_per_window: 5,
            window: Duration::from_secs(24 * 60 * 60), // one day
            inter_send_delay: Duration::from_secs(1),
        }
    }
}

impl PacingConfig {
    /// Validate before dispatch. An invalid config must fail the whole
    /// campaign before any send — no partial sends.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.max_per_window < 1 {
            return Err(ConfigError::InvalidValue {
                key: "max_per_window".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.window.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "window".into(),
                message: "must be non-zero".into(),
            });
        }
        Ok(())
    }
}

/// Retry policy for transient transport failures.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts per contact, including the first.
    pub max_attempts: u32,
    /// Backoff before the first retry; doubles on each further retry.
    pub backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
        }
    }
}

/// SMTP transport configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
}

impl SmtpConfig {
    /// Build config from environment variables.
    /// Returns `None` if `EMAIL_ADDRESS` is not set (dispatch disabled).
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("EMAIL_ADDRESS").ok()?;

        let host =
            std::env::var("EMAIL_SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());

        let port: u16 = std::env::var("EMAIL_SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        let password = SecretString::from(std::env::var("EMAIL_PASSWORD").unwrap_or_default());
        let from_address = std::env::var("EMAIL_FROM_ADDRESS").unwrap_or_else(|_| username.clone());

        Some(Self {
            host,
            port,
            username,
            password,
            from_address,
        })
    }
}

/// SerpAPI search provider configuration.
#[derive(Debug, Clone)]
pub struct SerpApiConfig {
    pub api_key: SecretString,
    pub endpoint: String,
}

impl SerpApiConfig {
    /// Build config from environment variables.
    /// Returns `None` if `SERPAPI_KEY` is not set (the resolver then
    /// degrades to synthetic generation).
    pub fn from_env() -> Option<Self> {
        let api_key = SecretString::from(std::env::var("SERPAPI_KEY").ok()?);
        let endpoint = std::env::var("SERPAPI_ENDPOINT")
            .unwrap_or_else(|_| "https://serpapi.com/search.json".to_string());
        Some(Self { api_key, endpoint })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pacing_is_valid() {
        assert!(PacingConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_per_window_is_invalid() {
        let config = PacingConfig {
            max_per_window: 0,
            ..PacingConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "max_per_window"));
    }

    #[test]
    fn zero_window_is_invalid() {
        let config = PacingConfig {
            window: Duration::ZERO,
            ..PacingConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "window"));
    }
}
