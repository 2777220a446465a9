//! Configuration types for the Monarch Money client.

use std::time::Duration;
use url::Url;

/// Default API host for Monarch Money.
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.monarchmoney.com";

/// Configuration for the Monarch Money client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Monarch Money API.
    pub base_url: Url,
    /// Request timeout applied to every HTTP call.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration with a custom base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        // The constant is a valid URL, so the parse cannot fail.
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid");
        Self::new(base_url)
    }
}

/// Login credentials for a Monarch Money account.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Optional base32 TOTP seed for non-interactive multi-factor login.
    pub mfa_secret: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            mfa_secret: None,
        }
    }

    /// Attach a multi-factor secret seed.
    pub fn with_mfa_secret(mut self, secret: impl Into<String>) -> Self {
        self.mfa_secret = Some(secret.into());
        self
    }
}
