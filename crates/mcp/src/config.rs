//! Server configuration, read once from the environment at startup.

use anyhow::{bail, Context, Result};
use monarch_client::{ClientConfig, Credentials, MonarchResult};
use std::time::Duration;
use url::Url;

/// Environment variable holding the account email.
pub const ENV_EMAIL: &str = "MONARCH_EMAIL";
/// Environment variable holding the account password.
pub const ENV_PASSWORD: &str = "MONARCH_PASSWORD";
/// Optional base32 TOTP seed for non-interactive multi-factor login.
pub const ENV_MFA_SECRET: &str = "MONARCH_MFA_SECRET";
/// Optional API base URL override, mainly for testing against a stub.
pub const ENV_BASE_URL: &str = "MONARCH_BASE_URL";
/// Optional request timeout override, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "MONARCH_TIMEOUT_SECS";

/// Configuration for the Monarch MCP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Login credentials for the upstream account.
    pub credentials: Credentials,
    /// API base URL override; `None` uses the production API.
    pub base_url: Option<String>,
    /// Request timeout override in seconds; `None` uses the client default.
    pub timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// Fails when email or password is missing. Empty values count as
    /// missing, matching how a blank line in a `.env` file behaves.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let Some(email) = non_empty(ENV_EMAIL) else {
            bail!("{ENV_EMAIL} is required");
        };
        let Some(password) = non_empty(ENV_PASSWORD) else {
            bail!("{ENV_PASSWORD} is required");
        };

        let mut credentials = Credentials::new(email, password);
        if let Some(secret) = non_empty(ENV_MFA_SECRET) {
            credentials = credentials.with_mfa_secret(secret);
        }

        let timeout_secs = non_empty(ENV_TIMEOUT_SECS)
            .map(|v| {
                v.parse::<u64>()
                    .with_context(|| format!("{ENV_TIMEOUT_SECS} must be an integer, got {v:?}"))
            })
            .transpose()?;

        Ok(Self {
            credentials,
            base_url: non_empty(ENV_BASE_URL),
            timeout_secs,
        })
    }

    /// Build the client configuration this server config describes.
    pub(crate) fn client_config(&self) -> MonarchResult<ClientConfig> {
        let mut config = match &self.base_url {
            Some(base) => ClientConfig::new(Url::parse(base)?),
            None => ClientConfig::default(),
        };
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
