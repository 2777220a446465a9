//! Process-wide Monarch Money session.
//!
//! The server performs at most one login per process. The first tool call
//! (or the first few, racing) triggers it, and the outcome, handle or
//! error, is cached for the lifetime of the process. A failed login is never
//! retried: every later call observes the same authentication error until
//! the process restarts.

use crate::config::ServerConfig;
use async_trait::async_trait;
use monarch_client::{MonarchApi, MonarchClient, MonarchError, MonarchResult};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info};

/// Creates the authenticated upstream handle. A trait so tests can
/// substitute a stub upstream for the real login.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    async fn connect(&self) -> MonarchResult<Arc<dyn MonarchApi>>;
}

/// Default connector: logs in to Monarch Money with the configured
/// credentials.
struct MonarchConnector {
    config: ServerConfig,
}

#[async_trait]
impl SessionConnector for MonarchConnector {
    async fn connect(&self) -> MonarchResult<Arc<dyn MonarchApi>> {
        let client_config = self.config.client_config()?;
        let client = MonarchClient::login(client_config, &self.config.credentials).await?;
        Ok(Arc::new(client))
    }
}

/// Holds the single authenticated session handle for the process.
///
/// `tokio::sync::OnceCell` serializes concurrent first calls: exactly one
/// initializer runs, everyone else waits and shares its outcome, and a
/// partially-initialized handle is never observable.
pub struct SessionManager {
    connector: Box<dyn SessionConnector>,
    cell: OnceCell<Result<Arc<dyn MonarchApi>, Arc<MonarchError>>>,
}

impl SessionManager {
    /// Session manager that logs in to Monarch Money on first use.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_connector(Box::new(MonarchConnector { config }))
    }

    /// Session manager backed by a custom connector.
    pub fn with_connector(connector: Box<dyn SessionConnector>) -> Self {
        Self {
            connector,
            cell: OnceCell::new(),
        }
    }

    /// Get the authenticated handle, logging in on the first call.
    ///
    /// Idempotent after first success, and sticky after first failure.
    pub async fn get_session(&self) -> Result<Arc<dyn MonarchApi>, Arc<MonarchError>> {
        let outcome = self
            .cell
            .get_or_init(|| async {
                info!("logging in to Monarch Money");
                match self.connector.connect().await {
                    Ok(api) => {
                        info!("Monarch Money login successful");
                        Ok(api)
                    }
                    Err(e) => {
                        error!(error = %e, "Monarch Money login failed");
                        Err(Arc::new(e))
                    }
                }
            })
            .await;
        outcome.clone()
    }

    /// Whether a login attempt (successful or not) has already happened.
    pub fn attempted(&self) -> bool {
        self.cell.initialized()
    }
}
