//! # Monarch Money Client
//!
//! Async Rust client for the Monarch Money GraphQL API.
//!
//! The client logs in once with email/password (plus a time-based one-time
//! code when the account has multi-factor authentication enabled) and then
//! exposes one method per read-only query: accounts, transactions, budgets,
//! cashflow, holdings, institutions, recurring transactions, and categories.
//!
//! ```rust,no_run
//! use monarch_client::{ClientConfig, Credentials, MonarchApi, MonarchClient};
//!
//! # async fn example() -> monarch_client::MonarchResult<()> {
//! let credentials = Credentials::new("user@example.com", "hunter2");
//! let client = MonarchClient::login(ClientConfig::default(), &credentials).await?;
//!
//! let accounts = client.get_accounts().await?;
//! println!("{accounts}");
//! # Ok(())
//! # }
//! ```
//!
//! Query responses are returned as raw [`serde_json::Value`] trees, exactly
//! as the API sent them. The caller decides which keys to extract.

mod auth;
mod client;
mod config;
mod error;
mod queries;
mod transport;

pub use client::{MonarchApi, MonarchClient};
pub use config::{ClientConfig, Credentials};
pub use error::{MonarchError, MonarchResult};
