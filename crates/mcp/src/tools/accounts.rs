// Account tools: listing, balance history, holdings, type options

use crate::protocol::{CallToolResult, ToolSchema};
use crate::session::SessionManager;
use crate::tools::registry::{object_schema, string_prop, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Lists every account linked to the configured Monarch Money account.
pub struct GetAccountsTool {
    session: Arc<SessionManager>,
}

impl GetAccountsTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetAccountsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_accounts".to_string(),
            description:
                "List all accounts linked to the configured Monarch Money account, with \
                 balances, types, and institutions."
                    .to_string(),
            input_schema: object_schema(json!({}), &[]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_accounts().await {
            Ok(response) => {
                let accounts = response.get("accounts").cloned().unwrap_or_else(|| json!([]));
                CallToolResult::json(&accounts)
            }
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching accounts: {e}"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccountIdArgs {
    account_id: String,
}

/// Daily balance history for one account.
pub struct GetAccountHistoryTool {
    session: Arc<SessionManager>,
}

impl GetAccountHistoryTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetAccountHistoryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_account_history".to_string(),
            description: "Get the daily balance history for a specific account.".to_string(),
            input_schema: object_schema(
                json!({
                    "account_id": string_prop("ID of the account to fetch history for"),
                }),
                &["account_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: AccountIdArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_account_history")?;

        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_account_history(&args.account_id).await {
            Ok(response) => {
                let history = response
                    .get("accountHistory")
                    .cloned()
                    .unwrap_or_else(|| json!([]));
                CallToolResult::json(&history)
            }
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching account history: {e}"
            ))),
        }
    }
}

/// Securities held in a brokerage or similar investment account.
pub struct GetAccountHoldingsTool {
    session: Arc<SessionManager>,
}

impl GetAccountHoldingsTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetAccountHoldingsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_account_holdings".to_string(),
            description: "List the securities (holdings) in an investment account.".to_string(),
            input_schema: object_schema(
                json!({
                    "account_id": string_prop("ID of the investment account"),
                }),
                &["account_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: AccountIdArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_account_holdings")?;

        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_account_holdings(&args.account_id).await {
            Ok(response) => {
                let holdings = response
                    .pointer("/portfolio/aggregateHoldings/edges")
                    .cloned()
                    .unwrap_or_else(|| json!([]));
                CallToolResult::json(&holdings)
            }
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching account holdings: {e}"
            ))),
        }
    }
}

/// All account types and subtypes Monarch Money supports.
pub struct GetAccountTypeOptionsTool {
    session: Arc<SessionManager>,
}

impl GetAccountTypeOptionsTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetAccountTypeOptionsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_account_type_options".to_string(),
            description: "List all account types and their subtypes available in Monarch Money."
                .to_string(),
            input_schema: object_schema(json!({}), &[]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_account_type_options().await {
            Ok(response) => CallToolResult::json(&response),
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching account type options: {e}"
            ))),
        }
    }
}
