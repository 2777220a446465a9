// Transaction tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::session::SessionManager;
use crate::tools::registry::{date_prop, integer_prop, object_schema, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// With no range given, the upstream serves this many most-recent records.
const DEFAULT_LIMIT: u32 = 100;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[derive(Debug, Deserialize)]
struct GetTransactionsArgs {
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default = "default_limit")]
    limit: u32,
}

/// Lists transactions, optionally filtered by date range.
pub struct GetTransactionsTool {
    session: Arc<SessionManager>,
}

impl GetTransactionsTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetTransactionsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_transactions".to_string(),
            description:
                "List transactions, optionally filtered by date range. Without a range, returns \
                 the 100 most recent transactions."
                    .to_string(),
            input_schema: object_schema(
                json!({
                    "start_date": date_prop("Earliest transaction date"),
                    "end_date": date_prop("Latest transaction date"),
                    "limit": integer_prop(
                        "Maximum number of transactions to return",
                        DEFAULT_LIMIT as i64
                    ),
                }),
                &[],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetTransactionsArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_transactions")?;

        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api
            .get_transactions(args.limit, args.start_date.as_deref(), args.end_date.as_deref())
            .await
        {
            Ok(response) => {
                let transactions = response
                    .pointer("/allTransactions/results")
                    .cloned()
                    .unwrap_or_else(|| json!([]));
                CallToolResult::json(&transactions)
            }
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching transactions: {e}"
            ))),
        }
    }
}

/// Aggregate transaction totals for the whole account.
pub struct GetTransactionsSummaryTool {
    session: Arc<SessionManager>,
}

impl GetTransactionsSummaryTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetTransactionsSummaryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_transactions_summary".to_string(),
            description: "Get aggregate transaction totals (count, sums, income, expenses)."
                .to_string(),
            input_schema: object_schema(json!({}), &[]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_transactions_summary().await {
            Ok(response) => CallToolResult::json(&response),
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching the transactions summary: {e}"
            ))),
        }
    }
}
