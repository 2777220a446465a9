// Recurring transaction tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::session::SessionManager;
use crate::tools::dates::{current_month, resolve_range, DateRange};
use crate::tools::registry::{date_prop, object_schema, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct GetRecurringTransactionsArgs {
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

/// Upcoming recurring transactions for a period. Defaults to the current
/// calendar month.
pub struct GetRecurringTransactionsTool {
    session: Arc<SessionManager>,
}

impl GetRecurringTransactionsTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetRecurringTransactionsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_recurring_transactions".to_string(),
            description:
                "List upcoming recurring transactions (subscriptions, bills) for a period. \
                 Defaults to the current month. Provide both dates or neither."
                    .to_string(),
            input_schema: object_schema(
                json!({
                    "start_date": date_prop("Earliest date to include"),
                    "end_date": date_prop("Latest date to include"),
                }),
                &[],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetRecurringTransactionsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_recurring_transactions")?;

        let (start, end) = match resolve_range(args.start_date, args.end_date, current_month) {
            DateRange::Range(start, end) => (start, end),
            DateRange::Invalid(result) => return Ok(result),
        };

        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_recurring_transactions(&start, &end).await {
            Ok(response) => {
                let items = response
                    .get("recurringTransactionItems")
                    .cloned()
                    .unwrap_or_else(|| json!([]));
                CallToolResult::json(&items)
            }
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching recurring transactions: {e}"
            ))),
        }
    }
}
