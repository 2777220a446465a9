// Budget tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::session::SessionManager;
use crate::tools::dates::{budget_window, resolve_range, DateRange};
use crate::tools::registry::{date_prop, object_schema, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct GetBudgetsArgs {
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

/// Budgets and actual amounts for a period. Defaults to the window from
/// the start of last month through the end of next month.
pub struct GetBudgetsTool {
    session: Arc<SessionManager>,
}

impl GetBudgetsTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetBudgetsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_budgets".to_string(),
            description:
                "Get budgets and corresponding actual amounts. Without dates, covers last month \
                 through next month. Provide both dates or neither."
                    .to_string(),
            input_schema: object_schema(
                json!({
                    "start_date": date_prop("Earliest month to get budget data for"),
                    "end_date": date_prop("Latest month to get budget data for"),
                }),
                &[],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetBudgetsArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_budgets")?;

        let (start, end) = match resolve_range(args.start_date, args.end_date, budget_window) {
            DateRange::Range(start, end) => (start, end),
            DateRange::Invalid(result) => return Ok(result),
        };

        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_budgets(&start, &end).await {
            Ok(response) => CallToolResult::json(&response),
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching budgets: {e}"
            ))),
        }
    }
}
