// Cash flow tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::session::SessionManager;
use crate::tools::dates::{current_month, resolve_range, DateRange};
use crate::tools::registry::{date_prop, integer_prop, object_schema, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const DEFAULT_LIMIT: u32 = 100;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[derive(Debug, Deserialize)]
struct GetCashflowArgs {
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default = "default_limit")]
    limit: u32,
}

/// Cash flow broken down by category, category group, and merchant.
/// Defaults to the current calendar month.
pub struct GetCashflowTool {
    session: Arc<SessionManager>,
}

impl GetCashflowTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetCashflowTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_cashflow".to_string(),
            description:
                "Get cash flow data (income, expenses, savings by category, group, and merchant). \
                 Defaults to the current month. Provide both dates or neither."
                    .to_string(),
            input_schema: object_schema(
                json!({
                    "start_date": date_prop("Earliest date to include"),
                    "end_date": date_prop("Latest date to include"),
                    "limit": integer_prop(
                        "Maximum number of records per breakdown",
                        DEFAULT_LIMIT as i64
                    ),
                }),
                &[],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let args: GetCashflowArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_cashflow")?;

        let (start, end) = match resolve_range(args.start_date, args.end_date, current_month) {
            DateRange::Range(start, end) => (start, end),
            DateRange::Invalid(result) => return Ok(result),
        };

        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_cashflow(args.limit, &start, &end).await {
            Ok(response) => CallToolResult::json(&response),
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching cash flow data: {e}"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GetCashflowSummaryArgs {
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

/// Income, expenses, and savings rate for a period. Defaults to the
/// current calendar month.
pub struct GetCashflowSummaryTool {
    session: Arc<SessionManager>,
}

impl GetCashflowSummaryTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetCashflowSummaryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_cashflow_summary".to_string(),
            description:
                "Get the cash flow summary (income, expenses, savings rate). Defaults to the \
                 current month. Provide both dates or neither."
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
        let args: GetCashflowSummaryArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_cashflow_summary")?;

        let (start, end) = match resolve_range(args.start_date, args.end_date, current_month) {
            DateRange::Range(start, end) => (start, end),
            DateRange::Invalid(result) => return Ok(result),
        };

        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_cashflow_summary(&start, &end).await {
            Ok(response) => CallToolResult::json(&response),
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching the cash flow summary: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{session_with, RecordingApi};
    use chrono::{Datelike, NaiveDate};

    #[tokio::test]
    async fn forwards_limit_and_range_unchanged() {
        let api = RecordingApi::with_response(json!({"summary": []}));
        let tool = GetCashflowTool::new(session_with(api.clone()));

        tool.execute(json!({
            "start_date": "2024-02-01",
            "end_date": "2024-02-29",
            "limit": 7
        }))
        .await
        .unwrap();

        assert_eq!(
            api.calls(),
            vec![(
                "get_cashflow".to_string(),
                json!({
                    "limit": 7,
                    "start_date": "2024-02-01",
                    "end_date": "2024-02-29"
                })
            )]
        );
    }

    #[tokio::test]
    async fn defaults_to_the_current_month_and_limit_100() {
        let api = RecordingApi::with_response(json!({"summary": []}));
        let tool = GetCashflowTool::new(session_with(api.clone()));

        tool.execute(json!({})).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1["limit"], 100);
        let start: NaiveDate = calls[0].1["start_date"].as_str().unwrap().parse().unwrap();
        let end: NaiveDate = calls[0].1["end_date"].as_str().unwrap().parse().unwrap();
        assert_eq!(start.day(), 1);
        assert_eq!(start.month(), end.month());
        assert_eq!(start.year(), end.year());
    }

    #[tokio::test]
    async fn summary_rejects_one_sided_ranges() {
        let api = RecordingApi::with_response(json!({}));
        let tool = GetCashflowSummaryTool::new(session_with(api.clone()));

        let result = tool
            .execute(json!({"end_date": "2024-02-29"}))
            .await
            .unwrap();
        assert!(result.failed());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn summary_returns_the_upstream_payload() {
        let api = RecordingApi::with_response(json!({
            "summary": [{"summary": {"sumIncome": 5000.0, "savingsRate": 0.2}}]
        }));
        let tool = GetCashflowSummaryTool::new(session_with(api));

        let result = tool
            .execute(json!({"start_date": "2024-02-01", "end_date": "2024-02-29"}))
            .await
            .unwrap();
        let payload: Value = serde_json::from_str(result.content[0].as_text()).unwrap();
        assert_eq!(payload["summary"][0]["summary"]["savingsRate"], 0.2);
    }
}
