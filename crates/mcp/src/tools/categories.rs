// Category tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::session::SessionManager;
use crate::tools::registry::{object_schema, Tool};
use anyhow::Result;
use serde_json::{json, Value};
use std::sync::Arc;

/// All transaction categories configured in the account.
pub struct GetTransactionCategoriesTool {
    session: Arc<SessionManager>,
}

impl GetTransactionCategoriesTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetTransactionCategoriesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_transaction_categories".to_string(),
            description: "List all transaction categories configured in the account.".to_string(),
            input_schema: object_schema(json!({}), &[]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_transaction_categories().await {
            Ok(response) => {
                let categories = response
                    .get("categories")
                    .cloned()
                    .unwrap_or_else(|| json!([]));
                CallToolResult::json(&categories)
            }
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching transaction categories: {e}"
            ))),
        }
    }
}

/// All transaction category groups configured in the account.
pub struct GetTransactionCategoryGroupsTool {
    session: Arc<SessionManager>,
}

impl GetTransactionCategoryGroupsTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl Tool for GetTransactionCategoryGroupsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_transaction_category_groups".to_string(),
            description: "List all transaction category groups configured in the account."
                .to_string(),
            input_schema: object_schema(json!({}), &[]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_transaction_category_groups().await {
            Ok(response) => {
                let groups = response
                    .get("categoryGroups")
                    .cloned()
                    .unwrap_or_else(|| json!([]));
                CallToolResult::json(&groups)
            }
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching transaction category groups: {e}"
            ))),
        }
    }
}
