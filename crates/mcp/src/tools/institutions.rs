// Institutions tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::session::SessionManager;
use crate::tools::registry::{object_schema, Tool};
use anyhow::Result;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;

/// Financial institutions linked to the account.
///
/// The upstream query returns one entry per credential; several
/// credentials can point at the same institution, so the list is
/// de-duplicated by institution id before returning.
pub struct GetInstitutionsTool {
    session: Arc<SessionManager>,
}

impl GetInstitutionsTool {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }

    fn unique_institutions(response: &Value) -> Vec<Value> {
        let mut seen = HashSet::new();
        let mut institutions = Vec::new();
        for credential in response
            .get("credentials")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            let Some(institution) = credential.get("institution") else {
                continue;
            };
            if institution.is_null() {
                continue;
            }
            let id = institution
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if seen.insert(id) {
                institutions.push(institution.clone());
            }
        }
        institutions
    }
}

#[async_trait::async_trait]
impl Tool for GetInstitutionsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_institutions".to_string(),
            description: "List the financial institutions linked to the account.".to_string(),
            input_schema: object_schema(json!({}), &[]),
        }
    }

    async fn execute(&self, _arguments: Value) -> Result<CallToolResult> {
        let api = match super::acquire(&self.session).await {
            Ok(api) => api,
            Err(result) => return Ok(*result),
        };
        match api.get_institutions().await {
            Ok(response) => CallToolResult::json(&Self::unique_institutions(&response)),
            Err(e) => Ok(CallToolResult::error(format!(
                "An error occurred while fetching institutions: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{session_with, RecordingApi};

    #[tokio::test]
    async fn institutions_are_deduplicated_by_id() {
        let api = RecordingApi::with_response(json!({
            "credentials": [
                {"id": "cr1", "institution": {"id": "i1", "name": "First Bank"}},
                {"id": "cr2", "institution": {"id": "i1", "name": "First Bank"}},
                {"id": "cr3", "institution": {"id": "i2", "name": "Brokerage"}},
                {"id": "cr4", "institution": null},
            ]
        }));
        let tool = GetInstitutionsTool::new(session_with(api.clone()));

        let result = tool.execute(json!({})).await.unwrap();
        assert!(!result.failed());
        let payload: Value = serde_json::from_str(result.content[0].as_text()).unwrap();
        let names: Vec<&str> = payload
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["First Bank", "Brokerage"]);
    }

    #[tokio::test]
    async fn missing_credentials_key_yields_an_empty_list() {
        let api = RecordingApi::with_response(json!({}));
        let tool = GetInstitutionsTool::new(session_with(api));

        let result = tool.execute(json!({})).await.unwrap();
        let payload: Value = serde_json::from_str(result.content[0].as_text()).unwrap();
        assert_eq!(payload, json!([]));
    }
}
