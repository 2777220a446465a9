// Tool trait and the fixed name-to-handler dispatch table

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A remotely invocable tool: a schema plus a single-step handler.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// The schema advertised through `tools/list`.
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments.
    ///
    /// `Err` means the arguments could not even be interpreted (mapped to a
    /// JSON-RPC invalid-params error); failures of the upstream query come
    /// back as `Ok` results with `is_error` set, carrying the upstream
    /// error text.
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Fixed mapping from tool name to handler. Built once at startup; the
/// operation set never changes while the server runs.
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool under the name its schema declares.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        self.tools.insert(schema.name, tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// All tool schemas, in name order.
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// JSON schema helpers shared by the tool modules.

pub(crate) fn object_schema(properties: serde_json::Value, required: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

pub(crate) fn string_prop(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description,
    })
}

pub(crate) fn date_prop(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "pattern": "^\\d{4}-\\d{2}-\\d{2}$",
        "description": format!("{description} ('YYYY-MM-DD')"),
    })
}

pub(crate) fn integer_prop(description: &str, default: i64) -> serde_json::Value {
    serde_json::json!({
        "type": "integer",
        "description": description,
        "default": default,
    })
}
