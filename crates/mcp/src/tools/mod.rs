pub mod accounts;
pub mod budgets;
pub mod cashflow;
pub mod categories;
pub mod institutions;
pub mod recurring;
pub mod transactions;

mod dates;
mod registry;

pub use accounts::{
    GetAccountHistoryTool, GetAccountHoldingsTool, GetAccountTypeOptionsTool, GetAccountsTool,
};
pub use budgets::GetBudgetsTool;
pub use cashflow::{GetCashflowSummaryTool, GetCashflowTool};
pub use categories::{GetTransactionCategoriesTool, GetTransactionCategoryGroupsTool};
pub use institutions::GetInstitutionsTool;
pub use recurring::GetRecurringTransactionsTool;
pub use registry::{Tool, ToolRegistry};
pub use transactions::{GetTransactionsSummaryTool, GetTransactionsTool};

use crate::protocol::CallToolResult;
use crate::session::SessionManager;
use monarch_client::MonarchApi;
use std::sync::Arc;

/// Build the full dispatch table: every read-only Monarch Money query this
/// server exposes, backed by the shared session manager.
pub fn default_registry(session: Arc<SessionManager>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(GetAccountsTool::new(session.clone())));
    registry.register(Arc::new(GetAccountHistoryTool::new(session.clone())));
    registry.register(Arc::new(GetAccountHoldingsTool::new(session.clone())));
    registry.register(Arc::new(GetAccountTypeOptionsTool::new(session.clone())));
    registry.register(Arc::new(GetTransactionsTool::new(session.clone())));
    registry.register(Arc::new(GetTransactionsSummaryTool::new(session.clone())));
    registry.register(Arc::new(GetTransactionCategoriesTool::new(session.clone())));
    registry.register(Arc::new(GetTransactionCategoryGroupsTool::new(
        session.clone(),
    )));
    registry.register(Arc::new(GetBudgetsTool::new(session.clone())));
    registry.register(Arc::new(GetRecurringTransactionsTool::new(session.clone())));
    registry.register(Arc::new(GetCashflowTool::new(session.clone())));
    registry.register(Arc::new(GetCashflowSummaryTool::new(session.clone())));
    registry.register(Arc::new(GetInstitutionsTool::new(session)));
    registry
}

/// Get the authenticated handle, or the error result the tool should
/// return when login has failed. Login errors are reported to the caller,
/// never swallowed, and never retried here.
pub(crate) async fn acquire(
    session: &SessionManager,
) -> Result<Arc<dyn MonarchApi>, Box<CallToolResult>> {
    session.get_session().await.map_err(|e| {
        Box::new(CallToolResult::error(format!(
            "Failed to log in to Monarch Money: {e}"
        )))
    })
}
