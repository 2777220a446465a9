//! Authenticated Monarch Money client and the [`MonarchApi`] seam.

use crate::auth;
use crate::config::{ClientConfig, Credentials};
use crate::error::MonarchResult;
use crate::queries;
use crate::transport::Transport;
use async_trait::async_trait;
use serde_json::{json, Map, Value};

/// The read-only query surface of the Monarch Money API.
///
/// Every method forwards its parameters to exactly one upstream GraphQL
/// query and returns the `data` payload as-is. The trait exists so
/// consumers can substitute a stub upstream in tests.
#[async_trait]
pub trait MonarchApi: Send + Sync {
    /// All accounts linked to the Monarch Money account.
    async fn get_accounts(&self) -> MonarchResult<Value>;

    /// Transactions, newest first, optionally filtered by date range.
    async fn get_transactions(
        &self,
        limit: u32,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> MonarchResult<Value>;

    /// Aggregate transaction totals across the whole account.
    async fn get_transactions_summary(&self) -> MonarchResult<Value>;

    /// Daily balance history for one account.
    async fn get_account_history(&self, account_id: &str) -> MonarchResult<Value>;

    /// Securities held in one investment account.
    async fn get_account_holdings(&self, account_id: &str) -> MonarchResult<Value>;

    /// Available account types and subtypes.
    async fn get_account_type_options(&self) -> MonarchResult<Value>;

    /// Linked credentials and their institutions.
    async fn get_institutions(&self) -> MonarchResult<Value>;

    /// Budgets and actuals for a date window.
    async fn get_budgets(&self, start_date: &str, end_date: &str) -> MonarchResult<Value>;

    /// Upcoming recurring transaction items in a date window.
    async fn get_recurring_transactions(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> MonarchResult<Value>;

    /// All transaction categories.
    async fn get_transaction_categories(&self) -> MonarchResult<Value>;

    /// All transaction category groups.
    async fn get_transaction_category_groups(&self) -> MonarchResult<Value>;

    /// Cash flow broken down by category, group, and merchant.
    async fn get_cashflow(
        &self,
        limit: u32,
        start_date: &str,
        end_date: &str,
    ) -> MonarchResult<Value>;

    /// Income/expense/savings-rate summary for a date window.
    async fn get_cashflow_summary(&self, start_date: &str, end_date: &str)
        -> MonarchResult<Value>;
}

impl std::fmt::Debug for dyn MonarchApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn MonarchApi")
    }
}

/// Authenticated client for the Monarch Money GraphQL API.
///
/// Constructed through [`MonarchClient::login`]; the session token obtained
/// there is held for the lifetime of the client and never refreshed.
pub struct MonarchClient {
    transport: Transport,
    token: String,
}

impl MonarchClient {
    /// Log in with the given credentials and return an authenticated client.
    ///
    /// When the account requires multi-factor authentication, the current
    /// one-time code is computed from `credentials.mfa_secret`; without a
    /// seed the login fails with [`MonarchError::MfaRequired`].
    ///
    /// [`MonarchError::MfaRequired`]: crate::MonarchError::MfaRequired
    pub async fn login(config: ClientConfig, credentials: &Credentials) -> MonarchResult<Self> {
        let transport = Transport::new(config)?;
        let token = auth::login(&transport, credentials).await?;
        Ok(Self { transport, token })
    }

    async fn query(&self, operation: &str, document: &str, variables: Value) -> MonarchResult<Value> {
        self.transport
            .graphql(&self.token, operation, document, variables)
            .await
    }
}

/// Build the `TransactionFilterInput` value shared by the transaction and
/// cash flow queries, leaving unset dates out entirely.
fn transaction_filters(start_date: Option<&str>, end_date: Option<&str>) -> Value {
    let mut filters = Map::new();
    filters.insert("search".to_string(), Value::String(String::new()));
    filters.insert("categories".to_string(), Value::Array(vec![]));
    filters.insert("accounts".to_string(), Value::Array(vec![]));
    filters.insert("tags".to_string(), Value::Array(vec![]));
    if let Some(start) = start_date {
        filters.insert("startDate".to_string(), Value::String(start.to_string()));
    }
    if let Some(end) = end_date {
        filters.insert("endDate".to_string(), Value::String(end.to_string()));
    }
    Value::Object(filters)
}

#[async_trait]
impl MonarchApi for MonarchClient {
    async fn get_accounts(&self) -> MonarchResult<Value> {
        self.query("GetAccounts", queries::GET_ACCOUNTS, json!({})).await
    }

    async fn get_transactions(
        &self,
        limit: u32,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> MonarchResult<Value> {
        let variables = json!({
            "offset": 0,
            "limit": limit,
            "orderBy": "date",
            "filters": transaction_filters(start_date, end_date),
        });
        self.query("GetTransactionsList", queries::GET_TRANSACTIONS, variables)
            .await
    }

    async fn get_transactions_summary(&self) -> MonarchResult<Value> {
        self.query(
            "GetTransactionsPage",
            queries::GET_TRANSACTIONS_SUMMARY,
            json!({}),
        )
        .await
    }

    async fn get_account_history(&self, account_id: &str) -> MonarchResult<Value> {
        self.query(
            "AccountDetails_getAccount",
            queries::GET_ACCOUNT_HISTORY,
            json!({ "id": account_id }),
        )
        .await
    }

    async fn get_account_holdings(&self, account_id: &str) -> MonarchResult<Value> {
        self.query(
            "Web_GetHoldings",
            queries::GET_ACCOUNT_HOLDINGS,
            json!({ "input": { "accountIds": [account_id] } }),
        )
        .await
    }

    async fn get_account_type_options(&self) -> MonarchResult<Value> {
        self.query(
            "GetAccountTypeOptions",
            queries::GET_ACCOUNT_TYPE_OPTIONS,
            json!({}),
        )
        .await
    }

    async fn get_institutions(&self) -> MonarchResult<Value> {
        self.query(
            "Web_GetInstitutionSettings",
            queries::GET_INSTITUTIONS,
            json!({}),
        )
        .await
    }

    async fn get_budgets(&self, start_date: &str, end_date: &str) -> MonarchResult<Value> {
        self.query(
            "GetJointPlanningData",
            queries::GET_BUDGETS,
            json!({ "startDate": start_date, "endDate": end_date }),
        )
        .await
    }

    async fn get_recurring_transactions(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> MonarchResult<Value> {
        self.query(
            "Web_GetUpcomingRecurringTransactionItems",
            queries::GET_RECURRING_TRANSACTIONS,
            json!({ "startDate": start_date, "endDate": end_date, "filters": {} }),
        )
        .await
    }

    async fn get_transaction_categories(&self) -> MonarchResult<Value> {
        self.query("GetCategories", queries::GET_TRANSACTION_CATEGORIES, json!({}))
            .await
    }

    async fn get_transaction_category_groups(&self) -> MonarchResult<Value> {
        self.query(
            "ManageGetCategoryGroups",
            queries::GET_TRANSACTION_CATEGORY_GROUPS,
            json!({}),
        )
        .await
    }

    async fn get_cashflow(
        &self,
        limit: u32,
        start_date: &str,
        end_date: &str,
    ) -> MonarchResult<Value> {
        let mut filters = transaction_filters(Some(start_date), Some(end_date));
        if let Some(map) = filters.as_object_mut() {
            map.insert("limit".to_string(), json!(limit));
        }
        self.query(
            "Web_GetCashFlowPage",
            queries::GET_CASHFLOW,
            json!({ "filters": filters }),
        )
        .await
    }

    async fn get_cashflow_summary(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> MonarchResult<Value> {
        self.query(
            "Web_GetCashFlowSummary",
            queries::GET_CASHFLOW_SUMMARY,
            json!({ "filters": transaction_filters(Some(start_date), Some(end_date)) }),
        )
        .await
    }
}
