//! Shared test doubles: a recording upstream stub and counting connectors.

use crate::session::{SessionConnector, SessionManager};
use async_trait::async_trait;
use monarch_client::{MonarchApi, MonarchError, MonarchResult};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Upstream stub that records every call (method name + forwarded
/// parameters) and answers each one with a canned response.
pub(crate) struct RecordingApi {
    calls: Mutex<Vec<(String, Value)>>,
    response: Value,
}

impl RecordingApi {
    pub(crate) fn with_response(response: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            response,
        })
    }

    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, method: &str, params: Value) -> MonarchResult<Value> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((method.to_string(), params));
        Ok(self.response.clone())
    }
}

#[async_trait]
impl MonarchApi for RecordingApi {
    async fn get_accounts(&self) -> MonarchResult<Value> {
        self.record("get_accounts", json!({}))
    }

    async fn get_transactions(
        &self,
        limit: u32,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> MonarchResult<Value> {
        self.record(
            "get_transactions",
            json!({ "limit": limit, "start_date": start_date, "end_date": end_date }),
        )
    }

    async fn get_transactions_summary(&self) -> MonarchResult<Value> {
        self.record("get_transactions_summary", json!({}))
    }

    async fn get_account_history(&self, account_id: &str) -> MonarchResult<Value> {
        self.record("get_account_history", json!({ "account_id": account_id }))
    }

    async fn get_account_holdings(&self, account_id: &str) -> MonarchResult<Value> {
        self.record("get_account_holdings", json!({ "account_id": account_id }))
    }

    async fn get_account_type_options(&self) -> MonarchResult<Value> {
        self.record("get_account_type_options", json!({}))
    }

    async fn get_institutions(&self) -> MonarchResult<Value> {
        self.record("get_institutions", json!({}))
    }

    async fn get_budgets(&self, start_date: &str, end_date: &str) -> MonarchResult<Value> {
        self.record(
            "get_budgets",
            json!({ "start_date": start_date, "end_date": end_date }),
        )
    }

    async fn get_recurring_transactions(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> MonarchResult<Value> {
        self.record(
            "get_recurring_transactions",
            json!({ "start_date": start_date, "end_date": end_date }),
        )
    }

    async fn get_transaction_categories(&self) -> MonarchResult<Value> {
        self.record("get_transaction_categories", json!({}))
    }

    async fn get_transaction_category_groups(&self) -> MonarchResult<Value> {
        self.record("get_transaction_category_groups", json!({}))
    }

    async fn get_cashflow(
        &self,
        limit: u32,
        start_date: &str,
        end_date: &str,
    ) -> MonarchResult<Value> {
        self.record(
            "get_cashflow",
            json!({ "limit": limit, "start_date": start_date, "end_date": end_date }),
        )
    }

    async fn get_cashflow_summary(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> MonarchResult<Value> {
        self.record(
            "get_cashflow_summary",
            json!({ "start_date": start_date, "end_date": end_date }),
        )
    }
}

/// Upstream stub whose every query fails with the given message.
pub(crate) struct FailingApi(pub(crate) &'static str);

impl FailingApi {
    fn fail(&self) -> MonarchResult<Value> {
        Err(MonarchError::Api {
            status: 500,
            message: self.0.to_string(),
        })
    }
}

#[async_trait]
impl MonarchApi for FailingApi {
    async fn get_accounts(&self) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_transactions(
        &self,
        _limit: u32,
        _start_date: Option<&str>,
        _end_date: Option<&str>,
    ) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_transactions_summary(&self) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_account_history(&self, _account_id: &str) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_account_holdings(&self, _account_id: &str) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_account_type_options(&self) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_institutions(&self) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_budgets(&self, _start_date: &str, _end_date: &str) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_recurring_transactions(
        &self,
        _start_date: &str,
        _end_date: &str,
    ) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_transaction_categories(&self) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_transaction_category_groups(&self) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_cashflow(
        &self,
        _limit: u32,
        _start_date: &str,
        _end_date: &str,
    ) -> MonarchResult<Value> {
        self.fail()
    }

    async fn get_cashflow_summary(
        &self,
        _start_date: &str,
        _end_date: &str,
    ) -> MonarchResult<Value> {
        self.fail()
    }
}

enum ConnectOutcome {
    Succeed(Arc<dyn MonarchApi>),
    Fail(Box<dyn Fn() -> MonarchError + Send + Sync>),
}

/// Connector that counts how many login attempts it has served.
pub(crate) struct CountingConnector {
    attempts: Arc<AtomicUsize>,
    outcome: ConnectOutcome,
    delay: Option<Duration>,
}

impl CountingConnector {
    pub(crate) fn succeeding(api: Arc<dyn MonarchApi>) -> Self {
        Self {
            attempts: Arc::new(AtomicUsize::new(0)),
            outcome: ConnectOutcome::Succeed(api),
            delay: None,
        }
    }

    pub(crate) fn failing(
        make_error: impl Fn() -> MonarchError + Send + Sync + 'static,
    ) -> Self {
        Self {
            attempts: Arc::new(AtomicUsize::new(0)),
            outcome: ConnectOutcome::Fail(Box::new(make_error)),
            delay: None,
        }
    }

    /// Delay each connect, widening the window for racing first calls.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn attempts_handle(&self) -> Arc<AtomicUsize> {
        self.attempts.clone()
    }
}

#[async_trait]
impl SessionConnector for CountingConnector {
    async fn connect(&self) -> MonarchResult<Arc<dyn MonarchApi>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            ConnectOutcome::Succeed(api) => Ok(api.clone()),
            ConnectOutcome::Fail(make_error) => Err(make_error()),
        }
    }
}

/// Session manager whose first login yields the given stub upstream.
pub(crate) fn session_with(api: Arc<dyn MonarchApi>) -> Arc<SessionManager> {
    Arc::new(SessionManager::with_connector(Box::new(
        CountingConnector::succeeding(api),
    )))
}

/// Session manager whose login always fails with the given error.
pub(crate) fn session_failing(
    make_error: impl Fn() -> MonarchError + Send + Sync + 'static,
) -> Arc<SessionManager> {
    Arc::new(SessionManager::with_connector(Box::new(
        CountingConnector::failing(make_error),
    )))
}
