//! HTTP transport for the Monarch Money API.

use crate::config::ClientConfig;
use crate::error::{MonarchError, MonarchResult};
use reqwest::{header, Client, Response};
use serde_json::Value;
use tracing::debug;

/// Path of the password login endpoint.
pub(crate) const AUTH_LOGIN_PATH: &str = "/auth/login/";
/// Path of the GraphQL endpoint every query goes through.
const GRAPHQL_PATH: &str = "/graphql";

/// Thin wrapper around [`reqwest::Client`] that knows the Monarch Money
/// endpoints and headers. Holds no session state; the auth token is passed
/// in per call so login and queries share one transport.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    client: Client,
    config: ClientConfig,
}

impl Transport {
    pub(crate) fn new(config: ClientConfig) -> MonarchResult<Self> {
        let mut headers = header::HeaderMap::new();
        // The API rejects requests without a client platform header.
        headers.insert(
            header::HeaderName::from_static("client-platform"),
            header::HeaderValue::from_static("web"),
        );

        let client = Client::builder()
            .user_agent(concat!("monarch-client/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    fn build_url(&self, path: &str) -> MonarchResult<url::Url> {
        self.config.base_url.join(path).map_err(MonarchError::from)
    }

    /// POST a JSON body and return the raw response. Used by the login flow,
    /// which needs to inspect non-success statuses itself.
    pub(crate) async fn post_json(&self, path: &str, body: &Value) -> MonarchResult<Response> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");
        let response = self.client.post(url).json(body).send().await?;
        Ok(response)
    }

    /// Execute a GraphQL operation and return its `data` payload unmodified.
    pub(crate) async fn graphql(
        &self,
        token: &str,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> MonarchResult<Value> {
        let url = self.build_url(GRAPHQL_PATH)?;
        debug!(operation, "GraphQL request");

        let body = serde_json::json!({
            "operationName": operation,
            "query": query,
            "variables": variables,
        });

        let response = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, format!("Token {token}"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MonarchError::from_response(status.as_u16(), &body));
        }

        let envelope: Value = response.json().await?;
        if let Some(errors) = envelope.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let message = errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(MonarchError::GraphQl {
                    operation: operation.to_string(),
                    message: if message.is_empty() {
                        errors[0].to_string()
                    } else {
                        message
                    },
                });
            }
        }

        match envelope.get("data") {
            Some(data) if !data.is_null() => Ok(data.clone()),
            _ => Err(MonarchError::GraphQl {
                operation: operation.to_string(),
                message: "response contained no data".to_string(),
            }),
        }
    }
}
