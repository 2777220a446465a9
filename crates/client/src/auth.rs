//! Password + optional TOTP login flow.
//!
//! Mirrors the web client: one POST to `/auth/login/`, with the current
//! one-time code included up front when a multi-factor seed is configured.
//! The returned token authorizes every subsequent GraphQL request. Sessions
//! are never persisted or refreshed; a process gets exactly one login.

use crate::config::Credentials;
use crate::error::{MonarchError, MonarchResult};
use crate::transport::{Transport, AUTH_LOGIN_PATH};
use serde_json::{json, Value};
use totp_rs::{Algorithm, Secret, TOTP};
use tracing::debug;

/// Log in and return the session token.
pub(crate) async fn login(transport: &Transport, credentials: &Credentials) -> MonarchResult<String> {
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(MonarchError::Config(
            "email and password are required".to_string(),
        ));
    }

    let mut body = json!({
        "username": credentials.email,
        "password": credentials.password,
        "trusted_device": true,
        "supports_mfa": true,
    });

    let has_mfa_secret = credentials.mfa_secret.is_some();
    if let Some(seed) = &credentials.mfa_secret {
        body["totp"] = Value::String(current_code(seed)?);
    }

    debug!(email = %credentials.email, mfa = has_mfa_secret, "logging in");
    let response = transport.post_json(AUTH_LOGIN_PATH, &body).await?;
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();

    if !(200..300).contains(&status) {
        let payload: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        if mfa_challenge(&payload) {
            // A code was already supplied and still got bounced.
            if has_mfa_secret {
                return Err(MonarchError::Authentication(
                    "multi-factor code was rejected".to_string(),
                ));
            }
            return Err(MonarchError::MfaRequired);
        }
        let MonarchError::Api { message, .. } = MonarchError::from_response(status, &text) else {
            return Err(MonarchError::Authentication(format!("login failed ({status})")));
        };
        return Err(MonarchError::Authentication(message));
    }

    let payload: Value = serde_json::from_str(&text)?;
    match payload.get("token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(MonarchError::Authentication(
            "login response did not contain a token".to_string(),
        )),
    }
}

/// Whether an error payload is the multi-factor challenge.
fn mfa_challenge(payload: &Value) -> bool {
    if payload.get("error_code").and_then(Value::as_str) == Some("MFA_REQUIRED") {
        return true;
    }
    payload
        .get("detail")
        .and_then(Value::as_str)
        .map(|d| d.to_ascii_lowercase().contains("multi-factor"))
        .unwrap_or(false)
}

/// Compute the current RFC 6238 code for a base32 seed
/// (SHA-1, 6 digits, 30-second step).
fn current_code(seed: &str) -> MonarchResult<String> {
    totp_for_seed(seed)?
        .generate_current()
        .map_err(|e| MonarchError::Config(format!("system clock error: {e}")))
}

fn totp_for_seed(seed: &str) -> MonarchResult<TOTP> {
    let normalized: String = seed
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    let secret = Secret::Encoded(normalized)
        .to_bytes()
        .map_err(|e| MonarchError::Config(format!("invalid MFA secret: {e:?}")))?;
    // Authenticator seeds are often shorter than the 128 bits `TOTP::new`
    // insists on, so skip the length check.
    Ok(TOTP::new_unchecked(Algorithm::SHA1, 6, 1, 30, secret))
}
