//! # HTTP Transport
//!
//! The shared client underneath every gateway implementation.
//!
//! ## Token Handling
//! The bearer token is shared mutable state: every outgoing request reads it,
//! and the (out-of-scope) session layer rewrites it after a refresh. A 401
//! response is NOT retried here; it is classified as
//! [`GatewayError::AuthExpired`] and propagated so the session layer can
//! force re-authentication while the cart survives untouched.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use banca_checkout::ports::{GatewayError, GatewayResult};

/// Configuration for the remote API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API, e.g. `https://pos.example.ao/api`.
    pub base_url: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared bearer-token cell.
///
/// Cloned handles point at the same token, so a refresh performed by the
/// session layer is visible to every in-flight client immediately.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    token: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored token (e.g. after login or refresh).
    pub async fn set(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Drops the stored token (e.g. on logout).
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }

    pub async fn get(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

/// JSON/HTTPS client for the remote POS API.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: TokenStore,
}

impl ApiClient {
    /// Builds a client from configuration and a (possibly empty) token store.
    pub fn new(config: &ApiConfig, token: TokenStore) -> GatewayResult<Self> {
        // A trailing slash makes Url::join treat the base as a directory;
        // without it, joining would replace the last path segment.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| GatewayError::Unexpected {
            status: None,
            detail: format!("invalid base URL: {}", e),
        })?;

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Unexpected {
                status: None,
                detail: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(ApiClient {
            http,
            base_url,
            token,
        })
    }

    /// The token store this client reads on every request.
    pub fn token_store(&self) -> &TokenStore {
        &self.token
    }

    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::Unexpected {
                status: None,
                detail: format!("invalid endpoint {}: {}", path, e),
            })
    }

    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> GatewayResult<Value> {
        self.request(Method::GET, path, query, None::<&()>).await
    }

    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> GatewayResult<Value> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> GatewayResult<Value> {
        let url = self.endpoint(path)?;
        debug!(method = %method, url = %url, "api request");

        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.token.get().await {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let payload: Value = response.json().await.unwrap_or(Value::Null);

        if status.is_success() {
            return Ok(payload);
        }
        Err(classify_failure(status, &payload))
    }
}

// =============================================================================
// Error Classification
// =============================================================================

/// Maps a non-success HTTP response to a gateway error.
fn classify_failure(status: StatusCode, body: &Value) -> GatewayError {
    if status == StatusCode::UNAUTHORIZED {
        return GatewayError::AuthExpired;
    }

    if status.is_client_error() {
        let messages = extract_rejection_messages(body);
        if !messages.is_empty() {
            return GatewayError::Rejected { messages };
        }
    }

    GatewayError::Unexpected {
        status: Some(status.as_u16()),
        detail: match body {
            Value::Null => status
                .canonical_reason()
                .unwrap_or("no response body")
                .to_string(),
            other => other.to_string(),
        },
    }
}

/// Pulls human-readable rejection messages out of a structured error body.
///
/// The backend emits Laravel-style payloads: field-keyed `errors` maps of
/// message arrays for validation failures, or a flat `message` / `error`
/// string otherwise. Field messages win when present.
fn extract_rejection_messages(body: &Value) -> Vec<String> {
    let mut messages = Vec::new();

    if let Some(errors) = body.get("errors").and_then(Value::as_object) {
        for field_messages in errors.values() {
            match field_messages {
                Value::Array(list) => {
                    messages.extend(list.iter().filter_map(Value::as_str).map(String::from))
                }
                Value::String(msg) => messages.push(msg.clone()),
                _ => {}
            }
        }
    }

    if messages.is_empty() {
        for key in ["message", "error"] {
            if let Some(msg) = body.get(key).and_then(Value::as_str) {
                messages.push(msg.to_string());
                break;
            }
        }
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = ApiClient::new(
            &ApiConfig {
                base_url: "http://localhost:8000/api".to_string(),
                ..ApiConfig::default()
            },
            TokenStore::new(),
        )
        .unwrap();

        assert_eq!(
            client.endpoint("sales").unwrap().as_str(),
            "http://localhost:8000/api/sales"
        );
        assert_eq!(
            client.endpoint("public/settings").unwrap().as_str(),
            "http://localhost:8000/api/public/settings"
        );
    }

    #[test]
    fn test_invalid_base_url_is_reported() {
        let err = ApiClient::new(
            &ApiConfig {
                base_url: "not a url".to_string(),
                ..ApiConfig::default()
            },
            TokenStore::new(),
        )
        .unwrap_err();
        assert!(matches!(err, GatewayError::Unexpected { status: None, .. }));
    }

    #[tokio::test]
    async fn test_token_store_shared_across_clones() {
        let store = TokenStore::new();
        let client = ApiClient::new(&ApiConfig::default(), store.clone()).unwrap();

        // A refresh performed elsewhere is visible to the client's handle.
        store.set("abc123").await;
        assert_eq!(
            client.token_store().get().await.as_deref(),
            Some("abc123")
        );

        client.token_store().clear().await;
        assert_eq!(store.get().await, None);
    }

    #[test]
    fn test_classify_unauthorized() {
        let err = classify_failure(StatusCode::UNAUTHORIZED, &json!({"message": "expired"}));
        assert_eq!(err, GatewayError::AuthExpired);
    }

    #[test]
    fn test_classify_validation_rejection() {
        let body = json!({
            "message": "The given data was invalid.",
            "errors": {
                "items.0.quantity": ["Estoque insuficiente para Teclado"],
                "paymentMethod": ["Método de pagamento inválido"]
            }
        });
        let err = classify_failure(StatusCode::UNPROCESSABLE_ENTITY, &body);

        match err {
            GatewayError::Rejected { messages } => {
                assert_eq!(messages.len(), 2);
                assert!(messages
                    .iter()
                    .any(|m| m == "Estoque insuficiente para Teclado"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_flat_message_rejection() {
        let err = classify_failure(
            StatusCode::BAD_REQUEST,
            &json!({"error": "Carrinho inválido"}),
        );
        assert_eq!(
            err,
            GatewayError::Rejected {
                messages: vec!["Carrinho inválido".to_string()]
            }
        );
    }

    #[test]
    fn test_classify_server_error_is_unexpected() {
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, &Value::Null);
        assert_eq!(
            err,
            GatewayError::Unexpected {
                status: Some(500),
                detail: "Internal Server Error".to_string()
            }
        );
    }

    #[test]
    fn test_extract_prefers_field_errors_over_flat_message() {
        let body = json!({
            "message": "The given data was invalid.",
            "errors": {"total": ["Total não confere"]}
        });
        assert_eq!(
            extract_rejection_messages(&body),
            vec!["Total não confere".to_string()]
        );
    }
}
