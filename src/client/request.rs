//! Authenticated Evolution API client with retry
//!
//! Every public call returns a [`RequestOutcome`]; transport failures are
//! classified and, when transient, retried up to `retry_attempts` times with
//! a fixed `retry_delay_ms` pause. Nothing escapes as a panic or raw error.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde_json::{Value, json};

use crate::error::Result;

use super::config::ClientConfig;
use super::error::{ErrorKind, RequestError, RequestOutcome, classify};
use super::transport::{HttpMethod, HttpTransport, ReqwestTransport, TransportRequest};

/// Header carrying the static API key
pub const API_KEY_HEADER: &str = "apikey";

pub struct RequestClient {
    transport: Arc<dyn HttpTransport>,
    config: ClientConfig,
    base_url: String,
    requests: AtomicU64,
}

impl RequestClient {
    /// Create a client backed by reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over an explicit transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, transport))
    }

    /// Create a client that may lack an API key.
    ///
    /// Requests fail with an authentication error before reaching the
    /// transport until a key is configured.
    pub fn offline(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate_connection()?;
        Ok(Self::assemble(config, transport))
    }

    fn assemble(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            transport,
            config,
            base_url,
            requests: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, path: &str, params: Option<Value>) -> RequestOutcome {
        self.request(HttpMethod::Get, path, params).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> RequestOutcome {
        self.request(HttpMethod::Post, path, body).await
    }

    pub async fn put(&self, path: &str, body: Option<Value>) -> RequestOutcome {
        self.request(HttpMethod::Put, path, body).await
    }

    pub async fn delete(&self, path: &str, body: Option<Value>) -> RequestOutcome {
        self.request(HttpMethod::Delete, path, body).await
    }

    /// Send one logical request, retrying transient failures
    pub async fn request(&self, method: HttpMethod, path: &str, body: Option<Value>) -> RequestOutcome {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.attempt(method, path, body.as_ref(), attempt).await {
                Ok(response) => return Ok(response),
                Err(error) if error.is_retryable() && attempt <= self.config.retry_attempts => {
                    tracing::warn!(
                        method = %method,
                        path,
                        attempt,
                        max_attempts = self.config.retry_attempts + 1,
                        kind = %error.kind,
                        status = ?error.status,
                        delay_ms = self.config.retry_delay_ms,
                        "Retrying request after transient failure"
                    );
                    tokio::time::sleep(self.config.retry_delay()).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn attempt(&self, method: HttpMethod, path: &str, body: Option<&Value>, attempt: u32) -> RequestOutcome {
        let request = self.build_request(method, path, body)?;
        let request_id = self.requests.fetch_add(1, Ordering::Relaxed) + 1;

        if self.config.logging {
            tracing::info!(request_id, method = %method, url = %request.url, attempt, "Sending request");
        }

        let started = Instant::now();
        let outcome = match tokio::time::timeout(self.config.timeout(), self.transport.send(request)).await {
            Ok(result) => classify(result),
            Err(_) => Err(RequestError::timeout(self.config.timeout_ms)),
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if self.config.logging {
            match &outcome {
                Ok(response) => {
                    tracing::info!(request_id, status = response.status, elapsed_ms, "Received response")
                }
                Err(error) => tracing::info!(
                    request_id,
                    kind = %error.kind,
                    status = ?error.status,
                    elapsed_ms,
                    message = %error.message,
                    "Request failed"
                ),
            }
        }

        outcome
    }

    /// Build the wire request: URL, auth headers, query or JSON body
    fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> std::result::Result<TransportRequest, RequestError> {
        if self.config.api_key.trim().is_empty() {
            return Err(RequestError::new(ErrorKind::Authentication, "No API key configured").with_code("MISSING_API_KEY"));
        }
        let (query, body) = match method {
            HttpMethod::Get => (query_pairs(body)?, None),
            HttpMethod::Post | HttpMethod::Put => (Vec::new(), Some(body.cloned().unwrap_or_else(|| json!({})))),
            HttpMethod::Delete => (Vec::new(), body.filter(|b| !is_empty_body(b)).cloned()),
        };

        Ok(TransportRequest {
            method,
            url: self.url_for(path),
            headers: vec![
                (API_KEY_HEADER.to_string(), self.config.api_key.clone()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            query,
            body,
            timeout: self.config.timeout(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Number of underlying attempts made by this client
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Flatten an object body into query-string pairs
fn query_pairs(body: Option<&Value>) -> std::result::Result<Vec<(String, String)>, RequestError> {
    match body {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), value)
            })
            .collect()),
        Some(other) => Err(RequestError::new(
            ErrorKind::Unknown,
            format!("GET parameters must be a JSON object, got {}", other),
        )
        .with_code("INVALID_REQUEST")),
    }
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("base_url", &self.base_url)
            .field("retry_attempts", &self.config.retry_attempts)
            .field("requests", &self.request_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transport::{MockTransport, TransportError};
    use std::time::Duration;

    fn config(retries: u32) -> ClientConfig {
        ClientConfig::new("https://evo.example.com/", "test-key").with_retry(retries, 10)
    }

    fn client(mock: MockTransport, retries: u32) -> (RequestClient, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let client = RequestClient::with_transport(config(retries), mock.clone()).unwrap();
        (client, mock)
    }

    fn reset() -> TransportError {
        TransportError::Connect("connection reset by peer".to_string())
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = RequestClient::with_transport(
            ClientConfig::new("https://evo.example.com", ""),
            Arc::new(MockTransport::new()),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_attaches_auth_and_content_type() {
        let (client, mock) = client(MockTransport::new().with_response(200, json!({})), 0);
        client.get("/instance/fetchInstances", None).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.url, "https://evo.example.com/instance/fetchInstances");
        assert!(request.headers.contains(&("apikey".to_string(), "test-key".to_string())));
        assert!(
            request
                .headers
                .contains(&("Content-Type".to_string(), "application/json".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_sends_query_params() {
        let (client, mock) = client(MockTransport::new().with_response(200, json!([])), 0);
        client
            .get("instance/fetchInstances", Some(json!({"instanceName": "demo", "limit": 5, "skip": null})))
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert!(request.body.is_none());
        assert!(request.query.contains(&("instanceName".to_string(), "demo".to_string())));
        assert!(request.query.contains(&("limit".to_string(), "5".to_string())));
        assert_eq!(request.query.len(), 2);
    }

    #[tokio::test]
    async fn test_get_with_non_object_params_is_unknown() {
        let (client, mock) = client(MockTransport::new(), 3);
        let err = client.get("x", Some(json!([1, 2]))).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(mock.call_count(), 0);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_offline_client_refuses_to_send_without_key() {
        let mock = Arc::new(MockTransport::new().with_response(200, json!({})));
        let client = RequestClient::offline(ClientConfig::new("https://evo.example.com", ""), mock.clone()).unwrap();

        let err = client.get("instance/fetchInstances", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.code.as_deref(), Some("MISSING_API_KEY"));
        assert_eq!(mock.call_count(), 0);
        assert_eq!(client.request_count(), 0);
    }

    #[test]
    fn test_offline_client_still_checks_url() {
        let result = RequestClient::offline(ClientConfig::new("ftp://evo.example.com", ""), Arc::new(MockTransport::new()));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let (client, mock) = client(MockTransport::new().with_response(201, json!({"key": {"id": "1"}})), 0);
        let response = client
            .post("/message/sendText/demo", Some(json!({"number": "5511", "text": "hi"})))
            .await
            .unwrap();

        assert_eq!(response.status, 201);
        let request = mock.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body, Some(json!({"number": "5511", "text": "hi"})));
    }

    #[tokio::test]
    async fn test_post_without_body_sends_empty_object() {
        let (client, mock) = client(MockTransport::new().with_response(200, json!({})), 0);
        client.post("/instance/restart/demo", None).await.unwrap();
        assert_eq!(mock.last_request().unwrap().body, Some(json!({})));
    }

    #[tokio::test]
    async fn test_delete_omits_empty_body() {
        let (client, mock) = client(
            MockTransport::new()
                .with_response(200, json!({}))
                .with_response(200, json!({})),
            0,
        );
        client.delete("/instance/delete/demo", Some(json!({}))).await.unwrap();
        assert!(mock.last_request().unwrap().body.is_none());

        client
            .delete("/chat/deleteMessageForEveryone/demo", Some(json!({"id": "ABC"})))
            .await
            .unwrap();
        assert_eq!(mock.last_request().unwrap().body, Some(json!({"id": "ABC"})));
    }

    #[tokio::test]
    async fn test_recovers_after_network_failures() {
        let (client, mock) = client(
            MockTransport::new()
                .with_error(reset())
                .with_error(reset())
                .with_error(reset())
                .with_response(200, json!({"ok": true})),
            3,
        );

        let response = client.get("/instance/connectionState/demo", None).await.unwrap();
        assert_eq!(response.body, json!({"ok": true}));
        assert_eq!(mock.call_count(), 4);
        assert_eq!(client.request_count(), 4);
    }

    #[tokio::test]
    async fn test_succeeds_on_attempt_after_fewer_failures() {
        let (client, mock) = client(
            MockTransport::new()
                .with_error(reset())
                .with_response(200, json!({"ok": true})),
            3,
        );

        assert!(client.get("x", None).await.is_ok());
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_retry_budget() {
        let mut mock = MockTransport::new();
        for _ in 0..5 {
            mock = mock.with_error(reset());
        }
        let (client, mock) = client(mock, 2);

        let err = client.get("x", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_zero_retries_makes_single_attempt() {
        let (client, mock) = client(MockTransport::new().with_error(reset()), 0);
        assert!(client.get("x", None).await.is_err());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_retries_server_errors() {
        let (client, mock) = client(
            MockTransport::new()
                .with_response(502, json!({"error": "Bad Gateway"}))
                .with_response(200, json!({"ok": true})),
            3,
        );
        assert!(client.get("x", None).await.is_ok());
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_returns_last_classified_error() {
        let (client, _mock) = client(
            MockTransport::new()
                .with_error(reset())
                .with_response(503, json!({"message": "maintenance"})),
            1,
        );
        let err = client.get("x", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Api);
        assert_eq!(err.status, Some(503));
        assert!(err.message.contains("maintenance"));
    }

    #[tokio::test]
    async fn test_terminal_statuses_never_retry() {
        for status in [400, 401, 403, 404, 409, 422, 429] {
            let (client, mock) = client(
                MockTransport::new()
                    .with_response(status, json!({"message": "nope"}))
                    .with_response(200, json!({})),
                3,
            );
            let err = client.post("x", None).await.unwrap_err();
            assert_eq!(err.status, Some(status));
            assert_eq!(mock.call_count(), 1, "status {} was retried", status);
        }
    }

    #[tokio::test]
    async fn test_per_attempt_timeout() {
        let mock = MockTransport::new()
            .with_delay(Duration::from_millis(200))
            .with_response(200, json!({}))
            .with_response(200, json!({}));
        let mock = Arc::new(mock);
        let config = ClientConfig::new("https://evo.example.com", "k")
            .with_timeout(20)
            .with_retry(1, 5);
        let client = RequestClient::with_transport(config, mock.clone()).unwrap();

        let err = client.get("x", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_logging_enabled_does_not_change_outcome() {
        let mock = Arc::new(MockTransport::new().with_response(200, json!({"ok": true})));
        let client = RequestClient::with_transport(config(0).with_logging(true), mock).unwrap();
        assert!(client.get("x", None).await.is_ok());
    }

    #[test]
    fn test_debug_hides_key() {
        let (client, _) = client(MockTransport::new(), 0);
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("RequestClient"));
        assert!(!debug_str.contains("test-key"));
    }

    #[test]
    fn test_base_url_normalized() {
        let (client, _) = client(MockTransport::new(), 0);
        assert_eq!(client.base_url(), "https://evo.example.com");
        assert_eq!(client.url_for("message/sendText/a"), "https://evo.example.com/message/sendText/a");
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RequestClient>();
    }
}
