//! Request executor with retry and timeouts
//!
//! Provides the HTTP client that handles:
//! - Credential injection and query string building
//! - A per-attempt deadline that cancels the in-flight request
//! - Error classification for retry decisions
//! - Automatic retries with exponential backoff
//! - Response envelope unwrapping

use super::envelope::{error_message, unwrap_envelope};
use crate::config::ClientConfig;
use crate::error::{is_retryable_status, Error, Result};
use crate::types::{JsonValue, QueryParams};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of a single failed attempt
#[derive(Debug)]
enum Failure {
    /// Worth another attempt while the budget lasts
    Retryable {
        status: Option<u16>,
        message: String,
    },
    /// Ends the call immediately
    Fatal(Error),
}

/// Request executor shared by every endpoint method
///
/// Holds only the immutable config and a pooled `reqwest::Client`, so it is
/// cheap to clone and safe to use from concurrent tasks.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpClient {
    /// Create a new executor from a validated config
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build full URL from an endpoint path
    pub fn build_url(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        format!("{}/{endpoint}", self.config.base_url())
    }

    /// Call an endpoint with serializable parameters
    ///
    /// `None` fields are treated as unset; see [`QueryParams::from_serialize`].
    pub async fn execute_with<P, T>(&self, endpoint: &str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let params = QueryParams::from_serialize(params)?;
        self.execute(endpoint, &params).await
    }

    /// Call an endpoint and return its unwrapped `result` payload
    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<T> {
        let url = self.build_url(endpoint);
        let query = params.to_pairs(self.config.api_id(), self.config.affiliate_id());
        let max_retries = self.config.max_retries();
        let mut attempts = 0;

        loop {
            debug!(endpoint, attempt = attempts + 1, "Sending request");

            match self.attempt(endpoint, &url, &query).await {
                Ok(result) => {
                    debug!(endpoint, "Request succeeded");
                    return serde_json::from_value(result).map_err(|e| {
                        Error::parse(endpoint, format!("unexpected result payload: {e}"))
                    });
                }
                Err(Failure::Fatal(err)) => return Err(err),
                Err(Failure::Retryable { status, message }) => {
                    if attempts >= max_retries {
                        return Err(Error::RetriesExhausted {
                            endpoint: endpoint.to_string(),
                            attempts,
                            status,
                            message,
                        });
                    }

                    attempts += 1;
                    let delay = backoff_delay(self.config.retry_delay(), attempts);
                    warn!(
                        "Request to {} failed ({}), retry {}/{} in {:?}",
                        endpoint, message, attempts, max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Perform one round trip under the configured deadline
    async fn attempt(
        &self,
        endpoint: &str,
        url: &str,
        query: &[(String, String)],
    ) -> std::result::Result<JsonValue, Failure> {
        let timeout = self.config.timeout();
        let request = self.client.get(url).query(query);

        let round_trip = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        // Dropping the round trip on expiry aborts the connection.
        let (status, body) = match tokio::time::timeout(timeout, round_trip).await {
            Err(_) => return Err(Failure::Fatal(self.timeout_error(endpoint))),
            Ok(Err(e)) if e.is_timeout() => {
                return Err(Failure::Fatal(self.timeout_error(endpoint)))
            }
            Ok(Err(e)) => {
                return Err(Failure::Retryable {
                    status: None,
                    message: describe_transport_error(e),
                })
            }
            Ok(Ok(parts)) => parts,
        };

        classify(endpoint, status, &body)
    }

    fn timeout_error(&self, endpoint: &str) -> Error {
        Error::Timeout {
            endpoint: endpoint.to_string(),
            timeout_ms: self.config.timeout().as_millis() as u64,
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Map a completed response to its payload or a failure
fn classify(
    endpoint: &str,
    status: StatusCode,
    body: &str,
) -> std::result::Result<JsonValue, Failure> {
    if status.is_success() {
        return unwrap_envelope(endpoint, body).map_err(Failure::Fatal);
    }

    let message = error_message(status, body);
    if is_retryable_status(status.as_u16()) {
        Err(Failure::Retryable {
            status: Some(status.as_u16()),
            message,
        })
    } else {
        Err(Failure::Fatal(Error::HttpStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        }))
    }
}

/// Render a transport error with its causes, minus the URL (it holds credentials)
fn describe_transport_error(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

/// Delay before retry `attempt` (1-indexed): `base * 2^(attempt - 1)`
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    base.saturating_mul(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success() {
        let value = classify("/FloorList", StatusCode::OK, r#"{"result":{"site":[]}}"#).unwrap();
        assert!(value["site"].is_array());
    }

    #[test]
    fn test_classify_retryable() {
        let failure = classify("/ItemList", StatusCode::TOO_MANY_REQUESTS, "").unwrap_err();
        assert!(matches!(
            failure,
            Failure::Retryable { status: Some(429), .. }
        ));
    }

    #[test]
    fn test_classify_terminal() {
        let failure = classify(
            "/ItemList",
            StatusCode::BAD_REQUEST,
            r#"{"result":{"message":"request error"}}"#,
        )
        .unwrap_err();
        match failure {
            Failure::Fatal(Error::HttpStatus { status, message, .. }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "request error");
            }
            other => panic!("expected terminal HTTP failure, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_missing_envelope_is_fatal() {
        let failure = classify("/ItemList", StatusCode::OK, r#"{"items":[]}"#).unwrap_err();
        assert!(matches!(failure, Failure::Fatal(Error::Parse { .. })));
    }
}
