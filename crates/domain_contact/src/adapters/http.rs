//! HTTP RPC Adapter
//!
//! Implements `RpcTransport` over HTTP: each operation is a `POST` of the
//! request document as JSON to `{endpoint}/{Operation}`, answered with the
//! response document as JSON.
//!
//! # Configuration
//!
//! ```rust,ignore
//! let transport = HttpRpcTransport::new(HttpRpcConfig {
//!     endpoint: "https://rpc.example.com/v3".to_string(),
//!     ..Default::default()
//! })?;
//! ```
//!
//! # Error Handling
//!
//! HTTP failures are mapped to `PortError` variants:
//! - 401/403 -> `PortError::Unauthorized`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Other non-2xx -> `PortError::Internal`
//! - Body is not JSON -> `PortError::Transformation`
//! - Timeouts -> `PortError::Timeout`
//! - Refused or unresolvable -> `PortError::Connection`
//!
//! Nothing is retried. A failed call is simply not repeated.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{StatusCode, Url};
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError};

use crate::ports::RpcTransport;
use crate::rpc::RpcOperation;

/// Seconds to wait before retrying when a 429 carries no usable header
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpRpcConfig {
    /// Base URL of the service, without the operation name
    pub endpoint: String,

    /// Upper bound for a whole call, connect included
    pub timeout: Duration,

    pub user_agent: String,
}

impl Default for HttpRpcConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout: Duration::from_secs(5),
            user_agent: concat!("checkout-mailing-list/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// `RpcTransport` backed by a pooled reqwest client
#[derive(Debug, Clone)]
pub struct HttpRpcTransport {
    endpoint: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpRpcTransport {
    /// Creates the transport
    ///
    /// # Errors
    ///
    /// Returns `PortError::Validation` if the endpoint is not an http(s)
    /// URL, or `PortError::Internal` if the HTTP client cannot be built.
    pub fn new(config: HttpRpcConfig) -> Result<Self, PortError> {
        let endpoint = Url::parse(config.endpoint.trim_end_matches('/'))
            .map_err(|e| PortError::validation_field(format!("invalid endpoint: {}", e), "endpoint"))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(PortError::validation_field(
                format!("unsupported endpoint scheme: {}", endpoint.scheme()),
                "endpoint",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| PortError::Internal {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            endpoint,
            timeout: config.timeout,
            client,
        })
    }

    fn url_for(&self, operation: RpcOperation) -> String {
        format!(
            "{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            operation.as_str()
        )
    }

    fn map_request_error(&self, operation: RpcOperation, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else if error.is_connect() {
            PortError::Connection {
                message: format!("cannot reach mailing-list service for {}", operation),
                source: Some(Box::new(error)),
            }
        } else {
            PortError::Internal {
                message: format!("{} request failed", operation),
                source: Some(Box::new(error)),
            }
        }
    }
}

/// Maps a non-success HTTP status onto a port error
fn map_status(operation: RpcOperation, status: StatusCode, retry_after: Option<u64>) -> PortError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("{} refused with HTTP {}", operation, status.as_u16()),
        },
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: format!("mailing-list service (HTTP {})", s.as_u16()),
        },
        s => PortError::internal(format!("{} answered with HTTP {}", operation, s.as_u16())),
    }
}

impl DomainPort for HttpRpcTransport {}

#[async_trait]
impl RpcTransport for HttpRpcTransport {
    #[instrument(skip(self, request), fields(operation = %operation))]
    async fn invoke(
        &self,
        operation: RpcOperation,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, PortError> {
        let started = Instant::now();

        let response = self
            .client
            .post(self.url_for(operation))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_request_error(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse().ok());
            return Err(map_status(operation, status, retry_after));
        }

        let body = response.json::<serde_json::Value>().await.map_err(|e| {
            if e.is_timeout() {
                self.map_request_error(operation, e)
            } else {
                PortError::transformation(format!("{} response is not JSON: {}", operation, e))
            }
        })?;

        debug!(latency_ms = started.elapsed().as_millis() as u64, "RPC call completed");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_endpoint() {
        let result = HttpRpcTransport::new(HttpRpcConfig {
            endpoint: "ftp://example.com".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(PortError::Validation { .. })));
    }

    #[test]
    fn test_rejects_empty_endpoint() {
        assert!(HttpRpcTransport::new(HttpRpcConfig::default()).is_err());
    }

    #[test]
    fn test_operation_url() {
        let transport = HttpRpcTransport::new(HttpRpcConfig {
            endpoint: "https://rpc.example.com/v3/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            transport.url_for(RpcOperation::GetMailingLists),
            "https://rpc.example.com/v3/GetMailingLists"
        );
    }

    #[test]
    fn test_status_mapping() {
        let op = RpcOperation::CreateEmailAddress;
        assert!(matches!(map_status(op, StatusCode::FORBIDDEN, None), PortError::Unauthorized { .. }));
        assert!(matches!(
            map_status(op, StatusCode::TOO_MANY_REQUESTS, Some(7)),
            PortError::RateLimited { retry_after_secs: 7 }
        ));
        assert!(matches!(map_status(op, StatusCode::BAD_GATEWAY, None), PortError::ServiceUnavailable { .. }));
        assert!(matches!(map_status(op, StatusCode::NOT_FOUND, None), PortError::Internal { .. }));
    }
}
