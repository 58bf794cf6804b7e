//! Contact Domain Ports
//!
//! `RpcTransport` moves one request document to the mailing-list service
//! and brings back the response document. It knows nothing about the
//! individual procedures; typing and the error-code check happen in
//! `MailingListClient`.

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};

use crate::rpc::RpcOperation;

/// Transport for remote procedure calls
#[async_trait]
pub trait RpcTransport: DomainPort {
    /// Invokes `operation` with `request` and returns the raw response
    ///
    /// # Errors
    ///
    /// Returns a `PortError` if the service could not be reached or its
    /// answer was not a document. A response carrying a non-zero
    /// `errorCode` is still `Ok`.
    async fn invoke(
        &self,
        operation: RpcOperation,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, PortError>;
}

/// Recording mock of RpcTransport for testing
///
/// Replies are scripted per operation. Every call is recorded, including
/// calls that fail, so tests can assert both on payloads and on the absence
/// of calls.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    /// A scripted answer
    #[derive(Debug, Clone)]
    pub enum MockReply {
        Respond(serde_json::Value),
        Fault(String),
    }

    /// One observed invocation
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedCall {
        pub operation: RpcOperation,
        pub request: serde_json::Value,
    }

    #[derive(Debug, Default)]
    pub struct RecordingTransport {
        replies: RwLock<HashMap<RpcOperation, MockReply>>,
        calls: RwLock<Vec<RecordedCall>>,
    }

    impl RecordingTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Scripts a response document for `operation`
        pub fn with_response(mut self, operation: RpcOperation, response: serde_json::Value) -> Self {
            self.replies
                .get_mut()
                .insert(operation, MockReply::Respond(response));
            self
        }

        /// Scripts a connection failure for `operation`
        pub fn with_fault(mut self, operation: RpcOperation, message: impl Into<String>) -> Self {
            self.replies
                .get_mut()
                .insert(operation, MockReply::Fault(message.into()));
            self
        }

        /// Replaces the scripted reply for `operation` on a shared mock
        pub async fn set_reply(&self, operation: RpcOperation, reply: MockReply) {
            self.replies.write().await.insert(operation, reply);
        }

        pub async fn calls(&self) -> Vec<RecordedCall> {
            self.calls.read().await.clone()
        }

        pub async fn call_count(&self) -> usize {
            self.calls.read().await.len()
        }

        /// Returns the payload of the most recent call to `operation`
        pub async fn last_request(&self, operation: RpcOperation) -> Option<serde_json::Value> {
            self.calls
                .read()
                .await
                .iter()
                .rev()
                .find(|call| call.operation == operation)
                .map(|call| call.request.clone())
        }
    }

    impl DomainPort for RecordingTransport {}

    #[async_trait]
    impl RpcTransport for RecordingTransport {
        async fn invoke(
            &self,
            operation: RpcOperation,
            request: serde_json::Value,
        ) -> Result<serde_json::Value, PortError> {
            self.calls.write().await.push(RecordedCall { operation, request });

            match self.replies.read().await.get(&operation) {
                Some(MockReply::Respond(response)) => Ok(response.clone()),
                Some(MockReply::Fault(message)) => Err(PortError::connection(message.clone())),
                None => Err(PortError::connection(format!("no reply scripted for {}", operation))),
            }
        }
    }
}
