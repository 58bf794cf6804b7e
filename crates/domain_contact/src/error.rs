//! Remote call errors
//!
//! None of these ever leave the client: the public operations log them and
//! degrade to "nothing happened this time".

use thiserror::Error;

use core_kernel::PortError;

use crate::rpc::RpcOperation;

/// Failure of a single remote procedure call
#[derive(Debug, Error)]
pub enum RpcError {
    /// The service answered with a non-zero error code
    #[error("{operation} rejected with code {code}: {message}")]
    Rejected {
        operation: RpcOperation,
        code: i64,
        message: String,
    },

    /// The call could not be made or its answer could not be read
    #[error("{0}")]
    Transport(#[from] PortError),
}

impl RpcError {
    /// Returns true if the service itself refused the request
    pub fn is_rejection(&self) -> bool {
        matches!(self, RpcError::Rejected { .. })
    }
}
