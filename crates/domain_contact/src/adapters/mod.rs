//! Adapters for the contact domain ports

pub mod http;

pub use http::{HttpRpcTransport, HttpRpcConfig};
