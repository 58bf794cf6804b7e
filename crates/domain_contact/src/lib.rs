//! Contact Submission Domain
//!
//! Everything that talks to the remote mailing-list service lives here:
//!
//! - Looking up the lists an account can subscribe contacts to
//! - Turning a completed checkout into a new contact on the configured list
//!
//! Both operations are fail-open. A missing setting, an unreachable service
//! or a rejected request is logged and swallowed; the checkout that
//! triggered it always completes.
//!
//! # Wire protocol
//!
//! The service exposes named remote procedures. Every request carries a
//! `header` with the API credentials, and every response carries an
//! `errorCode` (zero on success) plus an `errorMessage`. The transport that
//! moves those documents is a port (`RpcTransport`), so the client is tested
//! against a recording mock and wired to HTTP in production.

pub mod checkout;
pub mod contact;
pub mod mailing_list;
pub mod rpc;
pub mod client;
pub mod error;
pub mod ports;
pub mod adapters;

pub use checkout::CheckoutFields;
pub use contact::{ContactRecord, sanitize_email};
pub use mailing_list::{MailingList, MailingLists};
pub use rpc::{RpcOperation, RpcStatus};
pub use client::{MailingListClient, SubmissionOutcome, SkipReason, prepare_contact_request};
pub use error::RpcError;
pub use ports::RpcTransport;
pub use adapters::http::{HttpRpcTransport, HttpRpcConfig};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::RecordingTransport;
