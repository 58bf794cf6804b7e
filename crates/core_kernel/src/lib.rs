//! Core Kernel - Foundational types shared by the mailing-list integration
//!
//! This crate provides the building blocks used across all domain modules:
//! - Port error taxonomy and adapter marker traits
//! - Identifiers issued by the mailing-list service
//! - Plain-text sanitization for user supplied values

pub mod identifiers;
pub mod error;
pub mod ports;
pub mod text;

pub use identifiers::{ApiUserId, MailingListId, EmailAddressId, SubmissionId};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
};
