//! Test Utilities Crate
//!
//! Shared fixtures and helpers for the checkout mailing-list test suite.
//!
//! # Modules
//!
//! - `fixtures`: Fixed settings records and checkouts
//! - `builders`: Checkout builder with generated customer data
//! - `database`: PostgreSQL test container
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use generators::*;
