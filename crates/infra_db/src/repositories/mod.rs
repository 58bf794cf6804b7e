//! Repository implementations
//!
//! Repositories own the SQL and the row types. Queries are built at runtime
//! with `sqlx::query_as` so the crate builds without a live database.

pub mod settings;

pub use settings::{SettingsRepository, OptionRow};
