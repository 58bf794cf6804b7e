//! Domain Adapters
//!
//! PostgreSQL implementations of the domain ports.

pub mod settings;

pub use settings::PostgresSettingsAdapter;
