//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the integration settings record, using SQLx.
//!
//! # Storage model
//!
//! Options live in a key/value table, one JSONB document per option name.
//! The settings record is stored whole under a single name and replaced on
//! every save; partial updates are merged in the domain before they get
//! here.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresSettingsAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/shop")).await?;
//! run_migrations(&pool).await?;
//! let settings = PostgresSettingsAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::SettingsRepository;
pub use adapters::PostgresSettingsAdapter;
