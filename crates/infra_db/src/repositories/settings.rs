//! Option table access

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;

use crate::error::DatabaseError;

/// Option name the integration settings record is stored under
pub const SETTINGS_OPTION: &str = "checkout_mailing_list_settings";

/// A row of `integration_settings`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OptionRow {
    pub option_name: String,
    pub option_value: Json<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

/// Reads and writes JSON options by name
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches an option, or `None` if it was never written
    pub async fn find(&self, option_name: &str) -> Result<Option<OptionRow>, DatabaseError> {
        let row = sqlx::query_as::<_, OptionRow>(
            r#"
            SELECT option_name, option_value, updated_at
            FROM integration_settings
            WHERE option_name = $1
            "#,
        )
        .bind(option_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts or replaces an option
    pub async fn upsert(
        &self,
        option_name: &str,
        value: &serde_json::Value,
    ) -> Result<DateTime<Utc>, DatabaseError> {
        let updated_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
            INSERT INTO integration_settings (option_name, option_value, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (option_name)
            DO UPDATE SET option_value = EXCLUDED.option_value, updated_at = now()
            RETURNING updated_at
            "#,
        )
        .bind(option_name)
        .bind(Json(value))
        .fetch_one(&self.pool)
        .await?;

        debug!(option_name, %updated_at, "Option stored");
        Ok(updated_at)
    }

    /// Round-trips a trivial query
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
