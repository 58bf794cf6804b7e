//! PostgreSQL Settings Adapter
//!
//! Implements `SettingsPort` on top of `SettingsRepository`. The record is
//! serialized to a JSON document with camelCase keys; fields that were
//! never saved are left out of the document.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_settings::{Settings, SettingsPort};

use crate::error::DatabaseError;
use crate::repositories::settings::{SettingsRepository, SETTINGS_OPTION};

const ADAPTER_ID: &str = "postgres-settings-adapter";

/// PostgreSQL-backed implementation of the SettingsPort trait
///
/// Database errors are translated to `PortError` variants:
/// - connection failures and pool exhaustion -> `PortError::Connection`
/// - a stored document of the wrong shape -> `PortError::Transformation`
/// - everything else -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresSettingsAdapter {
    repository: SettingsRepository,
}

impl PostgresSettingsAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SettingsRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresSettingsAdapter {}

#[async_trait]
impl HealthCheckable for PostgresSettingsAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(()) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl SettingsPort for PostgresSettingsAdapter {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<Settings, PortError> {
        let Some(row) = self.repository.find(SETTINGS_OPTION).await? else {
            debug!("No settings stored yet");
            return Ok(Settings::default());
        };

        serde_json::from_value(row.option_value.0)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()).into())
    }

    #[instrument(skip(self, settings))]
    async fn store(&self, settings: &Settings) -> Result<(), PortError> {
        let document = serde_json::to_value(settings)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        self.repository.upsert(SETTINGS_OPTION, &document).await?;
        Ok(())
    }
}
