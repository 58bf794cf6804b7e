//! Settings Domain Ports
//!
//! The settings record lives behind the `SettingsPort` trait so handlers can
//! be wired to PostgreSQL in production and to an in-memory store in tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_settings::{SettingsPort, SettingsPortExt, SettingsSubmission};
//! use std::sync::Arc;
//!
//! async fn handle_save(port: Arc<dyn SettingsPort>, form: SettingsSubmission) {
//!     let merged = port.save(form).await?;
//! }
//! ```
//!
//! Settings are loaded once per request and handed to the components that
//! need them; no component keeps its own copy.

use async_trait::async_trait;
use tracing::info;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::settings::Settings;
use crate::submission::SettingsSubmission;

/// Persistence boundary for the single settings record
#[async_trait]
pub trait SettingsPort: DomainPort + HealthCheckable {
    /// Loads the record, or an empty one if nothing was ever saved
    async fn load(&self) -> Result<Settings, PortError>;

    /// Replaces the stored record
    async fn store(&self, settings: &Settings) -> Result<(), PortError>;
}

/// Extension trait for SettingsPort with the partial-update flow
#[async_trait]
pub trait SettingsPortExt: SettingsPort {
    /// Merges a partial submission into the stored record and persists it
    ///
    /// Concurrent saves are last-write-wins.
    ///
    /// # Returns
    ///
    /// The merged record, as persisted
    async fn save(&self, submission: SettingsSubmission) -> Result<Settings, PortError> {
        let current = self.load().await?;
        let mut merged = submission.merge_into(current);
        merged.saved_at = Some(chrono::Utc::now());
        self.store(&merged).await?;
        info!(
            configured = merged.credentials().is_some() && merged.target_list().is_some(),
            "Mailing-list settings saved"
        );
        Ok(merged)
    }
}

impl<T: SettingsPort + ?Sized> SettingsPortExt for T {}

/// Mock implementation of SettingsPort for testing
///
/// Keeps the record in memory. Can be switched to fail every call to
/// exercise error paths.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory mock implementation of SettingsPort
    #[derive(Debug, Default)]
    pub struct MockSettingsPort {
        record: Arc<RwLock<Option<Settings>>>,
        unavailable: AtomicBool,
    }

    impl MockSettingsPort {
        /// Creates a mock with no stored record
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a mock holding an existing record
        pub fn with_settings(settings: Settings) -> Self {
            Self {
                record: Arc::new(RwLock::new(Some(settings))),
                unavailable: AtomicBool::new(false),
            }
        }

        /// Makes every subsequent call fail with a connection error
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::Relaxed);
        }

        /// Returns the stored record, if any
        pub async fn stored(&self) -> Option<Settings> {
            self.record.read().await.clone()
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::Relaxed) {
                Err(PortError::connection("mock settings store unavailable"))
            } else {
                Ok(())
            }
        }
    }

    impl DomainPort for MockSettingsPort {}

    #[async_trait]
    impl HealthCheckable for MockSettingsPort {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.unavailable.load(Ordering::Relaxed) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };

            HealthCheckResult {
                adapter_id: "mock-settings-port".to_string(),
                status,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl SettingsPort for MockSettingsPort {
        async fn load(&self) -> Result<Settings, PortError> {
            self.check_available()?;
            Ok(self.record.read().await.clone().unwrap_or_default())
        }

        async fn store(&self, settings: &Settings) -> Result<(), PortError> {
            self.check_available()?;
            *self.record.write().await = Some(settings.clone());
            Ok(())
        }
    }
}
