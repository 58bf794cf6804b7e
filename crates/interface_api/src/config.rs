//! API configuration

use serde::Deserialize;

use core_kernel::CoreError;

/// API configuration
///
/// Every field has a default, so a partial environment is enough.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Storefront name, used in the default opt-in label and source tag
    pub site_name: String,
    /// Storefront locale, e.g. `nl_BE`
    pub site_locale: String,
    /// Base URL of the mailing-list service
    pub rpc_endpoint: String,
    /// Upper bound for one mailing-list call
    pub rpc_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/shop".to_string(),
            log_level: "info".to_string(),
            site_name: "My Shop".to_string(),
            site_locale: "en_US".to_string(),
            rpc_endpoint: "http://localhost:9000".to_string(),
            rpc_timeout_secs: 5,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// A plain `DATABASE_URL` is honored when `API_DATABASE_URL` is unset.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_default("database_url", url)?;
        }

        builder
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Rejects values the server cannot start with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(CoreError::configuration("jwt_secret must not be empty"));
        }
        if self.rpc_timeout_secs == 0 {
            return Err(CoreError::configuration("rpc_timeout_secs must be positive"));
        }
        if !(self.rpc_endpoint.starts_with("http://") || self.rpc_endpoint.starts_with("https://")) {
            return Err(CoreError::configuration(format!(
                "rpc_endpoint must be an http(s) URL, got '{}'",
                self.rpc_endpoint
            )));
        }
        Ok(())
    }
}
