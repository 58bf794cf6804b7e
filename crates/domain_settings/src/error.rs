//! Settings domain errors

use thiserror::Error;

/// Errors that can occur in the settings domain
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A message catalog could not be parsed or registered
    #[error("Localization error: {0}")]
    Localization(String),

    /// A message is missing from the active catalog
    #[error("Missing message: {0}")]
    MissingMessage(String),
}

impl SettingsError {
    /// Creates a Localization error from the catalog's own error list
    pub fn localization(cause: impl std::fmt::Debug) -> Self {
        SettingsError::Localization(format!("{:?}", cause))
    }

    /// Creates a MissingMessage error
    pub fn missing_message(id: impl Into<String>) -> Self {
        SettingsError::MissingMessage(id.into())
    }
}
