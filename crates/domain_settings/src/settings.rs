//! The persisted integration settings record
//!
//! One record holds everything the integration needs: the API credentials,
//! the list new contacts are added to, the checkout label and the export
//! options. Every field may be unset; an unset or empty field means the
//! feature it drives is disabled, never that something went wrong.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ApiUserId, MailingListId};

/// The integration settings record
///
/// Serialized with camelCase keys. Fields that were never saved are omitted
/// from the stored document and deserialize back to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Identifies the caller to the mailing-list service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_user_id: Option<ApiUserId>,

    /// Shared-secret credential
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_user_token: Option<String>,

    /// Target list for new contacts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing_list_id: Option<MailingListId>,

    /// Opt-in prompt shown next to the checkout checkbox
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkbox_label: Option<String>,

    /// Whether postal fields are included in submissions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_address: Option<bool>,

    /// Source tag attached to every created contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    /// Set on every save, so a record whose fields were all cleared still exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Settings {
    /// Returns true if nothing has ever been saved
    pub fn is_empty(&self) -> bool {
        self.saved_at.is_none()
            && self.api_user_id.is_none()
            && self.api_user_token.is_none()
            && self.mailing_list_id.is_none()
            && self.checkbox_label.is_none()
            && self.export_address.is_none()
            && self.source_name.is_none()
    }

    /// Returns the API credentials if both halves are usable
    ///
    /// A zero user id counts as unset: the service never issues it.
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::new(self.api_user_id, self.api_user_token.as_deref())
    }

    /// Returns the target list if one has been chosen
    pub fn target_list(&self) -> Option<MailingListId> {
        self.mailing_list_id.filter(|id| id.get() != 0)
    }

    /// Returns true if postal fields should be exported
    pub fn exports_address(&self) -> bool {
        self.export_address.unwrap_or(false)
    }

    /// Returns the source tag if one is configured
    pub fn source(&self) -> Option<&str> {
        core_kernel::text::non_empty(self.source_name.as_deref())
    }
}

/// Static credentials for the mailing-list service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: ApiUserId,
    pub user_token: String,
}

impl Credentials {
    /// Builds credentials from possibly-missing parts
    ///
    /// Returns `None` if the id is missing or zero, or the token is blank.
    pub fn new(user_id: Option<ApiUserId>, user_token: Option<&str>) -> Option<Self> {
        let user_id = user_id.filter(|id| id.get() != 0)?;
        let user_token = core_kernel::text::non_empty(user_token)?;
        Some(Self {
            user_id,
            user_token: user_token.to_string(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("user_token", &"<redacted>")
            .finish()
    }
}

/// Facts about the storefront the integration is installed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContext {
    /// Site name, used in the default label and as the default source
    pub name: String,
    /// Active locale, e.g. `nl_BE` or `en-US`
    pub locale: String,
}

impl SiteContext {
    pub fn new(name: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locale: locale.into(),
        }
    }

    /// Two-letter language code taken from the start of the locale
    pub fn language_code(&self) -> String {
        self.locale.chars().take(2).collect()
    }
}
