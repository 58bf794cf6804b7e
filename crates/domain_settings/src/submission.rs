//! Partial settings updates
//!
//! The settings page posts two independent forms into the same record: one
//! with the API credentials, one with the list, label and export options.
//! A submission therefore only ever carries some of the keys, and only the
//! keys it carries may change the stored record.
//!
//! # Field rules
//!
//! - `apiUserId`, `mailingListId`: numeric text is coerced to an integer,
//!   anything else clears the field
//! - `apiUserToken`, `checkboxLabel`, `sourceName`: stored as plain text
//! - `exportAddress`: an unchecked HTML checkbox is simply absent from the
//!   post, which looks the same as "the other form was submitted". The flag
//!   is only evaluated when `checkboxLabel`, which lives in the same form,
//!   is present too.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use core_kernel::text::sanitize_text;
use core_kernel::{ApiUserId, MailingListId};

use crate::settings::Settings;

/// Form keys, as posted by the settings forms
pub mod keys {
    pub const API_USER_ID: &str = "apiUserId";
    pub const API_USER_TOKEN: &str = "apiUserToken";
    pub const MAILING_LIST_ID: &str = "mailingListId";
    pub const CHECKBOX_LABEL: &str = "checkboxLabel";
    pub const EXPORT_ADDRESS: &str = "exportAddress";
    pub const SOURCE_NAME: &str = "sourceName";
}

/// A raw, partial settings submission
///
/// `None` means the key was not part of the submission. Values are kept as
/// the raw text the form sent; the rules are applied by [`merge_into`].
///
/// [`merge_into`]: SettingsSubmission::merge_into
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsSubmission {
    #[serde(deserialize_with = "form_value", skip_serializing_if = "Option::is_none")]
    pub api_user_id: Option<String>,
    #[serde(deserialize_with = "form_value", skip_serializing_if = "Option::is_none")]
    pub api_user_token: Option<String>,
    #[serde(deserialize_with = "form_value", skip_serializing_if = "Option::is_none")]
    pub mailing_list_id: Option<String>,
    #[serde(deserialize_with = "form_value", skip_serializing_if = "Option::is_none")]
    pub checkbox_label: Option<String>,
    #[serde(deserialize_with = "form_value", skip_serializing_if = "Option::is_none")]
    pub export_address: Option<String>,
    #[serde(deserialize_with = "form_value", skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

impl SettingsSubmission {
    /// Builds a submission from posted form pairs
    ///
    /// Unknown keys are ignored. Presence is what counts: an empty value is
    /// still a submitted key.
    pub fn from_form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut fields: HashMap<String, String> = HashMap::new();
        for (key, value) in pairs {
            fields.insert(key.as_ref().to_string(), value.into());
        }

        Self {
            api_user_id: fields.remove(keys::API_USER_ID),
            api_user_token: fields.remove(keys::API_USER_TOKEN),
            mailing_list_id: fields.remove(keys::MAILING_LIST_ID),
            checkbox_label: fields.remove(keys::CHECKBOX_LABEL),
            export_address: fields.remove(keys::EXPORT_ADDRESS),
            source_name: fields.remove(keys::SOURCE_NAME),
        }
    }

    /// Returns true if the submission carries no known key
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the submission on top of an existing record
    ///
    /// Keys absent from the submission leave the existing values untouched.
    pub fn merge_into(self, mut settings: Settings) -> Settings {
        if let Some(raw) = self.api_user_id.as_deref() {
            settings.api_user_id = coerce_field(keys::API_USER_ID, raw).map(ApiUserId::new);
        }

        if let Some(raw) = self.api_user_token.as_deref() {
            settings.api_user_token = Some(sanitize_text(raw));
        }

        if let Some(raw) = self.mailing_list_id.as_deref() {
            settings.mailing_list_id =
                coerce_field(keys::MAILING_LIST_ID, raw).map(MailingListId::new);
        }

        if let Some(raw) = self.checkbox_label.as_deref() {
            settings.checkbox_label = Some(sanitize_text(raw));
            settings.export_address = Some(is_checked(self.export_address.as_deref()));
        }

        if let Some(raw) = self.source_name.as_deref() {
            settings.source_name = Some(sanitize_text(raw));
        }

        settings
    }
}

/// Coerces numeric form text to an unsigned integer
///
/// Accepts plain integers (`"42"`, `" 42 "`, `"+42"`) and finite,
/// non-negative decimal or exponent notation, which is truncated (`"12.9"`
/// becomes 12, `"1e3"` becomes 1000). Everything else, negatives included,
/// yields `None`.
///
/// # Examples
///
/// ```rust
/// use domain_settings::submission::coerce_numeric;
///
/// assert_eq!(coerce_numeric("12"), Some(12));
/// assert_eq!(coerce_numeric("12.9"), Some(12));
/// assert_eq!(coerce_numeric("twelve"), None);
/// assert_eq!(coerce_numeric("-3"), None);
/// ```
pub fn coerce_numeric(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return Some(value);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value < u64::MAX as f64 => {
            Some(value.trunc() as u64)
        }
        _ => None,
    }
}

fn coerce_field(field: &'static str, raw: &str) -> Option<u64> {
    let value = coerce_numeric(raw);
    if value.is_none() && !raw.trim().is_empty() {
        debug!(field, "Non-numeric settings value cleared");
    }
    value
}

/// Interprets a posted checkbox value
///
/// Browsers only post a checked box, so presence means checked. JSON
/// clients may send an explicit false value instead of omitting the key.
fn is_checked(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "" | "0" | "false" | "off" | "no"),
    }
}

/// Accepts any JSON scalar for a form field and keeps its text
fn form_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }))
}
