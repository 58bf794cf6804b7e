//! Render models for the settings page and the checkout opt-in field

use serde::Serialize;

use core_kernel::MailingListId;

use crate::i18n;
use crate::settings::{Settings, SiteContext};

/// Name of the checkout checkbox; its presence in a checkout post is the opt-in
pub const OPT_IN_FIELD: &str = "newsletter_opt_in";

/// Settings as shown in the settings forms, with defaults filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    /// Empty until saved
    pub api_user_id: String,
    /// Empty until saved
    pub api_user_token: String,
    pub mailing_list_id: Option<MailingListId>,
    pub checkbox_label: String,
    pub export_address: bool,
    pub source_name: String,
}

impl SettingsView {
    /// Builds the form values, using site-based defaults for unsaved fields
    pub fn with_defaults(settings: &Settings, site: &SiteContext) -> Self {
        Self {
            api_user_id: settings
                .api_user_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            api_user_token: settings.api_user_token.clone().unwrap_or_default(),
            mailing_list_id: settings.mailing_list_id,
            checkbox_label: settings
                .checkbox_label
                .clone()
                .unwrap_or_else(|| i18n::default_checkbox_label(&site.name, &site.locale)),
            export_address: settings.exports_address(),
            source_name: settings
                .source_name
                .clone()
                .unwrap_or_else(|| site.name.clone()),
        }
    }
}

/// The optional opt-in checkbox rendered on the checkout page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutOptInField {
    pub name: &'static str,
    pub field_type: &'static str,
    pub required: bool,
    pub label: String,
}

impl CheckoutOptInField {
    /// Renders the checkbox, or nothing while the integration is unconfigured
    pub fn render(settings: &Settings) -> Option<Self> {
        if settings.is_empty() {
            return None;
        }

        Some(Self {
            name: OPT_IN_FIELD,
            field_type: "checkbox",
            required: false,
            label: settings.checkbox_label.clone().unwrap_or_default(),
        })
    }
}
