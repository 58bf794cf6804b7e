//! Settings page DTOs

use serde::Serialize;

use core_kernel::MailingListId;
use domain_contact::MailingLists;
use domain_settings::SettingsView;

/// One entry of the list selector
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOption {
    pub id: MailingListId,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPageResponse {
    pub settings: SettingsView,
    /// Ascending by id; empty while credentials are missing or wrong
    pub lists: Vec<ListOption>,
    /// Shown instead of the selector when there is nothing to select
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Marks the configured list as selected
pub fn list_options(lists: &MailingLists, selected: Option<MailingListId>) -> Vec<ListOption> {
    lists
        .iter()
        .map(|list| ListOption {
            selected: Some(list.id) == selected,
            id: list.id,
            name: list.name,
        })
        .collect()
}
