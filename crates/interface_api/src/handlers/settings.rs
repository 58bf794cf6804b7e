//! Settings page handlers

use axum::{extract::State, Extension, Json};
use tracing::warn;

use domain_settings::{i18n, Settings, SettingsPort, SettingsPortExt, SettingsSubmission, SettingsView};

use crate::auth::{permissions, require_permission, Claims};
use crate::dto::settings::{list_options, SettingsPageResponse};
use crate::{error::ApiError, AppState};

/// Renders the settings page model
///
/// A settings store outage renders the page with defaults and the
/// credentials notice; only saving reports it as an error.
pub async fn settings_page(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<SettingsPageResponse>, ApiError> {
    require_permission(&claims, permissions::SETTINGS_MANAGE)?;

    let settings = state.settings.load().await.unwrap_or_else(|e| {
        warn!(error = %e, "Could not load mailing-list settings, rendering defaults");
        Settings::default()
    });
    Ok(Json(render_page(&state, &settings).await))
}

/// Saves one of the settings forms and renders the updated page
pub async fn save_settings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(submission): Json<SettingsSubmission>,
) -> Result<Json<SettingsPageResponse>, ApiError> {
    require_permission(&claims, permissions::SETTINGS_MANAGE)?;

    let settings = state.settings.save(submission).await?;
    Ok(Json(render_page(&state, &settings).await))
}

async fn render_page(state: &AppState, settings: &Settings) -> SettingsPageResponse {
    let lists = state.mailing.fetch_lists(settings.credentials().as_ref()).await;

    let notice = lists
        .is_empty()
        .then(|| i18n::credentials_notice(&state.site.locale));

    SettingsPageResponse {
        settings: SettingsView::with_defaults(settings, &state.site),
        lists: list_options(&lists, settings.target_list()),
        notice,
    }
}
