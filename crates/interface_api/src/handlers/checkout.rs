//! Storefront checkout hooks
//!
//! Neither handler ever fails the checkout: a settings store outage or a
//! mailing-list problem is logged and the storefront carries on.

use axum::{extract::State, Json};
use tracing::warn;

use domain_contact::{CheckoutFields, SubmissionOutcome};
use domain_settings::{CheckoutOptInField, Settings, SettingsPort};

use crate::dto::checkout::{CheckoutResponse, OptInFieldResponse};
use crate::AppState;

/// Returns the opt-in checkbox to render, if any
pub async fn opt_in_field(State(state): State<AppState>) -> Json<OptInFieldResponse> {
    let settings = load_or_empty(&state).await;
    Json(OptInFieldResponse {
        field: CheckoutOptInField::render(&settings),
    })
}

/// Submits the customer of a completed checkout to the mailing list
pub async fn submit_checkout(
    State(state): State<AppState>,
    Json(checkout): Json<CheckoutFields>,
) -> Json<CheckoutResponse> {
    let settings = match state.settings.load().await {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, "Could not load mailing-list settings, skipping submission");
            return Json(SubmissionOutcome::Failed(e.to_string()).into());
        }
    };

    let outcome = state.mailing.submit(&settings, &checkout, &state.site).await;
    Json(outcome.into())
}

async fn load_or_empty(state: &AppState) -> Settings {
    state.settings.load().await.unwrap_or_else(|e| {
        warn!(error = %e, "Could not load mailing-list settings");
        Settings::default()
    })
}
