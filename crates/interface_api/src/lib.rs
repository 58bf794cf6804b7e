//! HTTP API Layer
//!
//! Axum routes standing in for the storefront's extension points:
//!
//! - **Settings page** (`GET /api/v1/settings`): current values with
//!   defaults, the selectable mailing lists and an advisory notice
//! - **Settings save** (`POST /api/v1/settings`): partial update of the
//!   settings record, from either settings form
//! - **Checkout field** (`GET /api/v1/checkout/opt-in`): the opt-in checkbox,
//!   if the integration is configured at all
//! - **Checkout hook** (`POST /api/v1/checkout`): submits the customer to the
//!   configured list; always answers 200
//!
//! Settings routes require a bearer token with the `settings:manage` role.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(settings_port, transport, config);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_contact::{MailingListClient, RpcTransport};
use domain_settings::{SettingsPort, SiteContext};

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{checkout, health, settings};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<dyn SettingsPort>,
    pub mailing: MailingListClient,
    pub site: SiteContext,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(
        settings: Arc<dyn SettingsPort>,
        transport: Arc<dyn RpcTransport>,
        config: ApiConfig,
    ) -> Self {
        Self {
            settings,
            mailing: MailingListClient::new(transport),
            site: SiteContext::new(config.site_name.clone(), config.site_locale.clone()),
            config,
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Storefront hooks, called by the checkout itself
    let checkout_routes = Router::new()
        .route("/opt-in", get(checkout::opt_in_field))
        .route("/", post(checkout::submit_checkout));

    // Admin routes
    let settings_routes = Router::new()
        .route("/", get(settings::settings_page).post(settings::save_settings))
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api_routes = Router::new()
        .nest("/checkout", checkout_routes)
        .nest("/settings", settings_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
