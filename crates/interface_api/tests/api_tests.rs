//! Router tests against in-memory adapters

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use core_kernel::{ApiUserId, MailingListId};
use domain_contact::{RecordingTransport, RpcOperation};
use domain_settings::{MockSettingsPort, Settings};
use interface_api::auth::{create_token, permissions};
use interface_api::{config::ApiConfig, create_router, AppState};
use test_utils::{CheckoutFieldsBuilder, CheckoutFixtures, SettingsFixtures};

struct TestApp {
    router: Router,
    settings: Arc<MockSettingsPort>,
    transport: Arc<RecordingTransport>,
    config: ApiConfig,
}

impl TestApp {
    fn new(settings: Settings, transport: RecordingTransport) -> Self {
        let config = ApiConfig {
            site_name: "Acme".to_string(),
            site_locale: "en_US".to_string(),
            ..Default::default()
        };
        let settings = Arc::new(MockSettingsPort::with_settings(settings));
        let transport = Arc::new(transport);
        let state = AppState::new(settings.clone(), transport.clone(), config.clone());

        Self {
            router: create_router(state),
            settings,
            transport,
            config,
        }
    }

    fn token(&self, roles: &[&str]) -> String {
        create_token(
            "shop-admin",
            roles.iter().map(|r| r.to_string()).collect(),
            &self.config.jwt_secret,
            300,
        )
        .unwrap()
    }

    async fn send(&self, method: Method, uri: &str, token: Option<String>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

fn lists_reply() -> Value {
    json!({
        "errorCode": 0,
        "errorMessage": "",
        "mailingListTypeItems": [
            { "mailingListId": 30, "mailingListName": "Partners" },
            { "mailingListId": 10, "mailingListName": "Newsletter" },
            { "mailingListId": 20, "mailingListName": "Customers" }
        ]
    })
}

// ============================================================================
// Health
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new(Settings::default(), RecordingTransport::new());
        let (status, body) = app.send(Method::GET, "/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_follows_settings_store() {
        let app = TestApp::new(Settings::default(), RecordingTransport::new());
        let (status, _) = app.send(Method::GET, "/health/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);

        app.settings.set_unavailable(true);
        let (status, _) = app.send(Method::GET, "/health/ready", None, None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}

// ============================================================================
// Settings page
// ============================================================================

mod settings_tests {
    use super::*;

    #[tokio::test]
    async fn test_requires_token() {
        let app = TestApp::new(Settings::default(), RecordingTransport::new());
        let (status, _) = app.send(Method::GET, "/api/v1/settings", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_requires_settings_permission() {
        let app = TestApp::new(Settings::default(), RecordingTransport::new());
        let token = app.token(&["orders:read"]);

        let (status, body) = app.send(Method::GET, "/api/v1/settings", Some(token), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "forbidden");
    }

    #[tokio::test]
    async fn test_unconfigured_page_shows_defaults_and_notice() {
        let app = TestApp::new(Settings::default(), RecordingTransport::new());
        let token = app.token(&[permissions::SETTINGS_MANAGE]);

        let (status, body) = app.send(Method::GET, "/api/v1/settings", Some(token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["settings"]["apiUserId"], "");
        assert_eq!(
            body["settings"]["checkboxLabel"],
            "Yes, I’d like to sign up for the Acme newsletter."
        );
        assert_eq!(body["settings"]["sourceName"], "Acme");
        assert_eq!(body["lists"], json!([]));
        assert!(body["notice"].as_str().unwrap().contains("save the API settings first"));
        assert_eq!(app.transport.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_lists_sorted_with_selection() {
        let app = TestApp::new(
            SettingsFixtures::configured(),
            RecordingTransport::new().with_response(RpcOperation::GetMailingLists, lists_reply()),
        );
        let token = app.token(&[permissions::ADMIN]);

        let (status, body) = app.send(Method::GET, "/api/v1/settings", Some(token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["lists"],
            json!([
                { "id": 10, "name": "Newsletter", "selected": true },
                { "id": 20, "name": "Customers", "selected": false },
                { "id": 30, "name": "Partners", "selected": false }
            ])
        );
        assert!(body.get("notice").is_none());
    }

    #[tokio::test]
    async fn test_lookup_failure_still_renders_page() {
        let app = TestApp::new(
            SettingsFixtures::configured(),
            RecordingTransport::new().with_fault(RpcOperation::GetMailingLists, "connection refused"),
        );
        let token = app.token(&[permissions::SETTINGS_MANAGE]);

        let (status, body) = app.send(Method::GET, "/api/v1/settings", Some(token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lists"], json!([]));
        assert!(body["notice"].is_string());
    }

    #[tokio::test]
    async fn test_store_outage_renders_defaults_and_notice() {
        let app = TestApp::new(SettingsFixtures::configured(), RecordingTransport::new());
        app.settings.set_unavailable(true);
        let token = app.token(&[permissions::SETTINGS_MANAGE]);

        let (status, body) = app.send(Method::GET, "/api/v1/settings", Some(token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["settings"]["apiUserId"], "");
        assert_eq!(body["settings"]["sourceName"], "Acme");
        assert_eq!(body["lists"], json!([]));
        assert!(body["notice"].as_str().unwrap().contains("save the API settings first"));
        assert_eq!(app.transport.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_store_outage_on_save_is_service_unavailable() {
        let app = TestApp::new(Settings::default(), RecordingTransport::new());
        app.settings.set_unavailable(true);
        let token = app.token(&[permissions::SETTINGS_MANAGE]);

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/settings",
                Some(token),
                Some(json!({ "sourceName": "Webshop" })),
            )
            .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "service_unavailable");
    }

    #[tokio::test]
    async fn test_credentials_form_then_misc_form() {
        let app = TestApp::new(
            Settings::default(),
            RecordingTransport::new().with_response(RpcOperation::GetMailingLists, lists_reply()),
        );
        let token = app.token(&[permissions::SETTINGS_MANAGE]);

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/settings",
                Some(token.clone()),
                Some(json!({ "apiUserId": "1234", "apiUserToken": " tok " })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lists"].as_array().unwrap().len(), 3);

        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/settings",
                Some(token),
                Some(json!({
                    "mailingListId": 20,
                    "checkboxLabel": "Join us",
                    "exportAddress": "1",
                    "sourceName": "Webshop"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let stored = app.settings.stored().await.unwrap();
        assert_eq!(stored.api_user_id, Some(ApiUserId::new(1234)));
        assert_eq!(stored.api_user_token.as_deref(), Some("tok"));
        assert_eq!(stored.mailing_list_id, Some(MailingListId::new(20)));
        assert_eq!(stored.export_address, Some(true));
        assert_eq!(stored.source_name.as_deref(), Some("Webshop"));
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_cleared() {
        let app = TestApp::new(SettingsFixtures::configured(), RecordingTransport::new());
        let token = app.token(&[permissions::SETTINGS_MANAGE]);

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/settings",
                Some(token),
                Some(json!({ "apiUserId": "abc" })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["settings"]["apiUserId"], "");
        assert_eq!(app.settings.stored().await.unwrap().api_user_id, None);
    }

    #[tokio::test]
    async fn test_first_save_with_only_cleared_fields_shows_checkbox() {
        let app = TestApp::new(Settings::default(), RecordingTransport::new());
        let token = app.token(&[permissions::SETTINGS_MANAGE]);

        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/settings",
                Some(token),
                Some(json!({ "apiUserId": "abc" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = app.send(Method::GET, "/api/v1/checkout/opt-in", None, None).await;
        assert_eq!(body["field"]["name"], "newsletter_opt_in");
        assert_eq!(body["field"]["label"], "");
    }
}

// ============================================================================
// Checkout hooks
// ============================================================================

mod checkout_tests {
    use super::*;

    #[tokio::test]
    async fn test_no_field_while_unconfigured() {
        let app = TestApp::new(Settings::default(), RecordingTransport::new());
        let (status, body) = app.send(Method::GET, "/api/v1/checkout/opt-in", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["field"].is_null());
    }

    #[tokio::test]
    async fn test_field_with_configured_label() {
        let app = TestApp::new(SettingsFixtures::configured(), RecordingTransport::new());
        let (_, body) = app.send(Method::GET, "/api/v1/checkout/opt-in", None, None).await;

        assert_eq!(body["field"]["name"], "newsletter_opt_in");
        assert_eq!(body["field"]["label"], "Keep me posted");
        assert_eq!(body["field"]["required"], false);
    }

    #[tokio::test]
    async fn test_submission_created() {
        let app = TestApp::new(
            SettingsFixtures::exporting(),
            RecordingTransport::new().with_response(
                RpcOperation::CreateEmailAddress,
                json!({ "errorCode": 0, "errorMessage": "", "emailAddressId": 555 }),
            ),
        );
        let checkout = serde_json::to_value(CheckoutFixtures::opted_in()).unwrap();

        let (status, body) = app.send(Method::POST, "/api/v1/checkout", None, Some(checkout)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "created");
        assert_eq!(body["emailAddressId"], 555);

        let request = app
            .transport
            .last_request(RpcOperation::CreateEmailAddress)
            .await
            .unwrap();
        assert_eq!(request["emailAddressType"]["address"], "Main St 1 Apt 2");
        assert_eq!(request["emailAddressType"]["language"], "en");
        assert_eq!(request["sources"], json!([{ "name": "Webshop" }]));
    }

    #[tokio::test]
    async fn test_source_sent_without_address_export() {
        let app = TestApp::new(
            SettingsFixtures::configured(),
            RecordingTransport::new().with_response(
                RpcOperation::CreateEmailAddress,
                json!({ "errorCode": 0, "errorMessage": "", "emailAddressId": 556 }),
            ),
        );
        let checkout = serde_json::to_value(CheckoutFixtures::opted_in()).unwrap();

        let (status, body) = app.send(Method::POST, "/api/v1/checkout", None, Some(checkout)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "created");

        let request = app
            .transport
            .last_request(RpcOperation::CreateEmailAddress)
            .await
            .unwrap();
        assert!(request["emailAddressType"].get("address").is_none());
        assert_eq!(request["sources"], json!([{ "name": "Webshop" }]));
    }

    #[tokio::test]
    async fn test_no_opt_in_is_skipped() {
        let app = TestApp::new(SettingsFixtures::configured(), RecordingTransport::new());
        let checkout = serde_json::to_value(CheckoutFixtures::not_opted_in()).unwrap();

        let (status, body) = app.send(Method::POST, "/api/v1/checkout", None, Some(checkout)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "skipped");
        assert_eq!(app.transport.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_service_down_does_not_fail_checkout() {
        let app = TestApp::new(
            SettingsFixtures::configured(),
            RecordingTransport::new().with_fault(RpcOperation::CreateEmailAddress, "connection refused"),
        );
        let checkout = serde_json::to_value(CheckoutFieldsBuilder::new().with_address().build()).unwrap();

        let (status, body) = app.send(Method::POST, "/api/v1/checkout", None, Some(checkout)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "failed");
    }

    #[tokio::test]
    async fn test_store_outage_does_not_fail_checkout() {
        let app = TestApp::new(SettingsFixtures::configured(), RecordingTransport::new());
        app.settings.set_unavailable(true);
        let checkout = serde_json::to_value(CheckoutFixtures::opted_in()).unwrap();

        let (status, body) = app.send(Method::POST, "/api/v1/checkout", None, Some(checkout)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "failed");
        assert_eq!(app.transport.call_count().await, 0);
    }
}
