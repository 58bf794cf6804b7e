//! Pre-built Test Fixtures
//!
//! Fixed, predictable data for unit and router tests.

use core_kernel::{ApiUserId, MailingListId};
use domain_contact::checkout::fields;
use domain_contact::CheckoutFields;
use domain_settings::{Settings, SiteContext, OPT_IN_FIELD};

/// Settings records in the states the integration can be in
pub struct SettingsFixtures;

impl SettingsFixtures {
    pub const USER_ID: u64 = 1234;
    pub const USER_TOKEN: &'static str = "tok-secret";
    pub const LIST_ID: u64 = 10;

    /// Nothing saved yet
    pub fn empty() -> Settings {
        Settings::default()
    }

    /// Credentials saved, no list chosen yet
    pub fn credentials_only() -> Settings {
        Settings {
            api_user_id: Some(ApiUserId::new(Self::USER_ID)),
            api_user_token: Some(Self::USER_TOKEN.to_string()),
            ..Default::default()
        }
    }

    /// Ready for checkout submissions, without address export
    pub fn configured() -> Settings {
        Settings {
            mailing_list_id: Some(MailingListId::new(Self::LIST_ID)),
            checkbox_label: Some("Keep me posted".to_string()),
            export_address: Some(false),
            source_name: Some("Webshop".to_string()),
            ..Self::credentials_only()
        }
    }

    /// Ready for checkout submissions, exporting the billing address
    pub fn exporting() -> Settings {
        Settings {
            export_address: Some(true),
            ..Self::configured()
        }
    }
}

/// Checkout posts
pub struct CheckoutFixtures;

impl CheckoutFixtures {
    /// A customer who opted in and filled in every billing field
    pub fn opted_in() -> CheckoutFields {
        CheckoutFields::new()
            .with(OPT_IN_FIELD, "1")
            .with(fields::EMAIL, "jane@example.com")
            .with(fields::FIRST_NAME, "Jane")
            .with(fields::LAST_NAME, "Doe")
            .with(fields::ADDRESS_1, "Main St 1")
            .with(fields::ADDRESS_2, "Apt 2")
            .with(fields::POSTCODE, "9000")
            .with(fields::CITY, "Ghent")
            .with(fields::PHONE, "+32 9 000 00 00")
            .with(fields::COMPANY, "Acme NV")
    }

    /// The same customer without the opt-in tick
    pub fn not_opted_in() -> CheckoutFields {
        let mut checkout = CheckoutFields::new();
        for name in [fields::EMAIL, fields::FIRST_NAME, fields::LAST_NAME] {
            if let Some(value) = Self::opted_in().raw(name) {
                checkout.insert(name, value);
            }
        }
        checkout
    }
}

pub fn site() -> SiteContext {
    SiteContext::new("Acme", "en_US")
}
