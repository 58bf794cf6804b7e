//! Customer-entered checkout fields

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use core_kernel::text::sanitize_text;
use domain_settings::OPT_IN_FIELD;

/// Names of the billing fields read from a checkout post
pub mod fields {
    pub const EMAIL: &str = "billing_email";
    pub const FIRST_NAME: &str = "billing_first_name";
    pub const LAST_NAME: &str = "billing_last_name";
    pub const ADDRESS_1: &str = "billing_address_1";
    pub const ADDRESS_2: &str = "billing_address_2";
    pub const POSTCODE: &str = "billing_postcode";
    pub const CITY: &str = "billing_city";
    pub const PHONE: &str = "billing_phone";
    pub const COMPANY: &str = "billing_company";
}

/// Raw field values posted with a completed checkout
///
/// Deserializes from a flat JSON object. Non-string scalars are kept in
/// their textual form and `null` counts as a missing field, so a posted
/// `"newsletter_opt_in": true` is an opt-in while `null` is not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CheckoutFields(HashMap<String, String>);

impl CheckoutFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns true if the customer ticked the opt-in checkbox
    ///
    /// Only presence counts; the posted value is irrelevant.
    pub fn opted_in(&self) -> bool {
        self.0.contains_key(OPT_IN_FIELD)
    }

    /// Returns the value exactly as posted
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns the sanitized value, or `None` if nothing is left of it
    pub fn text(&self, name: &str) -> Option<String> {
        self.raw(name)
            .map(sanitize_text)
            .filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CheckoutFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for CheckoutFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(text) => Some((name, text)),
                other => Some((name, other.to_string())),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_opt_in_is_presence_only() {
        assert!(CheckoutFields::new().with(OPT_IN_FIELD, "").opted_in());
        assert!(CheckoutFields::new().with(OPT_IN_FIELD, "0").opted_in());
        assert!(!CheckoutFields::new().with(fields::EMAIL, "a@b.test").opted_in());
    }

    #[test]
    fn test_text_sanitizes_and_drops_blank() {
        let checkout = CheckoutFields::new()
            .with(fields::CITY, "  Ghent\n")
            .with(fields::COMPANY, "<br>");

        assert_eq!(checkout.text(fields::CITY).as_deref(), Some("Ghent"));
        assert_eq!(checkout.text(fields::COMPANY), None);
        assert_eq!(checkout.text(fields::PHONE), None);
    }

    #[test]
    fn test_deserialize_scalars() {
        let checkout: CheckoutFields = serde_json::from_value(json!({
            "newsletter_opt_in": true,
            "billing_postcode": 9000,
            "billing_phone": null
        }))
        .unwrap();

        assert!(checkout.opted_in());
        assert_eq!(checkout.raw(fields::POSTCODE), Some("9000"));
        assert_eq!(checkout.raw(fields::PHONE), None);
    }

    #[test]
    fn test_null_opt_in_is_not_an_opt_in() {
        let checkout: CheckoutFields =
            serde_json::from_value(json!({ "newsletter_opt_in": null })).unwrap();
        assert!(!checkout.opted_in());
    }
}
