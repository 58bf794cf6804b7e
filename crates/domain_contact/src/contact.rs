//! Mapping of checkout fields onto the remote contact record

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::text::sanitize_text;

use crate::checkout::{fields, CheckoutFields};
use crate::client::SkipReason;

/// Characters allowed in an email address after sanitization
const EMAIL_SYMBOLS: &str = "!#$%&'*+-/=?^_`{|}~.@";

/// The contact created on the mailing list (`emailAddressType` on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    #[validate(email)]
    pub email_address: String,
    pub name: String,
    pub surname: String,
    /// Two-letter code taken from the site locale
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl ContactRecord {
    /// Builds the record from a checkout
    ///
    /// Email, first name and last name are required. Postal and company
    /// fields are only read when `export_address` is set, and each one is
    /// included only if the customer filled it in.
    ///
    /// # Errors
    ///
    /// Returns the reason the checkout cannot produce a contact.
    pub fn from_checkout(
        checkout: &CheckoutFields,
        export_address: bool,
        language: &str,
    ) -> Result<Self, SkipReason> {
        let raw_email = checkout
            .raw(fields::EMAIL)
            .filter(|value| !value.trim().is_empty())
            .ok_or(SkipReason::MissingCustomerField(fields::EMAIL))?;
        let name = required(checkout, fields::FIRST_NAME)?;
        let surname = required(checkout, fields::LAST_NAME)?;

        let mut record = Self {
            email_address: sanitize_email(raw_email),
            name,
            surname,
            language: language.to_string(),
            address: None,
            zipcode: None,
            city: None,
            phone: None,
            company: None,
        };

        if record.validate().is_err() {
            return Err(SkipReason::InvalidEmail);
        }

        if export_address {
            record.address = join_address(checkout);
            record.zipcode = checkout.text(fields::POSTCODE);
            record.city = checkout.text(fields::CITY);
            // Gated on its own presence, not on the city
            record.phone = checkout.text(fields::PHONE);
            record.company = checkout.text(fields::COMPANY);
        }

        Ok(record)
    }
}

fn required(checkout: &CheckoutFields, name: &'static str) -> Result<String, SkipReason> {
    checkout
        .text(name)
        .ok_or(SkipReason::MissingCustomerField(name))
}

fn join_address(checkout: &CheckoutFields) -> Option<String> {
    let lines: Vec<String> = [fields::ADDRESS_1, fields::ADDRESS_2]
        .into_iter()
        .filter_map(|line| checkout.text(line))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

/// Strips everything from an email address that cannot be part of one
///
/// Markup and whitespace go first, then any character outside the ASCII
/// letters, digits and the symbols permitted in addresses.
pub fn sanitize_email(raw: &str) -> String {
    sanitize_text(raw)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || EMAIL_SYMBOLS.contains(*c))
        .collect()
}
