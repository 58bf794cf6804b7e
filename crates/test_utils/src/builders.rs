//! Test Data Builders

use fake::faker::address::en::{BuildingNumber, CityName, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;

use domain_contact::checkout::fields;
use domain_contact::CheckoutFields;
use domain_settings::OPT_IN_FIELD;

/// Builds checkout posts filled with generated customer data
pub struct CheckoutFieldsBuilder {
    fields: CheckoutFields,
    opted_in: bool,
}

impl Default for CheckoutFieldsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFieldsBuilder {
    /// Starts with a generated email, first name and last name, opted in
    pub fn new() -> Self {
        let fields = CheckoutFields::new()
            .with(fields::EMAIL, SafeEmail().fake::<String>())
            .with(fields::FIRST_NAME, FirstName().fake::<String>())
            .with(fields::LAST_NAME, LastName().fake::<String>());

        Self {
            fields,
            opted_in: true,
        }
    }

    /// Adds generated postal, phone and company fields
    pub fn with_address(mut self) -> Self {
        let street = format!(
            "{} {}",
            StreetName().fake::<String>(),
            BuildingNumber().fake::<String>()
        );
        self.fields.insert(fields::ADDRESS_1, street);
        self.fields.insert(fields::POSTCODE, ZipCode().fake::<String>());
        self.fields.insert(fields::CITY, CityName().fake::<String>());
        self.fields.insert(fields::PHONE, PhoneNumber().fake::<String>());
        self.fields.insert(fields::COMPANY, CompanyName().fake::<String>());
        self
    }

    pub fn without_opt_in(mut self) -> Self {
        self.opted_in = false;
        self
    }

    /// Sets any field to a fixed value
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name, value);
        self
    }

    pub fn build(self) -> CheckoutFields {
        if self.opted_in {
            self.fields.with(OPT_IN_FIELD, "1")
        } else {
            self.fields
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_checkout_has_required_fields() {
        let checkout = CheckoutFieldsBuilder::new().with_address().build();

        assert!(checkout.opted_in());
        assert!(checkout.text(fields::EMAIL).is_some());
        assert!(checkout.text(fields::FIRST_NAME).is_some());
        assert!(checkout.text(fields::CITY).is_some());
    }

    #[test]
    fn test_without_opt_in() {
        assert!(!CheckoutFieldsBuilder::new().without_opt_in().build().opted_in());
    }
}
