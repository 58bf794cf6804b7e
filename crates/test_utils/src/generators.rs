//! Property-Based Test Generators

use proptest::prelude::*;

use core_kernel::{ApiUserId, MailingListId};
use domain_settings::Settings;

/// Strategy for form input that cannot be read as a number
pub fn non_numeric_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z _-]{0,15}"
}

/// Strategy for form input carrying an unsigned integer, possibly padded
pub fn numeric_input_strategy() -> impl Strategy<Value = (u64, String)> {
    (0u64..1_000_000, " {0,2}", " {0,2}")
        .prop_map(|(n, lead, trail)| (n, format!("{}{}{}", lead, n, trail)))
}

/// Strategy for arbitrary free text, including markup and control characters
pub fn free_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~]{0,40}",
        "<[a-z]{1,6}>[a-zA-Z ]{0,20}</[a-z]{1,6}>",
        "[a-z]{0,10}[\t\n\r]{1,3}[a-z]{0,10}",
    ]
}

/// Strategy for settings records in any combination of set and unset fields
pub fn settings_strategy() -> impl Strategy<Value = Settings> {
    (
        proptest::option::of(0u64..100_000),
        proptest::option::of("[a-z0-9]{0,12}"),
        proptest::option::of(0u64..1_000),
        proptest::option::of("[a-zA-Z !]{0,24}"),
        proptest::option::of(any::<bool>()),
        proptest::option::of("[a-zA-Z ]{0,12}"),
    )
        .prop_map(|(user, token, list, label, export, source)| Settings {
            api_user_id: user.map(ApiUserId::new),
            api_user_token: token,
            mailing_list_id: list.map(MailingListId::new),
            checkbox_label: label,
            export_address: export,
            source_name: source,
            saved_at: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::text::sanitize_text;
    use domain_settings::{coerce_numeric, CheckoutOptInField, SettingsSubmission};

    proptest! {
        #[test]
        fn padded_numbers_coerce_to_their_value((value, raw) in numeric_input_strategy()) {
            prop_assert_eq!(coerce_numeric(&raw), Some(value));
        }

        #[test]
        fn non_numeric_input_coerces_to_nothing(raw in non_numeric_strategy()) {
            prop_assert_eq!(coerce_numeric(&raw), None);
        }

        #[test]
        fn sanitized_text_is_stable(raw in free_text_strategy()) {
            let once = sanitize_text(&raw);
            prop_assert_eq!(sanitize_text(&once), once.clone());
            prop_assert!(!once.contains('\n'));
        }

        #[test]
        fn empty_submission_keeps_any_record(settings in settings_strategy()) {
            prop_assert_eq!(SettingsSubmission::default().merge_into(settings.clone()), settings);
        }

        #[test]
        fn opt_in_field_shown_iff_anything_saved(settings in settings_strategy()) {
            prop_assert_eq!(CheckoutOptInField::render(&settings).is_some(), !settings.is_empty());
        }
    }
}
