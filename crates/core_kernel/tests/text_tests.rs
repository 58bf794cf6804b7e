//! Property tests for plain-text sanitization

use core_kernel::text::sanitize_text;
use proptest::prelude::*;

proptest! {
    #[test]
    fn sanitized_text_is_single_trimmed_line(input in "\\PC*") {
        let output = sanitize_text(&input);
        prop_assert!(!output.contains('\n'));
        prop_assert!(!output.contains('\t'));
        prop_assert_eq!(output.trim(), output.as_str());
        prop_assert!(!output.contains("  "));
    }

    #[test]
    fn sanitizing_twice_changes_nothing(input in "[a-zA-Z0-9 <>/\\t\\n]{0,64}") {
        let once = sanitize_text(&input);
        prop_assert_eq!(sanitize_text(&once), once.clone());
    }
}

#[test]
fn test_plain_text_is_untouched() {
    assert_eq!(sanitize_text("Acme Store"), "Acme Store");
}

#[test]
fn test_markup_in_label_is_removed() {
    assert_eq!(
        sanitize_text("Yes, sign me <em>up</em>!"),
        "Yes, sign me up!"
    );
}
