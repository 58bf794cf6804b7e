//! Plain-text sanitization
//!
//! Values typed into the settings forms and the checkout form end up in log
//! lines, in the checkout page and at the mailing-list service. They are all
//! reduced to a single line of plain text first.

/// Reduces arbitrary user input to a single line of plain text
///
/// Markup tags are removed, control characters dropped, runs of whitespace
/// collapsed to one space and the result trimmed. A lone `<` that does not
/// open a tag is kept as-is.
///
/// # Examples
///
/// ```rust
/// use core_kernel::text::sanitize_text;
///
/// assert_eq!(sanitize_text("  Join <b>our</b>\n newsletter "), "Join our newsletter");
/// assert_eq!(sanitize_text("1 < 2"), "1 < 2");
/// ```
pub fn sanitize_text(input: &str) -> String {
    let printable: String = input
        .chars()
        .filter(|c| c.is_whitespace() || !c.is_control())
        .collect();

    // Removing one tag can expose another, as in `<<a>b>`
    let mut stripped = strip_tags(&printable);
    loop {
        let again = strip_tags(&stripped);
        if again == stripped {
            break;
        }
        stripped = again;
    }

    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    for c in stripped.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Removes `<...>` tags, leaving their inner text in place
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let opens_tag = after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!' || c == '?');

        match after.find('>') {
            Some(end) if opens_tag => {
                out.push_str(&rest[..start]);
                rest = &after[end + 1..];
            }
            // Unterminated tag: drop the remainder like a browser would
            None if opens_tag => {
                out.push_str(&rest[..start]);
                rest = "";
            }
            _ => {
                out.push_str(&rest[..=start]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Returns the trimmed value if it is non-empty
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_collapses_whitespace() {
        assert_eq!(
            sanitize_text("<script>alert(1)</script>  Hello\t\tworld "),
            "alert(1) Hello world"
        );
    }

    #[test]
    fn test_unterminated_tag_is_dropped() {
        assert_eq!(sanitize_text("Acme <img src=x"), "Acme");
    }

    #[test]
    fn test_keeps_comparison_operators() {
        assert_eq!(sanitize_text("3 < 4 and 5 > 2"), "3 < 4 and 5 > 2");
    }

    #[test]
    fn test_drops_control_characters() {
        assert_eq!(sanitize_text("Main\u{0007} St"), "Main St");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  x ")), Some("x"));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }
}
