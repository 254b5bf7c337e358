use std::borrow::Cow;
use std::sync::OnceLock;

use ammonia::Builder;

/// The one sanitization policy every bot reply passes through before it is
/// treated as markup, whichever rendering path produced it.
///
/// Starts from ammonia's defaults (no scripts, no event handlers, no
/// `javascript:` URLs, no inline styles) and additionally keeps disabled
/// checkboxes so GFM task lists survive.
fn policy() -> &'static Builder<'static> {
    static POLICY: OnceLock<Builder<'static>> = OnceLock::new();
    POLICY.get_or_init(|| {
        let mut builder = Builder::default();
        builder
            .add_tags(&["input"])
            .add_tag_attributes("input", &["type", "checked", "disabled"])
            .attribute_filter(|element, attribute, value| {
                if element == "input" && attribute == "type" && value != "checkbox" {
                    None
                } else {
                    Some(Cow::Borrowed(value))
                }
            });
        builder
    })
}

pub fn sanitize_html(html: &str) -> String {
    policy().clean(html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_elements_are_removed_with_their_content() {
        let cleaned = sanitize_html("<script>alert(1)</script><b>hi</b>");
        assert_eq!(cleaned, "<b>hi</b>");
    }

    #[test]
    fn event_handlers_and_script_urls_are_stripped() {
        let cleaned = sanitize_html(
            r#"<img src="x.png" onerror="alert(1)"><a href="javascript:alert(1)">go</a>"#,
        );
        assert!(!cleaned.contains("onerror"));
        assert!(!cleaned.contains("javascript:"));
        assert!(cleaned.contains("go"));
    }

    #[test]
    fn only_checkbox_inputs_survive() {
        let cleaned =
            sanitize_html(r#"<input type="checkbox" checked disabled><input type="text">"#);
        assert!(cleaned.contains(r#"type="checkbox""#));
        assert!(!cleaned.contains(r#"type="text""#));
    }

    #[test]
    fn safe_formatting_is_kept() {
        let cleaned = sanitize_html("<p>Use <code>ls</code> and <em>relax</em></p>");
        assert_eq!(cleaned, "<p>Use <code>ls</code> and <em>relax</em></p>");
    }
}
