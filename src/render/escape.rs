use std::borrow::Cow;

/// Escape text for HTML element content and quoted attribute values.
///
/// Covers `&`, `<`, `>`, `"` and `'`. Borrows when nothing needs escaping.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_html("Jane Doe"), Cow::Borrowed("Jane Doe")));
    }

    #[test]
    fn script_tag_is_neutralised() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"
        );
    }

    #[test]
    fn ampersand_first() {
        assert_eq!(escape_html("a&lt;b \"c\""), "a&amp;lt;b &quot;c&quot;");
    }
}
