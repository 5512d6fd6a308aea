//! XML character escaping.
//!
//! Every attribute value and text node the serializer emits passes through
//! [`escape_xml`]; nothing is ever written unescaped.

/// Escape the five reserved XML characters (`< > & " '`).
///
/// Runs in a single pass so an already-produced entity is never re-escaped.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Decode the five entities produced by [`escape_xml`].
///
/// Only `&lt; &gt; &amp; &quot; &apos;` are recognized; any other `&`
/// sequence is passed through untouched. Not a general XML entity decoder.
#[must_use]
pub fn unescape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let mut decoded = None;
        for (entity, ch) in [
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&amp;", '&'),
            ("&quot;", '"'),
            ("&apos;", '\''),
        ] {
            if let Some(tail) = rest.strip_prefix(entity) {
                decoded = Some((ch, tail));
                break;
            }
        }
        match decoded {
            Some((ch, tail)) => {
                out.push(ch);
                rest = tail;
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
