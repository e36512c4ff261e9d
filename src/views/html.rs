//! HTML helpers shared by the views

/// Placeholder text shown before the first reading
pub const NO_DATA: &str = "No data yet";

/// Escape text for use in element content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Empty-state block
pub fn placeholder(message: &str) -> String {
    format!(r#"<div class="placeholder">{}</div>"#, escape(message))
}

/// Format a value with a fixed number of decimals
pub fn format_value(value: f64, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("-17.2 C"), "-17.2 C");
        assert_eq!(
            escape(r#"<b a="x">&'</b>"#),
            "&lt;b a=&quot;x&quot;&gt;&amp;&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(-17.0, 1), "-17.0");
        assert_eq!(format_value(-16.85, 2), "-16.85");
    }
}
