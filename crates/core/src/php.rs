//! PHP literal formatting
//!
//! Every scalar that ends up in generated source goes through these helpers
//! so quoting is consistent across artifacts.

/// Render a double-quoted PHP string literal.
///
/// Backslashes, double quotes and `$` are escaped so the value is never
/// interpolated.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a boolean as a lowercase PHP literal.
pub fn bool_literal(v: bool) -> &'static str {
    if v { "true" } else { "false" }
}

/// Render an optional string as a quoted literal or `null`.
pub fn optional_string_literal(v: Option<&str>) -> String {
    match v {
        Some(s) => string_literal(s),
        None => "null".to_string(),
    }
}

/// Render a list of strings as a short-array literal (`["a", "b"]`).
pub fn string_list_literal<S: AsRef<str>>(items: &[S]) -> String {
    let inner: Vec<String> = items.iter().map(|s| string_literal(s.as_ref())).collect();
    format!("[{}]", inner.join(", "))
}

/// Render a float so PHP always reads it back as a float (`1` → `1.0`).
pub fn float_literal(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("Product Model"), "\"Product Model\"");
        assert_eq!(string_literal("a\"b"), "\"a\\\"b\"");
        assert_eq!(string_literal("$price"), "\"\\$price\"");
        assert_eq!(string_literal("C:\\tmp"), "\"C:\\\\tmp\"");
        assert_eq!(string_literal("{url here}"), "\"{url here}\"");
    }

    #[test]
    fn test_bool_and_optional() {
        assert_eq!(bool_literal(true), "true");
        assert_eq!(bool_literal(false), "false");
        assert_eq!(optional_string_literal(None), "null");
        assert_eq!(optional_string_literal(Some("x")), "\"x\"");
    }

    #[test]
    fn test_string_list_literal() {
        let empty: [&str; 0] = [];
        assert_eq!(string_list_literal(&empty), "[]");
        assert_eq!(string_list_literal(&["a", "b"]), "[\"a\", \"b\"]");
    }

    #[test]
    fn test_float_literal() {
        assert_eq!(float_literal(1.0), "1.0");
        assert_eq!(float_literal(2.5), "2.5");
    }
}
