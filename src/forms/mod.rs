//! Form parsing and sanitization.
//!
//! Incoming bodies are urlencoded field/value pairs. They are kept as an
//! ordered multimap so repeated keys (the genre checkboxes) survive parsing,
//! then normalized and checked by the declarative rules in [`rules`].

pub mod rules;

use crate::error::{AppError, AppResult};

pub use rules::{Check, FieldFailure, NormalizedForm, Rule};

/// Raw form data: ordered field/value pairs as submitted.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    /// Parse a urlencoded request body.
    pub fn parse(body: &[u8]) -> AppResult<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .map_err(|e| AppError::BadRequest(format!("Malformed form body: {}", e)))?;
        Ok(Self { pairs })
    }

    /// First submitted value for a field, if any.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// All submitted values for a field, coerced to a list: an absent field
    /// yields an empty list, a single submission a one-element list, and
    /// repeated submissions keep their order. Each element is HTML-escaped.
    pub fn values(&self, field: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(name, _)| name == field)
            .map(|(_, value)| escape_html(value))
            .collect()
    }
}

/// HTML-escape a string value.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(body: &str) -> FormData {
        FormData::parse(body.as_bytes()).unwrap()
    }

    #[test]
    fn test_first_value() {
        let f = form("title=Dune&isbn=123");
        assert_eq!(f.first("title"), Some("Dune"));
        assert_eq!(f.first("missing"), None);
    }

    #[test]
    fn test_values_absent_is_empty_list() {
        let f = form("title=Dune");
        assert!(f.values("genre").is_empty());
    }

    #[test]
    fn test_values_scalar_is_singleton() {
        let f = form("genre=g1");
        assert_eq!(f.values("genre"), vec!["g1".to_string()]);
    }

    #[test]
    fn test_values_repeated_keys_keep_order() {
        let f = form("genre=g1&title=Dune&genre=g2");
        assert_eq!(f.values("genre"), vec!["g1".to_string(), "g2".to_string()]);
    }

    #[test]
    fn test_values_are_escaped() {
        let f = form("genre=%3Cb%3E");
        assert_eq!(f.values("genre"), vec!["&lt;b&gt;".to_string()]);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("O'Neil"), "O&#x27;Neil");
        assert_eq!(escape_html("a/b \"c\""), "a&#x2F;b &quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_parse_empty_body() {
        let f = FormData::parse(b"").unwrap();
        assert_eq!(f.first("anything"), None);
    }
}
