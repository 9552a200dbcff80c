//! # URI Value Encoding
//!
//! Renders filter values for the query string and vertex ids for the path.
//!
//! The two positions need different escaping: a query string is form
//! encoded (space as `+`), while a path segment reads `+` literally and
//! must carry a space as `%20`.

use crate::types::PropertyValue;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use url::form_urlencoded;

// everything except the RFC 3986 unreserved set
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Form-urlencode a piece of text (spaces become `+`).
#[must_use]
pub fn encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// Render a filter value for the `_properties` clause.
///
/// Strings are encoded. Numbers and booleans are written as plain text;
/// a float always keeps its fractional part (`1.0`, never `1`) so the
/// server does not read it back as an integer.
#[must_use]
pub fn uri_cast(value: &PropertyValue) -> String {
    match value {
        PropertyValue::String(s) => encode(s),
        PropertyValue::Float(x) => format!("{x:?}"),
        PropertyValue::Integer(_) | PropertyValue::Boolean(_) => value.to_string(),
    }
}

/// Render an opaque element id as one percent-encoded path segment.
#[must_use]
pub fn encode_id(id: &Value) -> String {
    match id {
        Value::String(s) => utf8_percent_encode(s, PATH_SEGMENT).to_string(),
        other => utf8_percent_encode(&other.to_string(), PATH_SEGMENT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_are_plain() {
        assert_eq!(uri_cast(&PropertyValue::Integer(30)), "30");
        assert_eq!(uri_cast(&PropertyValue::Integer(-7)), "-7");
        assert_eq!(uri_cast(&PropertyValue::Float(0.5)), "0.5");
        assert_eq!(uri_cast(&PropertyValue::Float(1.0)), "1.0");
        assert_eq!(uri_cast(&PropertyValue::Float(-3.0)), "-3.0");
        assert_eq!(uri_cast(&PropertyValue::Boolean(false)), "false");
    }

    #[test]
    fn strings_are_encoded() {
        assert_eq!(uri_cast(&"marko".into()), "marko");
        assert_eq!(uri_cast(&"a b&c=d".into()), "a+b%26c%3Dd");
        assert_eq!(uri_cast(&"[x,y]".into()), "%5Bx%2Cy%5D");
    }

    #[test]
    fn ids_keep_their_text() {
        assert_eq!(encode_id(&json!(1)), "1");
        assert_eq!(encode_id(&json!("#9:1")), "%239%3A1");
    }

    #[test]
    fn ids_are_path_encoded() {
        assert_eq!(encode_id(&json!("a b")), "a%20b");
        assert_eq!(encode_id(&json!("a+b")), "a%2Bb");
        assert_eq!(encode_id(&json!("x/y")), "x%2Fy");
        assert_eq!(encode_id(&json!("v-1.2_~")), "v-1.2_~");
    }
}
