use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TypesError, TypesResult};

/// Default cap on array/object nesting accepted by [`LogRecord::from_slice`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A single log payload of arbitrary JSON shape.
///
/// Built per request from the decoded body and consumed right away by the
/// sink. Rendering is total: every variant of [`Value`] has a JSON text form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogRecord(Value);

impl LogRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Decode a record from a raw request body, nesting up to
    /// [`DEFAULT_MAX_DEPTH`] levels.
    ///
    /// Empty input and trailing garbage are both rejected.
    pub fn from_slice(bytes: &[u8]) -> TypesResult<Self> {
        Self::from_slice_with_depth(bytes, DEFAULT_MAX_DEPTH)
    }

    /// Decode a record, rejecting bodies nested deeper than `max_depth`
    /// arrays/objects with [`TypesError::TooDeep`].
    ///
    /// The depth is measured by a flat scan before parsing, so the parser's
    /// own recursion limit is lifted and `max_depth` is the only cap.
    pub fn from_slice_with_depth(bytes: &[u8], max_depth: usize) -> TypesResult<Self> {
        if nesting_exceeds(bytes, max_depth) {
            return Err(TypesError::TooDeep { limit: max_depth });
        }
        let mut de = serde_json::Deserializer::from_slice(bytes);
        de.disable_recursion_limit();
        let value = Value::deserialize(&mut de)?;
        de.end()?;
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Compact JSON text of the payload. Never contains a raw newline.
    pub fn render(&self) -> String {
        self.0.to_string()
    }
}

/// Whether `[`/`{` nesting outside string literals goes past `limit`.
fn nesting_exceeds(bytes: &[u8], limit: usize) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for &b in bytes {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                if depth > limit {
                    return true;
                }
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}

impl From<Value> for LogRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            ".*".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 64, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::hash_map(".*", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    #[test]
    fn decode_object() {
        let record = LogRecord::from_slice(br#"{"user": "alice", "action": "login"}"#).unwrap();
        assert_eq!(record.as_value(), &json!({"user": "alice", "action": "login"}));
    }

    #[test]
    fn decode_null() {
        let record = LogRecord::from_slice(b"null").unwrap();
        assert_eq!(record.render(), "null");
    }

    #[test]
    fn decode_rejects_empty_and_garbage() {
        assert!(LogRecord::from_slice(b"").is_err());
        assert!(LogRecord::from_slice(b"{\"a\":").is_err());
        assert!(LogRecord::from_slice(b"{} trailing").is_err());
        assert!(LogRecord::from_slice(b"user=alice").is_err());
    }

    fn nested_arrays(depth: usize) -> String {
        format!("{}{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn decode_deeply_nested_body() {
        let body = nested_arrays(200);
        let record = LogRecord::from_slice(body.as_bytes()).unwrap();
        assert_eq!(record.render(), body);
    }

    #[test]
    fn decode_up_to_default_depth() {
        let body = nested_arrays(DEFAULT_MAX_DEPTH);
        assert!(LogRecord::from_slice(body.as_bytes()).is_ok());

        let body = nested_arrays(DEFAULT_MAX_DEPTH + 1);
        let err = LogRecord::from_slice(body.as_bytes()).unwrap_err();
        assert!(matches!(err, TypesError::TooDeep { limit } if limit == DEFAULT_MAX_DEPTH));
    }

    #[test]
    fn custom_depth_cap() {
        let body = br#"{"a":{"b":{"c":1}}}"#;
        assert!(LogRecord::from_slice_with_depth(body, 3).is_ok());
        let err = LogRecord::from_slice_with_depth(body, 2).unwrap_err();
        assert_eq!(err.to_string(), "JSON body nests deeper than 2 levels");
    }

    #[test]
    fn brackets_inside_strings_do_not_count() {
        let body = br#"{"text":"[[[[{{{{\"]]]]"}"#;
        let record = LogRecord::from_slice_with_depth(body, 1).unwrap();
        assert_eq!(record.as_value()["text"], "[[[[{{{{\"]]]]");
    }

    #[test]
    fn render_escapes_newlines_in_strings() {
        let record = LogRecord::new(json!({"msg": "line one\nline two\r\n"}));
        let text = record.render();
        assert!(!text.contains('\n'));
        assert!(!text.contains('\r'));
        assert!(text.contains("\\n"));
    }

    #[test]
    fn serializes_transparently() {
        let record = LogRecord::new(json!([1, "two", null]));
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"[1,"two",null]"#);
    }

    proptest! {
        #[test]
        fn render_is_one_line_and_faithful(value in arb_json()) {
            let record = LogRecord::new(value.clone());
            let text = record.render();
            prop_assert!(!text.contains('\n'));
            let reparsed: Value = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(reparsed, value);
        }
    }
}
