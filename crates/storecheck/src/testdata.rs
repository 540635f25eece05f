//! Literal test fixtures loaded from a JSON document.

use crate::result::{ShopError, ShopResult};
use serde_json::{Map, Value};
use std::path::Path;

/// Read-only mapping from key to scalar or sequence fixture values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestData {
    values: Map<String, Value>,
}

impl TestData {
    /// Load fixtures from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ShopResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ShopError::DataLoad {
            message: format!("{}: {e}", path.display()),
        })?;
        let data = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), keys = data.values.len(), "loaded test data");
        Ok(data)
    }

    /// Parse fixtures from JSON text; the document must be an object
    pub fn from_json_str(text: &str) -> ShopResult<Self> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(values)) => Ok(Self { values }),
            Ok(other) => Err(ShopError::DataLoad {
                message: format!("expected a JSON object, found {}", kind(&other)),
            }),
            Err(e) => Err(ShopError::DataLoad {
                message: e.to_string(),
            }),
        }
    }

    /// Scalar value as a string, `None` when absent.
    ///
    /// Numbers and booleans are rendered in their JSON form; sequences,
    /// objects and `null` read as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Integer value; integer-looking strings are accepted
    pub fn get_int(&self, key: &str) -> ShopResult<i64> {
        let value = self.values.get(key).ok_or_else(|| ShopError::MissingDataKey {
            key: key.to_string(),
        })?;
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| mismatch(key, "integer", value))
    }

    /// Sequence value, order preserved.
    ///
    /// Fails with `TypeMismatch` when the value is absent or not a sequence.
    /// Non-string items are rendered in their JSON form.
    pub fn get_list(&self, key: &str) -> ShopResult<Vec<String>> {
        match self.values.get(key) {
            Some(Value::Array(items)) => Ok(items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()),
            Some(other) => Err(mismatch(key, "sequence", other)),
            None => Err(ShopError::TypeMismatch {
                key: key.to_string(),
                expected: "sequence",
                found: "nothing".to_string(),
            }),
        }
    }

    /// Authorization header value
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.get("token")
    }

    /// user-agent header value
    #[must_use]
    pub fn user_agent(&self) -> Option<String> {
        self.get("user_agent")
    }

    /// Content-Type header value
    #[must_use]
    pub fn content_type(&self) -> Option<String> {
        self.get("content_type")
    }

    /// Whether `key` is present at all
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

fn mismatch(key: &str, expected: &'static str, found: &Value) -> ShopError {
    ShopError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: kind(found).to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TestData {
        TestData::from_json_str(
            r#"{
                "token": "Bearer abc",
                "user_agent": "storecheck/1.0",
                "content_type": "application/json",
                "retries": 3,
                "shard": "12",
                "search_phrase_positive": ["Гарри Поттер", "Толстой", "Дюна"],
                "number_phone_invalid": [1234, "+7 000"]
            }"#,
        )
        .unwrap()
    }

    mod scalar_tests {
        use super::*;

        #[test]
        fn test_get_string() {
            assert_eq!(sample().get("token").as_deref(), Some("Bearer abc"));
        }

        #[test]
        fn test_get_absent_is_none() {
            assert_eq!(sample().get("cookie"), None);
        }

        #[test]
        fn test_get_number_renders() {
            assert_eq!(sample().get("retries").as_deref(), Some("3"));
        }

        #[test]
        fn test_header_accessors() {
            let data = sample();
            assert_eq!(data.user_agent().as_deref(), Some("storecheck/1.0"));
            assert_eq!(data.content_type().as_deref(), Some("application/json"));
        }
    }

    mod int_tests {
        use super::*;

        #[test]
        fn test_get_int_number() {
            assert_eq!(sample().get_int("retries").unwrap(), 3);
        }

        #[test]
        fn test_get_int_numeric_string() {
            assert_eq!(sample().get_int("shard").unwrap(), 12);
        }

        #[test]
        fn test_get_int_absent() {
            assert!(matches!(
                sample().get_int("missing"),
                Err(ShopError::MissingDataKey { .. })
            ));
        }

        #[test]
        fn test_get_int_wrong_type() {
            assert!(matches!(
                sample().get_int("token"),
                Err(ShopError::TypeMismatch { expected: "integer", .. })
            ));
        }
    }

    mod list_tests {
        use super::*;

        #[test]
        fn test_get_list_preserves_order() {
            assert_eq!(
                sample().get_list("search_phrase_positive").unwrap(),
                vec!["Гарри Поттер", "Толстой", "Дюна"]
            );
        }

        #[test]
        fn test_get_list_mixed_items() {
            assert_eq!(
                sample().get_list("number_phone_invalid").unwrap(),
                vec!["1234", "+7 000"]
            );
        }

        #[test]
        fn test_get_list_on_scalar_is_mismatch() {
            let err = sample().get_list("token").unwrap_err();
            assert!(matches!(
                err,
                ShopError::TypeMismatch { ref found, .. } if found == "string"
            ));
        }

        #[test]
        fn test_get_list_on_absent_is_mismatch() {
            assert!(matches!(
                sample().get_list("nope"),
                Err(ShopError::TypeMismatch { .. })
            ));
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn test_non_object_document_rejected() {
            assert!(matches!(
                TestData::from_json_str("[1, 2]"),
                Err(ShopError::DataLoad { .. })
            ));
        }

        #[test]
        fn test_invalid_json_rejected() {
            assert!(matches!(
                TestData::from_json_str("{token:"),
                Err(ShopError::DataLoad { .. })
            ));
        }

        #[test]
        fn test_load_missing_file() {
            assert!(matches!(
                TestData::load("/no/such/test_data.json"),
                Err(ShopError::DataLoad { .. })
            ));
        }
    }
}
