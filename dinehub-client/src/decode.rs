//! Explicit decoding of API response bodies
//!
//! Responses are validated here, once, before anything downstream reads a
//! field. Callers get either a typed value or a [`DecodeError`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Shape mismatch in a response body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected an array, got {0}")]
    NotAnArray(&'static str),

    #[error("expected an object, got {0}")]
    NotAnObject(&'static str),

    #[error("element {index}: expected an object, got {kind}")]
    ElementNotAnObject { index: usize, kind: &'static str },

    #[error("element {index}: missing or unusable id")]
    MissingId { index: usize },
}

/// Outlet detail as served by `GET /outlets/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutletSummary {
    pub id: String,
    pub name: String,
    /// Every other field the API returned
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// String ids pass through; numeric ids are rendered as text
fn id_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Decode the `GET /outlets` body into outlet ids, preserving order
pub fn decode_outlet_ids(body: &Value) -> Result<Vec<String>, DecodeError> {
    let elements = body
        .as_array()
        .ok_or_else(|| DecodeError::NotAnArray(json_kind(body)))?;

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let object = element
                .as_object()
                .ok_or(DecodeError::ElementNotAnObject {
                    index,
                    kind: json_kind(element),
                })?;
            object
                .get("id")
                .and_then(id_of)
                .ok_or(DecodeError::MissingId { index })
        })
        .collect()
}

/// Decode the `GET /outlets/{id}` body
///
/// An object without a usable `name` still renders, under a placeholder name.
pub fn decode_outlet_summary(id: &str, body: Value) -> Result<OutletSummary, DecodeError> {
    let Value::Object(mut fields) = body else {
        return Err(DecodeError::NotAnObject(json_kind(&body)));
    };
    fields.remove("id");
    let name = match fields.remove("name") {
        Some(Value::String(name)) if !name.is_empty() => name,
        _ => format!("Fallback Outlet Name {id}"),
    };
    Ok(OutletSummary {
        id: id.to_string(),
        name,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids_from_strings_and_numbers() {
        let body = json!([{ "id": "north", "name": "North" }, { "id": 7 }]);
        assert_eq!(decode_outlet_ids(&body).unwrap(), vec!["north", "7"]);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert_eq!(decode_outlet_ids(&json!([])).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_non_array_rejected() {
        assert_eq!(
            decode_outlet_ids(&json!({ "outlets": [] })),
            Err(DecodeError::NotAnArray("object"))
        );
        assert_eq!(
            decode_outlet_ids(&json!(null)),
            Err(DecodeError::NotAnArray("null"))
        );
    }

    #[test]
    fn test_element_without_id_rejected() {
        let body = json!([{ "id": "a" }, { "name": "nameless" }]);
        assert_eq!(
            decode_outlet_ids(&body),
            Err(DecodeError::MissingId { index: 1 })
        );
        let body = json!([{ "id": "" }]);
        assert_eq!(
            decode_outlet_ids(&body),
            Err(DecodeError::MissingId { index: 0 })
        );
    }

    #[test]
    fn test_scalar_element_rejected() {
        assert_eq!(
            decode_outlet_ids(&json!(["north"])),
            Err(DecodeError::ElementNotAnObject {
                index: 0,
                kind: "string"
            })
        );
    }

    #[test]
    fn test_summary_keeps_extra_fields() {
        let summary =
            decode_outlet_summary("north", json!({ "id": "north", "name": "North", "open": true }))
                .unwrap();
        assert_eq!(summary.name, "North");
        assert_eq!(summary.fields.get("open"), Some(&json!(true)));
        assert!(!summary.fields.contains_key("id"));
    }

    #[test]
    fn test_summary_without_name_gets_placeholder() {
        let summary = decode_outlet_summary("42", json!({ "description": "x" })).unwrap();
        assert_eq!(summary.name, "Fallback Outlet Name 42");
    }

    #[test]
    fn test_summary_requires_object() {
        assert_eq!(
            decode_outlet_summary("42", json!([1, 2])),
            Err(DecodeError::NotAnObject("array"))
        );
    }
}
