//! Field readers for raw RPC documents
//!
//! Every reader reports the dotted path of the offending field so that a
//! `MalformedOutcome` points straight at the bad input.

use crate::{OutcomeError, Result, StatusPayload};
use serde_json::{Map, Value};

pub(crate) fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

pub(crate) fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        let field = if path.is_empty() { "<root>" } else { path };
        OutcomeError::malformed(field, format!("expected an object, got {}", type_name(value)))
    })
}

pub(crate) fn required<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a Value> {
    match obj.get(key) {
        Some(Value::Null) | None => Err(OutcomeError::malformed(join(path, key), "missing")),
        Some(value) => Ok(value),
    }
}

pub(crate) fn string(obj: &Map<String, Value>, key: &str, path: &str) -> Result<String> {
    let value = required(obj, key, path)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| expected(path, key, "a string", value))
}

pub(crate) fn optional_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>> {
    match obj.get(key) {
        Some(Value::Null) | None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(expected(path, key, "a string", other)),
    }
}

pub(crate) fn unsigned(obj: &Map<String, Value>, key: &str, path: &str) -> Result<u64> {
    let value = required(obj, key, path)?;
    value.as_u64().ok_or_else(|| non_negative(path, key, value))
}

pub(crate) fn optional_unsigned(obj: &Map<String, Value>, key: &str, path: &str) -> Result<u64> {
    match obj.get(key) {
        Some(Value::Null) | None => Ok(0),
        Some(value) => value.as_u64().ok_or_else(|| non_negative(path, key, value)),
    }
}

/// Balances travel as decimal strings because they overflow JSON numbers.
pub(crate) fn optional_u128(obj: &Map<String, Value>, key: &str, path: &str) -> Result<u128> {
    match obj.get(key) {
        Some(Value::Null) | None => Ok(0),
        Some(Value::String(s)) => s.trim().parse::<u128>().map_err(|e| {
            OutcomeError::malformed(join(path, key), format!("invalid amount {:?}: {}", s, e))
        }),
        Some(value) => value
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| non_negative(path, key, value)),
    }
}

pub(crate) fn string_list(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Vec<String>> {
    let items = match obj.get(key) {
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(expected(path, key, "an array", other)),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                OutcomeError::malformed(
                    format!("{}[{}]", join(path, key), i),
                    format!("expected a string, got {}", type_name(item)),
                )
            })
        })
        .collect()
}

pub(crate) fn value_list(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Vec<Value>> {
    match obj.get(key) {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(other) => Err(expected(path, key, "an array", other)),
    }
}

pub(crate) fn status(value: &Value, field: String) -> Result<StatusPayload> {
    match value {
        Value::Object(_) | Value::String(_) => serde_json::from_value(value.clone())
            .map_err(|e| OutcomeError::malformed(field, e.to_string())),
        other => Err(OutcomeError::malformed(
            field,
            format!("expected an object or a string, got {}", type_name(other)),
        )),
    }
}

fn non_negative(path: &str, key: &str, value: &Value) -> OutcomeError {
    let reason = match value {
        Value::Number(n) if n.as_i64().is_some() => format!("must be non-negative, got {}", n),
        Value::Number(n) => format!("must be an integer, got {}", n),
        other => format!("expected an integer, got {}", type_name(other)),
    };
    OutcomeError::malformed(join(path, key), reason)
}

fn expected(path: &str, key: &str, what: &str, value: &Value) -> OutcomeError {
    OutcomeError::malformed(
        join(path, key),
        format!("expected {}, got {}", what, type_name(value)),
    )
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_missing_field_reports_path() {
        let o = obj(json!({"logs": []}));
        let err = unsigned(&o, "gas_burnt", "transaction_outcome.outcome").unwrap_err();
        assert_eq!(
            err,
            OutcomeError::malformed("transaction_outcome.outcome.gas_burnt", "missing")
        );
    }

    #[test]
    fn test_negative_and_fractional_integers() {
        let o = obj(json!({"a": -5, "b": 1.5, "c": "7"}));
        assert!(unsigned(&o, "a", "")
            .unwrap_err()
            .to_string()
            .contains("must be non-negative"));
        assert!(unsigned(&o, "b", "")
            .unwrap_err()
            .to_string()
            .contains("must be an integer"));
        assert!(unsigned(&o, "c", "").is_err());
    }

    #[test]
    fn test_amount_strings() {
        let o = obj(json!({"t": "242794862551300000000", "n": 12, "bad": "12x"}));
        assert_eq!(optional_u128(&o, "t", "").unwrap(), 242_794_862_551_300_000_000);
        assert_eq!(optional_u128(&o, "n", "").unwrap(), 12);
        assert_eq!(optional_u128(&o, "missing", "").unwrap(), 0);
        assert!(optional_u128(&o, "bad", "").is_err());
    }

    #[test]
    fn test_string_list_item_path() {
        let o = obj(json!({"logs": ["ok", 3]}));
        let err = string_list(&o, "logs", "outcome").unwrap_err();
        assert_eq!(
            err,
            OutcomeError::malformed("outcome.logs[1]", "expected a string, got a number")
        );
    }
}
