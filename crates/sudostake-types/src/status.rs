//! Status payloads for transactions and receipts
//!
//! NEAR reports execution status as a single-key object (`{"SuccessValue": ""}`,
//! `{"Failure": {...}}`) or, for transactions that have not run yet, as a bare
//! string (`"Started"`). The payload is kept open-ended; classification is a
//! read-only view on top of it.

use crate::{OutcomeError, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Status key for a successful execution with a return value
pub const SUCCESS_VALUE: &str = "SuccessValue";
/// Status key for a receipt that succeeded by spawning another receipt
pub const SUCCESS_RECEIPT_ID: &str = "SuccessReceiptId";
/// Status key for a failed execution
pub const FAILURE: &str = "Failure";

const NOT_STARTED: &str = "NotStarted";
const STARTED: &str = "Started";

/// Open-ended status mapping reported by the protocol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStatus")]
pub struct StatusPayload(Map<String, Value>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Object(Map<String, Value>),
    Tag(String),
}

impl From<RawStatus> for StatusPayload {
    fn from(raw: RawStatus) -> Self {
        match raw {
            RawStatus::Object(map) => Self(map),
            RawStatus::Tag(tag) => {
                let mut map = Map::new();
                map.insert(tag, Value::Null);
                Self(map)
            }
        }
    }
}

impl From<Map<String, Value>> for StatusPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Classification of a status payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind<'a> {
    /// Succeeded; carries the base64 return value (`""` when nothing was returned)
    SuccessValue(&'a str),
    /// Succeeded by handing off to another receipt
    SuccessReceiptId(&'a str),
    /// Failed; carries the raw failure detail
    Failure(&'a Value),
    /// Not started or still running
    Pending,
    /// Anything this model does not recognise
    Unknown,
}

impl StatusKind<'_> {
    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::SuccessValue(_) | Self::SuccessReceiptId(_) => "success",
            Self::Failure(_) => "failure",
            Self::Pending => "pending",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StatusKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl StatusPayload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `SuccessValue` payload
    pub fn success_value(value: impl Into<String>) -> Self {
        Self::single(SUCCESS_VALUE, Value::String(value.into()))
    }

    /// Create a `SuccessReceiptId` payload
    pub fn success_receipt_id(receipt_id: impl Into<String>) -> Self {
        Self::single(SUCCESS_RECEIPT_ID, Value::String(receipt_id.into()))
    }

    /// Create a `Failure` payload
    pub fn failure(detail: Value) -> Self {
        Self::single(FAILURE, detail)
    }

    fn single(key: &str, value: Value) -> Self {
        let mut map = Map::new();
        map.insert(key.to_string(), value);
        Self(map)
    }

    /// Get a raw entry
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the underlying mapping
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying mapping
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Check if the payload carries no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Classify the payload. `Failure` wins over any other key.
    pub fn kind(&self) -> StatusKind<'_> {
        if let Some(detail) = self.0.get(FAILURE) {
            return StatusKind::Failure(detail);
        }
        if let Some(value) = self.0.get(SUCCESS_VALUE) {
            return match value.as_str() {
                Some(v) => StatusKind::SuccessValue(v),
                None => StatusKind::Unknown,
            };
        }
        if let Some(value) = self.0.get(SUCCESS_RECEIPT_ID) {
            return match value.as_str() {
                Some(id) => StatusKind::SuccessReceiptId(id),
                None => StatusKind::Unknown,
            };
        }
        if self.0.contains_key(NOT_STARTED) || self.0.contains_key(STARTED) {
            return StatusKind::Pending;
        }
        StatusKind::Unknown
    }

    /// Check if execution succeeded
    pub fn is_success(&self) -> bool {
        matches!(
            self.kind(),
            StatusKind::SuccessValue(_) | StatusKind::SuccessReceiptId(_)
        )
    }

    /// Check if execution failed
    pub fn is_failure(&self) -> bool {
        matches!(self.kind(), StatusKind::Failure(_))
    }

    /// Check if execution has not finished
    pub fn is_pending(&self) -> bool {
        matches!(self.kind(), StatusKind::Pending)
    }

    /// Raw failure detail, if any
    pub fn failure_detail(&self) -> Option<&Value> {
        self.0.get(FAILURE)
    }

    /// The `ActionError.kind` object of a failure.
    ///
    /// Returns `None` when there is no failure (or the failure detail is
    /// empty), and an empty object when the failure is not an action error
    /// or carries no `kind`.
    pub fn failure_kind(&self) -> Option<Value> {
        let failure = self.0.get(FAILURE).filter(|v| is_truthy(v))?;
        let kind = failure
            .get("ActionError")
            .and_then(|action| action.get("kind"))
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        Some(kind)
    }

    /// The contract panic message of a `FunctionCallError.ExecutionError`
    pub fn execution_error(&self) -> Option<String> {
        self.failure_kind()?
            .get("FunctionCallError")?
            .get("ExecutionError")?
            .as_str()
            .map(str::to_string)
    }

    /// One-line description of a failure, preferring the contract panic message
    pub fn failure_summary(&self) -> Option<String> {
        if let Some(message) = self.execution_error() {
            return Some(message);
        }
        self.failure_kind().map(|kind| kind.to_string())
    }

    /// Decode the base64 `SuccessValue`, if this is one
    pub fn success_value_bytes(&self) -> Result<Option<Vec<u8>>> {
        match self.kind() {
            StatusKind::SuccessValue(encoded) => general_purpose::STANDARD
                .decode(encoded)
                .map(Some)
                .map_err(|e| OutcomeError::InvalidSuccessValue {
                    reason: e.to_string(),
                }),
            _ => Ok(None),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}
