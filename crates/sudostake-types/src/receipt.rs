//! Execution outcomes of a transaction and of the receipts it spawned
//!
//! The RPC nests the interesting fields one level down:
//!
//! ```text
//! { "id": ..., "block_hash": ..., "outcome": { "logs": [...], "gas_burnt": ..., ... } }
//! ```
//!
//! `ReceiptOutcome` flattens that shape and serializes back into it.

use crate::fields;
use crate::{OutcomeError, Result, StatusPayload};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Execution outcome of a single transaction or receipt
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct ReceiptOutcome {
    id: String,
    block_hash: Option<String>,
    executor_id: Option<String>,
    logs: Vec<String>,
    receipt_ids: Vec<String>,
    gas_burnt: u64,
    tokens_burnt: u128,
    status: StatusPayload,
}

impl ReceiptOutcome {
    /// Create an outcome that burnt `gas_burnt` gas and emitted nothing
    pub fn new(gas_burnt: u64) -> Self {
        Self {
            gas_burnt,
            ..Self::default()
        }
    }

    /// Set the receipt (or transaction) id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the block the outcome was included in
    pub fn with_block_hash(mut self, block_hash: impl Into<String>) -> Self {
        self.block_hash = Some(block_hash.into());
        self
    }

    /// Set the account that executed the receipt
    pub fn with_executor(mut self, executor_id: impl Into<String>) -> Self {
        self.executor_id = Some(executor_id.into());
        self
    }

    /// Append emitted log lines, in emission order
    pub fn with_logs<I, S>(mut self, logs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.logs.extend(logs.into_iter().map(Into::into));
        self
    }

    /// Append a single log line
    pub fn with_log(self, log: impl Into<String>) -> Self {
        self.with_logs([log])
    }

    /// Set the ids of the receipts produced by this execution
    pub fn with_receipt_ids<I, S>(mut self, receipt_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.receipt_ids = receipt_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the tokens burnt, in yoctoNEAR
    pub fn with_tokens_burnt(mut self, tokens_burnt: u128) -> Self {
        self.tokens_burnt = tokens_burnt;
        self
    }

    /// Set the execution status of this receipt
    pub fn with_status(mut self, status: StatusPayload) -> Self {
        self.status = status;
        self
    }

    /// Receipt id; for a transaction outcome this is the transaction hash
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn block_hash(&self) -> Option<&str> {
        self.block_hash.as_deref()
    }

    pub fn executor_id(&self) -> Option<&str> {
        self.executor_id.as_deref()
    }

    /// Logs emitted by this execution, in emission order
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn receipt_ids(&self) -> &[String] {
        &self.receipt_ids
    }

    /// Gas consumed by this execution
    pub fn gas_burnt(&self) -> u64 {
        self.gas_burnt
    }

    /// Tokens burnt for gas, in yoctoNEAR
    pub fn tokens_burnt(&self) -> u128 {
        self.tokens_burnt
    }

    pub fn status(&self) -> &StatusPayload {
        &self.status
    }

    /// Parse one entry of `receipts_outcome` (or the `transaction_outcome`)
    pub fn from_rpc_value(value: &Value) -> Result<Self> {
        Self::parse(value, "")
    }

    pub(crate) fn parse(value: &Value, path: &str) -> Result<Self> {
        let obj = fields::object(value, path)?;
        let outcome_path = fields::join(path, "outcome");
        let outcome = fields::object(fields::required(obj, "outcome", path)?, &outcome_path)?;

        let status = match outcome.get("status") {
            Some(Value::Null) | None => StatusPayload::new(),
            Some(raw) => fields::status(raw, fields::join(&outcome_path, "status"))?,
        };

        Ok(Self {
            id: fields::optional_string(obj, "id", path)?.unwrap_or_default(),
            block_hash: fields::optional_string(obj, "block_hash", path)?,
            executor_id: fields::optional_string(outcome, "executor_id", &outcome_path)?,
            logs: fields::string_list(outcome, "logs", &outcome_path)?,
            receipt_ids: fields::string_list(outcome, "receipt_ids", &outcome_path)?,
            gas_burnt: fields::unsigned(outcome, "gas_burnt", &outcome_path)?,
            tokens_burnt: fields::optional_u128(outcome, "tokens_burnt", &outcome_path)?,
            status,
        })
    }
}

impl TryFrom<Value> for ReceiptOutcome {
    type Error = OutcomeError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_rpc_value(&value)
    }
}

#[derive(Serialize)]
struct RpcExecutionOutcome<'a> {
    logs: &'a [String],
    receipt_ids: &'a [String],
    gas_burnt: u64,
    tokens_burnt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    executor_id: Option<&'a str>,
    status: &'a StatusPayload,
}

#[derive(Serialize)]
struct RpcReceiptOutcome<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_hash: Option<&'a str>,
    outcome: RpcExecutionOutcome<'a>,
}

impl Serialize for ReceiptOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        RpcReceiptOutcome {
            id: &self.id,
            block_hash: self.block_hash.as_deref(),
            outcome: RpcExecutionOutcome {
                logs: &self.logs,
                receipt_ids: &self.receipt_ids,
                gas_burnt: self.gas_burnt,
                tokens_burnt: self.tokens_burnt.to_string(),
                executor_id: self.executor_id.as_deref(),
                status: &self.status,
            },
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rpc_receipt() -> Value {
        json!({
            "proof": [],
            "block_hash": "7pbJ7tCvTWZeWwM8PxzFdQzEqbGe9Ld7sZMUpQkKhZyW",
            "id": "FJ2LmN8dLcnP3nMZmnsgU4CpQhCXvtJqYQ5ghNp8zvzH",
            "outcome": {
                "logs": [
                    "EVENT_JSON:{\"standard\":\"nep171\",\"version\":\"1.0.0\",\"event\":\"vault_minted\",\"data\":{\"vault\":\"vault-0.nzaza.testnet\"}}"
                ],
                "receipt_ids": ["6aVQmNovnGh1yYCBM8XSEw4GSp1nYs8qB5UNFE3MjS2E"],
                "gas_burnt": 2427948625513u64,
                "tokens_burnt": "242794862551300000000",
                "executor_id": "nzaza.testnet",
                "status": {"SuccessValue": ""},
                "metadata": {"version": 3, "gas_profile": []}
            }
        })
    }

    #[test]
    fn test_parse_rpc_receipt() {
        let receipt = ReceiptOutcome::from_rpc_value(&rpc_receipt()).unwrap();
        assert_eq!(receipt.id(), "FJ2LmN8dLcnP3nMZmnsgU4CpQhCXvtJqYQ5ghNp8zvzH");
        assert_eq!(receipt.executor_id(), Some("nzaza.testnet"));
        assert_eq!(receipt.gas_burnt(), 2_427_948_625_513);
        assert_eq!(receipt.tokens_burnt(), 242_794_862_551_300_000_000);
        assert_eq!(receipt.logs().len(), 1);
        assert!(receipt.status().is_success());
    }

    #[test]
    fn test_serialize_keeps_rpc_shape() {
        let receipt = ReceiptOutcome::from_rpc_value(&rpc_receipt()).unwrap();
        let value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(value["outcome"]["tokens_burnt"], json!("242794862551300000000"));
        assert_eq!(value["outcome"]["gas_burnt"], json!(2427948625513u64));

        let back: ReceiptOutcome = serde_json::from_value(value).unwrap();
        assert_eq!(back, receipt);
    }

    #[test]
    fn test_negative_gas_is_malformed() {
        let mut raw = rpc_receipt();
        raw["outcome"]["gas_burnt"] = json!(-1);
        let err = ReceiptOutcome::from_rpc_value(&raw).unwrap_err();
        assert!(matches!(
            err,
            OutcomeError::MalformedOutcome { ref field, .. } if field == "outcome.gas_burnt"
        ));
    }

    #[test]
    fn test_builder() {
        let receipt = ReceiptOutcome::new(0)
            .with_executor("vault-0.nzaza.testnet")
            .with_log("first")
            .with_logs(["second", "third"]);
        assert_eq!(receipt.gas_burnt(), 0);
        assert_eq!(receipt.logs(), ["first", "second", "third"]);
        assert!(receipt.status().is_empty());
    }
}
