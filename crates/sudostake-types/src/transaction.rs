//! Signed transaction data echoed back in a final execution result

use crate::fields;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The transaction a result refers to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionData {
    /// Transaction hash (base58)
    pub hash: String,
    /// Account that signed the transaction
    pub signer_id: String,
    /// Account the transaction was addressed to
    pub receiver_id: String,
    /// Access key used for signing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    /// Signature over the transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Access key nonce
    #[serde(default)]
    pub nonce: u64,
    /// Actions as reported by the node (left uninterpreted)
    #[serde(default)]
    pub actions: Vec<Value>,
}

impl TransactionData {
    /// Create transaction data with the identifying fields only
    pub fn new(
        hash: impl Into<String>,
        signer_id: impl Into<String>,
        receiver_id: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            signer_id: signer_id.into(),
            receiver_id: receiver_id.into(),
            public_key: None,
            signature: None,
            nonce: 0,
            actions: Vec::new(),
        }
    }

    /// Parse the `transaction` object of an RPC result
    pub fn from_rpc_value(value: &Value) -> Result<Self> {
        Self::parse(value, "transaction")
    }

    pub(crate) fn parse(value: &Value, path: &str) -> Result<Self> {
        Self::parse_with_hash(value, path, None)
    }

    /// Like `parse`, but a missing `hash` falls back to `known_hash`
    pub(crate) fn parse_with_hash(
        value: &Value,
        path: &str,
        known_hash: Option<&str>,
    ) -> Result<Self> {
        let obj = fields::object(value, path)?;
        let hash = match (fields::optional_string(obj, "hash", path)?, known_hash) {
            (Some(hash), _) => hash,
            (None, Some(known)) => known.to_string(),
            (None, None) => fields::string(obj, "hash", path)?,
        };
        Ok(Self {
            hash,
            signer_id: fields::string(obj, "signer_id", path)?,
            receiver_id: fields::string(obj, "receiver_id", path)?,
            public_key: fields::optional_string(obj, "public_key", path)?,
            signature: fields::optional_string(obj, "signature", path)?,
            nonce: fields::optional_unsigned(obj, "nonce", path)?,
            actions: fields::value_list(obj, "actions", path)?,
        })
    }

    /// Names of the actions carried by the transaction, e.g. `FunctionCall`
    pub fn action_names(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|action| match action {
                Value::String(name) => Some(name.as_str()),
                Value::Object(obj) => obj.keys().next().map(String::as_str),
                _ => None,
            })
            .collect()
    }

    /// Method names of every `FunctionCall` action
    pub fn method_names(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|action| action.get("FunctionCall")?.get("method_name")?.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutcomeError;
    use serde_json::json;

    #[test]
    fn test_parse_rpc_transaction() {
        let value = json!({
            "signer_id": "alice.testnet",
            "public_key": "ed25519:6E8sCci9badyRkXb3JoRpBj5p8C6Tw41ELDZoiihKEtp",
            "nonce": 13,
            "receiver_id": "nzaza.testnet",
            "actions": [
                "CreateAccount",
                {"FunctionCall": {"method_name": "mint_vault", "args": "e30=", "gas": 300000000000000u64, "deposit": "10000000000000000000000000"}}
            ],
            "signature": "ed25519:3s1dvMqNDCByoMnDnkhB4GPjTSXCRt4nt3Af5n1RX8W7aJ2FC6MfRf5BNXZ52EBifNJnNVBsGvke6GRYuaEYJXt5",
            "hash": "9FtHUFBQsZ2MG77K3x3MJ9wjX3UT8zE1TczCrhZEcG8U"
        });

        let tx = TransactionData::from_rpc_value(&value).unwrap();
        assert_eq!(tx.hash, "9FtHUFBQsZ2MG77K3x3MJ9wjX3UT8zE1TczCrhZEcG8U");
        assert_eq!(tx.signer_id, "alice.testnet");
        assert_eq!(tx.nonce, 13);
        assert_eq!(tx.action_names(), vec!["CreateAccount", "FunctionCall"]);
        assert_eq!(tx.method_names(), vec!["mint_vault"]);
    }

    #[test]
    fn test_missing_signer() {
        let err = TransactionData::from_rpc_value(&json!({"hash": "abc", "receiver_id": "bob.near"}))
            .unwrap_err();
        assert_eq!(err, OutcomeError::malformed("transaction.signer_id", "missing"));
    }
}
