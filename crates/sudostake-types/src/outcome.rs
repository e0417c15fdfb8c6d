//! Transaction outcomes
//!
//! `TransactionOutcome` is the terminal artifact of a transaction submission:
//! an immutable snapshot handed back by the blockchain client. Fields are
//! private so that nothing can change after validation; everything else is
//! derived on access.

use crate::events::{self, EventLog};
use crate::fields;
use crate::{Network, OutcomeError, ReceiptOutcome, Result, StatusPayload, TransactionData};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Length of a decoded transaction hash
pub const HASH_BYTES: usize = 32;

/// Final execution result of a transaction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct TransactionOutcome {
    hash: String,
    status: StatusPayload,
    transaction: Option<TransactionData>,
    outcome: ReceiptOutcome,
    receipts_outcome: Vec<ReceiptOutcome>,
}

impl TransactionOutcome {
    /// Build an outcome from already-finalized fields.
    ///
    /// The transaction outcome's id is the transaction hash; an empty id is
    /// filled in, a different one is rejected.
    pub fn new(
        hash: impl Into<String>,
        status: StatusPayload,
        outcome: ReceiptOutcome,
    ) -> Result<Self> {
        let hash = hash.into();
        if hash.trim().is_empty() {
            return Err(OutcomeError::malformed("hash", "must not be empty"));
        }

        let outcome = if outcome.id().is_empty() {
            outcome.with_id(hash.clone())
        } else if outcome.id() != hash {
            return Err(OutcomeError::malformed(
                "transaction_outcome.id",
                format!("{} does not match transaction hash {}", outcome.id(), hash),
            ));
        } else {
            outcome
        };

        Ok(Self {
            hash,
            status,
            transaction: None,
            outcome,
            receipts_outcome: Vec::new(),
        })
    }

    /// Attach the signed transaction; its hash must match
    pub fn with_transaction(mut self, transaction: TransactionData) -> Result<Self> {
        if transaction.hash != self.hash {
            return Err(OutcomeError::malformed(
                "transaction.hash",
                format!(
                    "{} does not match outcome hash {}",
                    transaction.hash, self.hash
                ),
            ));
        }
        self.transaction = Some(transaction);
        Ok(self)
    }

    /// Append receipt outcomes, in execution order
    pub fn with_receipts<I>(mut self, receipts: I) -> Self
    where
        I: IntoIterator<Item = ReceiptOutcome>,
    {
        self.receipts_outcome.extend(receipts);
        self
    }

    /// Parse a raw RPC result document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| OutcomeError::malformed("<root>", e.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Parse a raw RPC result value:
    /// `{status, transaction, transaction_outcome, receipts_outcome}`
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let obj = fields::object(value, "")?;

        let status = fields::status(fields::required(obj, "status", "")?, "status".to_string())?;

        let outcome = ReceiptOutcome::parse(
            fields::required(obj, "transaction_outcome", "")?,
            "transaction_outcome",
        )?;

        let known_hash = Some(outcome.id()).filter(|id| !id.is_empty());
        let transaction = match obj.get("transaction") {
            Some(Value::Null) | None => None,
            Some(raw) => Some(TransactionData::parse_with_hash(raw, "transaction", known_hash)?),
        };

        let receipts_outcome = match obj.get("receipts_outcome") {
            Some(Value::Null) | None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| ReceiptOutcome::parse(item, &format!("receipts_outcome[{}]", i)))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(OutcomeError::malformed(
                    "receipts_outcome",
                    "expected an array",
                ))
            }
        };

        let hash = match (&transaction, outcome.id()) {
            (Some(tx), _) => tx.hash.clone(),
            (None, id) if !id.is_empty() => id.to_string(),
            (None, _) => {
                return Err(OutcomeError::malformed(
                    "transaction.hash",
                    "missing, and transaction_outcome.id is empty",
                ))
            }
        };

        let built = Self::new(hash, status, outcome)?.with_receipts(receipts_outcome);
        match transaction {
            Some(tx) => built.with_transaction(tx),
            None => Ok(built),
        }
    }

    /// Transaction hash
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Raw status payload of the whole transaction
    pub fn status(&self) -> &StatusPayload {
        &self.status
    }

    /// Execution outcome of the transaction itself
    pub fn outcome(&self) -> &ReceiptOutcome {
        &self.outcome
    }

    /// The signed transaction, when the client returned it
    pub fn transaction(&self) -> Option<&TransactionData> {
        self.transaction.as_ref()
    }

    /// Outcomes of the receipts spawned by the transaction
    pub fn receipts_outcome(&self) -> &[ReceiptOutcome] {
        &self.receipts_outcome
    }

    pub fn signer_id(&self) -> Option<&str> {
        self.transaction.as_ref().map(|tx| tx.signer_id.as_str())
    }

    pub fn receiver_id(&self) -> Option<&str> {
        self.transaction.as_ref().map(|tx| tx.receiver_id.as_str())
    }

    /// Every log line: the transaction outcome's first, then each receipt's,
    /// in emission order. Recomputed on each call.
    pub fn logs(&self) -> Vec<&str> {
        self.log_lines().collect()
    }

    /// Iterator form of [`logs`](Self::logs)
    pub fn log_lines(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(&self.outcome)
            .chain(self.receipts_outcome.iter())
            .flat_map(|o| o.logs().iter().map(String::as_str))
    }

    /// Gas burnt by the transaction and all of its receipts
    pub fn total_gas_burnt(&self) -> u64 {
        self.receipts_outcome
            .iter()
            .fold(self.outcome.gas_burnt(), |acc, r| acc.saturating_add(r.gas_burnt()))
    }

    /// Tokens burnt by the transaction and all of its receipts, in yoctoNEAR
    pub fn total_tokens_burnt(&self) -> u128 {
        self.receipts_outcome
            .iter()
            .fold(self.outcome.tokens_burnt(), |acc, r| {
                acc.saturating_add(r.tokens_burnt())
            })
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_failure(&self) -> bool {
        self.status.is_failure()
    }

    /// `ActionError.kind` of a failed transaction
    pub fn failure_kind(&self) -> Option<Value> {
        self.status.failure_kind()
    }

    /// All structured events across every log line
    pub fn events(&self) -> Vec<EventLog> {
        events::parse_events(self.log_lines())
    }

    /// First structured event named `event_name`
    pub fn find_event(&self, event_name: &str) -> Option<EventLog> {
        events::find_event(self.log_lines(), event_name)
    }

    /// `data` of the first structured event named `event_name`
    pub fn find_event_data(&self, event_name: &str) -> Option<Map<String, Value>> {
        events::find_event_data(self.log_lines(), event_name)
    }

    /// True if any log line mentions `event_name`
    pub fn contains_event(&self, event_name: &str) -> bool {
        events::log_contains_event(self.log_lines(), event_name)
    }

    /// Explorer page for this transaction
    pub fn explorer_url(&self, network: Network) -> String {
        network.transaction_url(&self.hash)
    }

    /// Decode the hash as a base58 32-byte digest
    pub fn decoded_hash(&self) -> Result<[u8; HASH_BYTES]> {
        let bytes = bs58::decode(&self.hash)
            .into_vec()
            .map_err(|e| OutcomeError::InvalidHash {
                hash: self.hash.clone(),
                reason: e.to_string(),
            })?;

        bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| OutcomeError::InvalidHash {
                hash: self.hash.clone(),
                reason: format!("expected {} bytes, got {}", HASH_BYTES, bytes.len()),
            })
    }
}

impl TryFrom<Value> for TransactionOutcome {
    type Error = OutcomeError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json_value(&value)
    }
}

#[derive(Serialize)]
struct RpcTransactionOutcome<'a> {
    status: &'a StatusPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction: Option<&'a TransactionData>,
    transaction_outcome: &'a ReceiptOutcome,
    receipts_outcome: &'a [ReceiptOutcome],
}

impl Serialize for TransactionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        RpcTransactionOutcome {
            status: &self.status,
            transaction: self.transaction.as_ref(),
            transaction_outcome: &self.outcome,
            receipts_outcome: &self.receipts_outcome,
        }
        .serialize(serializer)
    }
}
