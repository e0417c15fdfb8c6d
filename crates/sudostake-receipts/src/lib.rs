//! SudoStake Receipts - Transaction Outcome Toolkit
//!
//! Transaction outcomes are the only artifact a submission leaves behind.
//! This crate provides tools for:
//! - Loading outcomes from raw RPC JSON documents and files
//! - Structural verification of an outcome
//! - Outcome inspection (status, gas, logs, events)
//! - Outcome diffing

pub mod config;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sudostake_types::{
    format_tgas, format_yocto_near, Network, OutcomeError, StatusKind, TransactionOutcome,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during outcome operations
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error(transparent)]
    Outcome(#[from] OutcomeError),

    #[error("File error ({path}): {message}")]
    FileError { path: String, message: String },

    #[error("JSON error: {message}")]
    JsonError { message: String },
}

impl ToolkitError {
    /// Get an error code for reports
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Outcome(e) => e.error_code(),
            Self::FileError { .. } => "FILE_ERROR",
            Self::JsonError { .. } => "JSON_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolkitError>;

/// Decimal places used when rendering NEAR amounts
const NEAR_DECIMALS: usize = 6;

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ToolkitError::FileError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load an outcome from a raw RPC JSON document
pub fn load_outcome_json(json: &str) -> Result<TransactionOutcome> {
    let outcome = TransactionOutcome::from_json_str(json)?;
    debug!(
        hash = outcome.hash(),
        receipts = outcome.receipts_outcome().len(),
        "loaded transaction outcome"
    );
    Ok(outcome)
}

/// Load an outcome from a file
pub fn load_outcome_file(path: impl AsRef<Path>) -> Result<TransactionOutcome> {
    load_outcome_json(&read_file(path.as_ref())?)
}

/// Result of outcome verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub valid: bool,
    pub hash: Option<String>,
    pub status: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check an outcome's receipt graph and status.
///
/// A failed transaction is still a valid outcome; only structural problems
/// count as errors. References to receipts the document does not carry are
/// warnings because RPC responses may be partial.
pub fn verify_outcome(outcome: &TransactionOutcome) -> VerificationReport {
    let mut errors = vec![];
    let mut warnings = vec![];

    let mut present = HashSet::new();
    for receipt in outcome.receipts_outcome() {
        if !receipt.id().is_empty() && !present.insert(receipt.id()) {
            errors.push(format!("Duplicate receipt outcome {}", receipt.id()));
        }
    }

    let referenced = std::iter::once(outcome.outcome())
        .chain(outcome.receipts_outcome())
        .flat_map(|o| o.receipt_ids());
    let mut reported = HashSet::new();
    for id in referenced {
        if !present.contains(id.as_str()) && reported.insert(id.as_str()) {
            warnings.push(format!("Receipt {} is referenced but has no outcome", id));
        }
    }

    match outcome.status().kind() {
        StatusKind::Pending => warnings.push("Transaction has not finished executing".to_string()),
        StatusKind::Unknown => warnings.push("Transaction status is not recognised".to_string()),
        _ => {}
    }

    for receipt in outcome.receipts_outcome() {
        if let Some(summary) = receipt.status().failure_summary() {
            warnings.push(format!("Receipt {} failed: {}", receipt.id(), summary));
        }
    }

    if let Err(e) = outcome.decoded_hash() {
        warnings.push(e.to_string());
    }

    for finding in errors.iter().chain(&warnings) {
        warn!(hash = outcome.hash(), "{}", finding);
    }

    VerificationReport {
        valid: errors.is_empty(),
        hash: Some(outcome.hash().to_string()),
        status: outcome.status().kind().label().to_string(),
        errors,
        warnings,
    }
}

/// Verify an outcome from JSON; parse failures make the report invalid
pub fn verify_outcome_json(json: &str) -> VerificationReport {
    match load_outcome_json(json) {
        Ok(outcome) => verify_outcome(&outcome),
        Err(e) => VerificationReport {
            valid: false,
            hash: None,
            status: "unknown".to_string(),
            errors: vec![format!("Failed to parse outcome: {}", e)],
            warnings: vec![],
        },
    }
}

/// Load and verify an outcome from a file
pub fn verify_outcome_file(path: impl AsRef<Path>) -> Result<VerificationReport> {
    Ok(verify_outcome_json(&read_file(path.as_ref())?))
}

/// Inspection details for an outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeInspection {
    pub hash: String,
    pub status: String,
    pub failure: Option<String>,
    pub signer_id: Option<String>,
    pub receiver_id: Option<String>,
    pub methods: Vec<String>,
    pub gas_burnt: u64,
    pub total_gas_burnt: u64,
    pub total_gas: String,
    pub total_tokens_burnt: String,
    pub total_tokens_burnt_near: String,
    pub receipt_count: usize,
    pub log_count: usize,
    pub events: Vec<String>,
    pub explorer_url: Option<String>,
}

/// Summarise an outcome; `network` enables the explorer link
pub fn inspect_outcome(outcome: &TransactionOutcome, network: Option<Network>) -> OutcomeInspection {
    let tokens = outcome.total_tokens_burnt();
    OutcomeInspection {
        hash: outcome.hash().to_string(),
        status: outcome.status().kind().label().to_string(),
        failure: outcome.status().failure_summary(),
        signer_id: outcome.signer_id().map(str::to_string),
        receiver_id: outcome.receiver_id().map(str::to_string),
        methods: outcome
            .transaction()
            .map(|tx| tx.method_names().into_iter().map(str::to_string).collect())
            .unwrap_or_default(),
        gas_burnt: outcome.outcome().gas_burnt(),
        total_gas_burnt: outcome.total_gas_burnt(),
        total_gas: format_tgas(outcome.total_gas_burnt()),
        total_tokens_burnt: tokens.to_string(),
        total_tokens_burnt_near: format!("{} NEAR", format_yocto_near(tokens, NEAR_DECIMALS)),
        receipt_count: outcome.receipts_outcome().len(),
        log_count: outcome.log_lines().count(),
        events: outcome.events().into_iter().map(|e| e.event).collect(),
        explorer_url: network.map(|n| outcome.explorer_url(n)),
    }
}

/// Inspect an outcome's contents
pub fn inspect_outcome_json(json: &str, network: Option<Network>) -> Result<OutcomeInspection> {
    Ok(inspect_outcome(&load_outcome_json(json)?, network))
}

/// Inspect an outcome from a file
pub fn inspect_outcome_file(
    path: impl AsRef<Path>,
    network: Option<Network>,
) -> Result<OutcomeInspection> {
    inspect_outcome_json(&read_file(path.as_ref())?, network)
}

/// Compare two outcomes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeDiff {
    pub outcome_a_hash: String,
    pub outcome_b_hash: String,
    pub differences: Vec<FieldDiff>,
    pub logs_equal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: String,
    pub value_a: serde_json::Value,
    pub value_b: serde_json::Value,
}

fn parse_document(json: &str, label: &str) -> Result<serde_json::Value> {
    serde_json::from_str(json).map_err(|e| ToolkitError::JsonError {
        message: format!("Failed to parse outcome {}: {}", label, e),
    })
}

/// Compare two outcomes and return top-level differences
pub fn diff_outcomes(json_a: &str, json_b: &str) -> Result<OutcomeDiff> {
    let a = parse_document(json_a, "A")?;
    let b = parse_document(json_b, "B")?;

    let outcome_a = TransactionOutcome::from_json_value(&a)?;
    let outcome_b = TransactionOutcome::from_json_value(&b)?;

    let mut differences = vec![];

    if let (Some(obj_a), Some(obj_b)) = (a.as_object(), b.as_object()) {
        let mut all_keys: Vec<&String> = obj_a.keys().chain(obj_b.keys()).collect();
        all_keys.sort();
        all_keys.dedup();

        for key in all_keys {
            let val_a = obj_a.get(key).cloned().unwrap_or(serde_json::Value::Null);
            let val_b = obj_b.get(key).cloned().unwrap_or(serde_json::Value::Null);

            if val_a != val_b {
                differences.push(FieldDiff {
                    field: key.clone(),
                    value_a: val_a,
                    value_b: val_b,
                });
            }
        }
    }

    Ok(OutcomeDiff {
        outcome_a_hash: outcome_a.hash().to_string(),
        outcome_b_hash: outcome_b.hash().to_string(),
        logs_equal: outcome_a.logs() == outcome_b.logs(),
        differences,
    })
}

/// Compare two outcome files
pub fn diff_outcome_files(path_a: impl AsRef<Path>, path_b: impl AsRef<Path>) -> Result<OutcomeDiff> {
    diff_outcomes(&read_file(path_a.as_ref())?, &read_file(path_b.as_ref())?)
}
