//! Error types for SudoStake outcomes
//!
//! A finalized outcome never fails once it exists. Every error here is
//! raised while building or decoding one.

use thiserror::Error;

/// Result type for outcome operations
pub type Result<T> = std::result::Result<T, OutcomeError>;

/// Outcome error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutcomeError {
    // ========================================================================
    // Construction Errors
    // ========================================================================

    /// A required field is absent or has the wrong shape
    #[error("Malformed outcome: {field} - {reason}")]
    MalformedOutcome { field: String, reason: String },

    /// The transaction hash is not a base58 encoded 32-byte digest
    #[error("Invalid transaction hash {hash}: {reason}")]
    InvalidHash { hash: String, reason: String },

    /// A `SuccessValue` payload is not valid base64
    #[error("Invalid success value: {reason}")]
    InvalidSuccessValue { reason: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    /// NEAR_NETWORK is unset or not one of the supported networks
    #[error("NEAR_NETWORK must be set to 'mainnet' or 'testnet' (got: {value})")]
    UnknownNetwork { value: String },

    // ========================================================================
    // Formatting Errors
    // ========================================================================

    /// Block timestamp is outside the representable range
    #[error("Timestamp {nanos}ns is out of range")]
    InvalidTimestamp { nanos: u64 },
}

impl OutcomeError {
    /// Create a malformed outcome error
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedOutcome {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown network error, rendering a missing value as `unset`
    pub fn unknown_network(value: Option<&str>) -> Self {
        Self::UnknownNetwork {
            value: value.unwrap_or("unset").to_string(),
        }
    }

    /// Check if this error was caused by the incoming outcome data
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedOutcome { .. }
                | Self::InvalidHash { .. }
                | Self::InvalidSuccessValue { .. }
        )
    }

    /// Get an error code for reports and CLI output
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedOutcome { .. } => "MALFORMED_OUTCOME",
            Self::InvalidHash { .. } => "INVALID_HASH",
            Self::InvalidSuccessValue { .. } => "INVALID_SUCCESS_VALUE",
            Self::UnknownNetwork { .. } => "UNKNOWN_NETWORK",
            Self::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = OutcomeError::malformed("status", "missing");
        assert_eq!(err.error_code(), "MALFORMED_OUTCOME");
        assert_eq!(err.to_string(), "Malformed outcome: status - missing");
    }

    #[test]
    fn test_unknown_network_message() {
        let err = OutcomeError::unknown_network(None);
        assert_eq!(
            err.to_string(),
            "NEAR_NETWORK must be set to 'mainnet' or 'testnet' (got: unset)"
        );

        let err = OutcomeError::unknown_network(Some("betanet"));
        assert!(err.to_string().contains("betanet"));
        assert!(!err.is_data_error());
    }

    #[test]
    fn test_data_errors() {
        assert!(OutcomeError::malformed("hash", "empty").is_data_error());
        assert!(!OutcomeError::InvalidTimestamp { nanos: 1 }.is_data_error());
    }
}
