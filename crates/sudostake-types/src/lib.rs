//! SudoStake Types - Typed NEAR transaction outcomes
//!
//! This crate contains the foundational types with zero dependencies on other
//! sudostake crates. It defines:
//!
//! - `TransactionOutcome`, the immutable result of a submitted transaction
//! - Transaction and receipt execution outcomes
//! - Status payloads and their classification
//! - NEP-297 `EVENT_JSON:` event logs
//! - Network selection and unit formatting
//!
//! # Invariants
//!
//! 1. An outcome is validated once, at construction, and never mutated
//! 2. The transaction hash is never empty
//! 3. `logs()` is a pure projection: same outcome, same sequence
//!
//! # Example
//!
//! ```
//! use sudostake_types::{ReceiptOutcome, StatusPayload, TransactionOutcome};
//!
//! let outcome = TransactionOutcome::new(
//!     "abc123",
//!     StatusPayload::success_value(""),
//!     ReceiptOutcome::new(2_427_948_625_513),
//! )
//! .unwrap();
//!
//! assert!(outcome.is_success());
//! assert!(outcome.logs().is_empty());
//! ```

mod fields;

pub mod error;
pub mod events;
pub mod network;
pub mod outcome;
pub mod receipt;
pub mod status;
pub mod transaction;
pub mod units;

pub use error::*;
pub use events::*;
pub use network::*;
pub use outcome::*;
pub use receipt::*;
pub use status::*;
pub use transaction::*;
pub use units::*;

/// Version of the outcome schema
pub const TYPES_VERSION: &str = "0.1.0";
