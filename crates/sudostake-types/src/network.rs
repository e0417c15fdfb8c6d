//! NEAR network selection
//!
//! Only used to render links for an outcome; nothing here talks to a node.

use crate::{OutcomeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable naming the active network
pub const NEAR_NETWORK_ENV: &str = "NEAR_NETWORK";

/// Supported NEAR networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// NEAR mainnet
    Mainnet,
    /// NEAR testnet
    Testnet,
}

impl Network {
    /// Read the network from `NEAR_NETWORK`
    pub fn from_env() -> Result<Self> {
        match std::env::var(NEAR_NETWORK_ENV) {
            Ok(value) => value.parse(),
            Err(_) => Err(OutcomeError::unknown_network(None)),
        }
    }

    /// Public RPC endpoint
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://rpc.mainnet.near.org",
            Self::Testnet => "https://rpc.testnet.near.org",
        }
    }

    /// Block explorer base URL
    pub fn explorer_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://explorer.near.org",
            Self::Testnet => "https://explorer.testnet.near.org",
        }
    }

    /// Explorer page for a transaction
    pub fn transaction_url(&self, hash: &str) -> String {
        format!("{}/transactions/{}", self.explorer_url(), hash)
    }

    /// Explorer page for an account
    pub fn account_url(&self, account_id: &str) -> String {
        format!("{}/accounts/{}", self.explorer_url(), account_id)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl FromStr for Network {
    type Err = OutcomeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            _ => Err(OutcomeError::unknown_network(Some(s))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_network() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!(" Testnet\n".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!(
            "betanet".parse::<Network>().unwrap_err(),
            OutcomeError::UnknownNetwork {
                value: "betanet".to_string()
            }
        );
    }

    #[test]
    fn test_from_env() {
        // Only test in this crate touching NEAR_NETWORK
        std::env::remove_var(NEAR_NETWORK_ENV);
        let err = Network::from_env().unwrap_err();
        assert_eq!(err, OutcomeError::unknown_network(None));
        assert!(err.to_string().contains("(got: unset)"));

        std::env::set_var(NEAR_NETWORK_ENV, "Mainnet");
        assert_eq!(Network::from_env().unwrap(), Network::Mainnet);

        std::env::set_var(NEAR_NETWORK_ENV, "localnet");
        assert_eq!(Network::from_env().unwrap_err().error_code(), "UNKNOWN_NETWORK");

        std::env::remove_var(NEAR_NETWORK_ENV);
    }

    #[test]
    fn test_urls() {
        assert_eq!(Network::Mainnet.rpc_url(), "https://rpc.mainnet.near.org");
        assert_eq!(
            Network::Testnet.transaction_url("tx987"),
            "https://explorer.testnet.near.org/transactions/tx987"
        );
        assert_eq!(
            Network::Mainnet.account_url("vault-0.sudostake.near"),
            "https://explorer.near.org/accounts/vault-0.sudostake.near"
        );
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Network::Testnet).unwrap(), "\"testnet\"");
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
    }
}
