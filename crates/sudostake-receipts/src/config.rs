//! Toolkit configuration

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sudostake_types::{Network, OutcomeError, NEAR_NETWORK_ENV};

/// Environment variable selecting the default output format
pub const OUTPUT_ENV: &str = "SUDOSTAKE_OUTPUT";

/// Environment variable holding the log filter
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// How results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Toolkit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// Network used for explorer links; none means no links
    pub network: Option<Network>,
    /// Default output format
    pub output: OutputFormat,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            network: None,
            output: OutputFormat::Text,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ToolkitConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, OutcomeError> {
        Self::from_env_with_network(None)
    }

    /// Create config from environment variables; an explicit network
    /// replaces `NEAR_NETWORK`, which is then not read at all
    pub fn from_env_with_network(network: Option<Network>) -> Result<Self, OutcomeError> {
        Self::from_lookup_with_network(|key| std::env::var(key).ok(), network)
    }

    /// Create config from any key lookup.
    ///
    /// An unset `NEAR_NETWORK` disables explorer links, an invalid one is an
    /// error. An unrecognised output format falls back to text.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OutcomeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with_network(lookup, None)
    }

    /// Create config from any key lookup with an optional network override
    pub fn from_lookup_with_network<F>(
        lookup: F,
        network: Option<Network>,
    ) -> Result<Self, OutcomeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network = match (network, lookup(NEAR_NETWORK_ENV)) {
            (Some(network), _) => Some(network),
            (None, Some(value)) if !value.trim().is_empty() => Some(value.parse::<Network>()?),
            (None, _) => None,
        };

        let output = lookup(OUTPUT_ENV)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        let log_filter = lookup(LOG_FILTER_ENV)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            network,
            output,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ToolkitConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ToolkitConfig::default());
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_from_values() {
        let config = ToolkitConfig::from_lookup(lookup(&[
            ("NEAR_NETWORK", "testnet"),
            ("SUDOSTAKE_OUTPUT", "JSON"),
            ("RUST_LOG", "sudostake_receipts=debug"),
        ]))
        .unwrap();
        assert_eq!(config.network, Some(Network::Testnet));
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log_filter, "sudostake_receipts=debug");
    }

    #[test]
    fn test_invalid_network() {
        let err = ToolkitConfig::from_lookup(lookup(&[("NEAR_NETWORK", "localnet")])).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_NETWORK");
    }

    #[test]
    fn test_explicit_network_wins_over_invalid_env() {
        let env = lookup(&[("NEAR_NETWORK", "localnet")]);
        let config = ToolkitConfig::from_lookup_with_network(env, Some(Network::Testnet)).unwrap();
        assert_eq!(config.network, Some(Network::Testnet));

        let env = lookup(&[("NEAR_NETWORK", "testnet")]);
        let config = ToolkitConfig::from_lookup_with_network(env, Some(Network::Mainnet)).unwrap();
        assert_eq!(config.network, Some(Network::Mainnet));
    }

    #[test]
    fn test_output_format_as_cli_value() {
        assert_eq!(
            <OutputFormat as ValueEnum>::from_str("json", true).unwrap(),
            OutputFormat::Json
        );
        let names: Vec<_> = OutputFormat::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(names, vec!["text", "json"]);
    }

    #[test]
    fn test_unknown_output_falls_back() {
        let config = ToolkitConfig::from_lookup(lookup(&[("SUDOSTAKE_OUTPUT", "yaml")])).unwrap();
        assert_eq!(config.output, OutputFormat::Text);
    }
}
