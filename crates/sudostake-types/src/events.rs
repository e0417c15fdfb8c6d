//! Structured event logs (NEP-297)
//!
//! Contracts announce state changes by logging
//! `EVENT_JSON:{"standard": ..., "version": ..., "event": ..., "data": ...}`.
//! Parsing is best effort: anything that is not a well-formed event is
//! treated as a plain log line.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Marker that prefixes every structured event log
pub const EVENT_JSON_PREFIX: &str = "EVENT_JSON:";

/// A parsed `EVENT_JSON:` log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    /// Standard name, e.g. `nep141`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    /// Standard version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Event name
    pub event: String,
    /// Event payload
    #[serde(default)]
    pub data: Value,
}

impl EventLog {
    /// Create an event with a payload and no standard
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            standard: None,
            version: None,
            event: event.into(),
            data,
        }
    }

    /// Parse a log line; `None` if it is not a well-formed event.
    ///
    /// Only `event` is required to be a string. A `standard` or `version` of
    /// any other type is dropped.
    ///
    /// The JSON part starts after the first `EVENT_JSON:` so lines carrying a
    /// prefix before the marker still parse.
    pub fn parse(line: &str) -> Option<Self> {
        let (_, payload) = line.split_once(EVENT_JSON_PREFIX)?;
        let payload = payload.trim();
        if payload.is_empty() {
            return None;
        }
        let value: Value = serde_json::from_str(payload).ok()?;
        let obj = value.as_object()?;
        let event = obj.get("event")?.as_str()?.to_string();
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            standard: text("standard"),
            version: text("version"),
            event,
            data: obj.get("data").cloned().unwrap_or(Value::Null),
        })
    }

    /// The payload as an object; empty when `data` is absent or not an object
    pub fn data_object(&self) -> Map<String, Value> {
        match &self.data {
            Value::Object(obj) => obj.clone(),
            _ => Map::new(),
        }
    }
}

impl fmt::Display for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}{}", EVENT_JSON_PREFIX, json)
    }
}

/// True if any log line mentions `event_name`, structured or not
pub fn log_contains_event<I, S>(logs: I, event_name: &str) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    logs.into_iter().any(|log| log.as_ref().contains(event_name))
}

/// Every well-formed event, in log order
pub fn parse_events<I, S>(logs: I) -> Vec<EventLog>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    logs.into_iter()
        .filter_map(|log| EventLog::parse(log.as_ref()))
        .collect()
}

/// First event named `event_name`
pub fn find_event<I, S>(logs: I, event_name: &str) -> Option<EventLog>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    logs.into_iter()
        .filter_map(|log| EventLog::parse(log.as_ref()))
        .find(|event| event.event == event_name)
}

/// `data` of the first event named `event_name`.
///
/// A matching event whose `data` is not an object yields an empty map;
/// `None` means no such event was logged.
pub fn find_event_data<I, S>(logs: I, event_name: &str) -> Option<Map<String, Value>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    find_event(logs, event_name).map(|event| event.data_object())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MINTED: &str = r#"EVENT_JSON:{"standard":"sudostake","version":"1.0.0","event":"vault_minted","data":{"owner":"alice.testnet","vault":"vault-0.nzaza.testnet"}}"#;

    #[test]
    fn test_parse_event() {
        let event = EventLog::parse(MINTED).unwrap();
        assert_eq!(event.event, "vault_minted");
        assert_eq!(event.standard.as_deref(), Some("sudostake"));
        assert_eq!(event.data["vault"], json!("vault-0.nzaza.testnet"));
    }

    #[test]
    fn test_parse_rejects_non_events() {
        assert!(EventLog::parse("Transfer 10 from alice to bob").is_none());
        assert!(EventLog::parse("EVENT_JSON:").is_none());
        assert!(EventLog::parse("EVENT_JSON:   ").is_none());
        assert!(EventLog::parse("EVENT_JSON:{not json").is_none());
        assert!(EventLog::parse("EVENT_JSON:[1,2]").is_none());
        assert!(EventLog::parse(r#"EVENT_JSON:{"data":{}}"#).is_none());
    }

    #[test]
    fn test_parse_with_prefix_and_spacing() {
        let line = r#"log: EVENT_JSON: {"event":"repay_loan_failed"}"#;
        let event = EventLog::parse(line).unwrap();
        assert_eq!(event.event, "repay_loan_failed");
        assert_eq!(event.data, Value::Null);
        assert!(event.data_object().is_empty());
    }

    #[test]
    fn test_display_round_trips() {
        let event = EventLog::parse(MINTED).unwrap();
        let line = event.to_string();
        assert!(line.starts_with(EVENT_JSON_PREFIX));
        assert_eq!(EventLog::parse(&line), Some(event));
    }

    #[test]
    fn test_log_contains_event() {
        let logs = vec![
            "Unstaking 5 NEAR".to_string(),
            r#"EVENT_JSON:{"event":"liquidation_started","data":{}}"#.to_string(),
        ];
        assert!(log_contains_event(&logs, "liquidation_started"));
        assert!(log_contains_event(&logs, "Unstaking"));
        assert!(!log_contains_event(&logs, "liquidation_complete"));
        assert!(!log_contains_event(Vec::<String>::new(), "anything"));
    }

    #[test]
    fn test_find_event_data() {
        let logs = [
            "plain line",
            r#"EVENT_JSON:{"event":"liquidation_progress","data":"waiting"}"#,
            r#"EVENT_JSON:{"event":"unstake_recorded","data":{"validator":"v1.poolv1.near","amount":"5"}}"#,
            r#"EVENT_JSON:{"event":"unstake_recorded","data":{"validator":"v2.poolv1.near"}}"#,
        ];

        let data = find_event_data(logs, "unstake_recorded").unwrap();
        assert_eq!(data["validator"], json!("v1.poolv1.near"));

        let empty = find_event_data(logs, "liquidation_progress").unwrap();
        assert!(empty.is_empty());

        assert!(find_event_data(logs, "liquidation_complete").is_none());
    }

    #[test]
    fn test_non_string_standard_is_dropped() {
        let logs = [r#"EVENT_JSON:{"standard":1,"version":["1.0.0"],"event":"vault_minted","data":{"vault":"vault-7.nzaza.testnet"}}"#];

        let event = EventLog::parse(logs[0]).unwrap();
        assert!(event.standard.is_none());
        assert!(event.version.is_none());

        let data = find_event_data(logs, "vault_minted").unwrap();
        assert_eq!(data["vault"], json!("vault-7.nzaza.testnet"));
    }

    #[test]
    fn test_parse_events_keeps_order() {
        let logs = [
            r#"EVENT_JSON:{"event":"a"}"#,
            "noise",
            r#"EVENT_JSON:{"event":"b"}"#,
        ];
        let names: Vec<_> = parse_events(logs).into_iter().map(|e| e.event).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
