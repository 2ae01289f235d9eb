//! Soroban RPC client: polls `getEvents` for the KEY contracts and decodes
//! their events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, KeyEvent};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Decoded topic list, one JSON document per topic
    pub topic: Vec<String>,
    /// Decoded event value / data
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events for `contract_ids` from the RPC.
///
/// * `start_ledger`: the ledger sequence to scan from (inclusive).
/// * `cursor`: optional opaque pagination cursor from a previous response.
/// * `limit`: maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = INITIAL_BACKOFF_SECS;

    loop {
        let params = build_params(contract_ids, start_ledger, cursor, limit);

        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        match response {
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    warn!("Rate-limited by RPC (will retry in {backoff}s)");
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let body: RpcResponse = resp.json().await?;

                if let Some(err) = body.error {
                    // Invalid request / unknown method will never succeed on retry.
                    if err.code == -32600 || err.code == -32601 {
                        return Err(IndexerError::Rpc {
                            code: err.code,
                            message: err.message,
                        });
                    }
                    warn!(
                        "RPC soft error (will retry in {backoff}s): {} {}",
                        err.code, err.message
                    );
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let result = body.result.ok_or_else(|| {
                    IndexerError::EventParse("Empty result from getEvents".to_string())
                })?;

                debug!(
                    "Fetched {} events (latest_ledger={:?})",
                    result.events.len(),
                    result.latest_ledger
                );

                return Ok((result.events, result.cursor, result.latest_ledger));
            }
        }
    }
}

fn build_params(
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": contract_ids
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`KeyEvent`]s.
///
/// Events from failed contract calls are dropped: their state changes were
/// rolled back.
pub fn decode_events(raw: &[RawEvent]) -> Vec<KeyEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call != Some(false))
        .filter_map(decode_single)
        .collect()
}

fn decode_single(raw: &RawEvent) -> Option<KeyEvent> {
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_symbol(first_topic)).refine(&raw.value);

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);
    let contract_id = raw.contract_id.clone().unwrap_or_default();
    let subject = raw.topic.get(1).map(|t| extract_scalar(t));

    let actor = extract_field(&raw.value, kind.actor_fields()).or_else(|| {
        // Config-style events publish a bare address as their data.
        raw.value.as_str().map(String::from)
    });
    let amount = extract_field(&raw.value, kind.amount_fields());

    let event_id = raw.id.clone().unwrap_or_else(|| {
        format!(
            "{ledger}:{contract_id}:{}:{}",
            kind.as_str(),
            subject.as_deref().unwrap_or("-")
        )
    });

    Some(KeyEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        subject,
        actor,
        amount,
        data: raw.value.to_string(),
        ledger,
        timestamp,
        contract_id,
        tx_hash: raw.tx_hash.clone(),
    })
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(key) {
            let s = match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            };
            if s.is_some() {
                return s;
            }
        }
    }
    None
}

/// Extract a Soroban Symbol from the decoded topic string.
/// The RPC may return `{"type":"symbol","value":"created"}` or just the raw string.
fn extract_symbol(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    raw.to_string()
}

/// Normalise a subject topic: numbers and addresses pass through, `bytes`
/// (package hashes) are rendered as lowercase hex.
fn extract_scalar(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        let value = v.get("value");
        if v.get("type").and_then(Value::as_str) == Some("bytes") {
            if let Some(encoded) = value.and_then(Value::as_str) {
                return STANDARD
                    .decode(encoded)
                    .map(hex::encode)
                    .unwrap_or_else(|_| encoded.to_lowercase());
            }
        }
        if let Some(n) = value.and_then(Value::as_u64) {
            return n.to_string();
        }
        if let Some(s) = value.and_then(Value::as_str) {
            return s.to_string();
        }
    }
    raw.to_string()
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
