//! Upstash Redis REST client for batched counter reads.
//!
//! # Responsibility
//! - Issue one `MGET` per batch over the REST protocol.
//! - Decode the `{"result": [...]}` envelope into aligned count slots.
//!
//! # Invariants
//! - The whole request, including connect, is bounded by the configured
//!   timeout.
//! - Any element that is not `null`, a non-negative integer, or a decimal
//!   string rejects the whole batch.
//! - The bearer credential is only ever sent as a header, never logged.

use crate::store::{StoreError, StoreResult, ViewCountStore};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct RestReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// REST-backed view-count store.
pub struct UpstashRestStore {
    endpoint: String,
    credential: String,
    agent: ureq::Agent,
}

impl UpstashRestStore {
    pub fn new(endpoint: &str, credential: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            endpoint: endpoint.trim().trim_end_matches('/').to_string(),
            credential: credential.trim().to_string(),
            agent,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ViewCountStore for UpstashRestStore {
    fn batch_get(&self, keys: &[String]) -> StoreResult<Vec<Option<u64>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let command = mget_command(keys);
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.credential))
            .send_json(&command);

        let body = match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|err| StoreError::Unreachable(format!("failed to read body: {err}")))?,
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                return Err(StoreError::Status {
                    code,
                    body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
                });
            }
            Err(err) => return Err(StoreError::Unreachable(err.to_string())),
        };

        parse_mget_reply(&body, keys.len())
    }
}

/// Builds the REST command array `["MGET", key...]`.
pub fn mget_command(keys: &[String]) -> Vec<&str> {
    let mut command = Vec::with_capacity(keys.len() + 1);
    command.push("MGET");
    command.extend(keys.iter().map(String::as_str));
    command
}

/// Decodes an `MGET` reply body into `expected` aligned slots.
pub fn parse_mget_reply(body: &str, expected: usize) -> StoreResult<Vec<Option<u64>>> {
    let reply: RestReply = serde_json::from_str(body)
        .map_err(|err| StoreError::Malformed(format!("reply is not a JSON envelope: {err}")))?;

    if let Some(message) = reply.error {
        return Err(StoreError::Malformed(format!("store error: {message}")));
    }

    let items = match reply.result {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(StoreError::Malformed(format!(
                "`result` must be an array, got {}",
                json_kind(&other)
            )));
        }
        None => return Err(StoreError::Malformed("missing `result`".to_string())),
    };

    if items.len() != expected {
        return Err(StoreError::Malformed(format!(
            "expected {expected} results, got {}",
            items.len()
        )));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_count(index, item))
        .collect()
}

fn parse_count(index: usize, item: &Value) -> StoreResult<Option<u64>> {
    match item {
        Value::Null => Ok(None),
        Value::Number(number) => number.as_u64().map(Some).ok_or_else(|| {
            StoreError::Malformed(format!("result[{index}] is not a non-negative integer"))
        }),
        Value::String(text) => text.trim().parse::<u64>().map(Some).map_err(|_| {
            StoreError::Malformed(format!("result[{index}] is not a decimal counter"))
        }),
        other => Err(StoreError::Malformed(format!(
            "result[{index}] has unexpected type {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
