//! etcd v3 store over the JSON gRPC gateway (`/v3/kv/*`).
//!
//! Keys and values travel base64-encoded in JSON bodies.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::infrastructure::traits::KeyValueStore;
use crate::infrastructure::{InfraError, InfraResult};

const BACKEND: &str = "etcd";

#[derive(Debug, Serialize)]
struct RangeRequest {
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    range_end: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutRequest {
    key: String,
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct RangeResponse {
    #[serde(default)]
    kvs: Vec<KeyValue>,
}

#[derive(Debug, Deserialize)]
struct KeyValue {
    key: String,
    #[serde(default)]
    value: String,
}

/// Key-value store backed by an etcd v3 cluster member.
#[derive(Debug)]
pub struct EtcdStore {
    client: Client,
    endpoint: String,
}

impl EtcdStore {
    pub fn new(host: &str, port: u16, timeout: Duration) -> InfraResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InfraError::http("build etcd client", e))?;
        Ok(Self {
            client,
            endpoint: format!("http://{host}:{port}/v3"),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn range(&self, request: &RangeRequest) -> InfraResult<Vec<(String, String)>> {
        let url = format!("{}/kv/range", self.endpoint);
        let response: RangeResponse = self
            .client
            .post(&url)
            .json(request)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| InfraError::http(format!("POST {url}"), e))?;
        decode_range(response)
    }
}

impl KeyValueStore for EtcdStore {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn get(&self, key: &str) -> InfraResult<Option<String>> {
        let request = RangeRequest {
            key: encode(key.as_bytes()),
            range_end: None,
        };
        Ok(self.range(&request)?.into_iter().next().map(|(_, v)| v))
    }

    fn put(&mut self, key: &str, value: &str) -> InfraResult<()> {
        let url = format!("{}/kv/put", self.endpoint);
        debug!("etcd: put {}", key);
        let request = PutRequest {
            key: encode(key.as_bytes()),
            value: encode(value.as_bytes()),
        };
        self.client
            .post(&url)
            .json(&request)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| InfraError::http(format!("POST {url}"), e))?;
        Ok(())
    }

    fn scan(&self, prefix: &str) -> InfraResult<Vec<(String, String)>> {
        let request = RangeRequest {
            key: encode(prefix.as_bytes()),
            range_end: Some(encode(&prefix_end(prefix.as_bytes()))),
        };
        self.range(&request)
    }
}

fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

fn decode(field: &str, encoded: &str) -> InfraResult<String> {
    let bytes = STANDARD.decode(encoded).map_err(|e| InfraError::Decode {
        backend: BACKEND,
        message: format!("{field} is not base64: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| InfraError::Decode {
        backend: BACKEND,
        message: format!("{field} is not UTF-8: {e}"),
    })
}

fn decode_range(response: RangeResponse) -> InfraResult<Vec<(String, String)>> {
    response
        .kvs
        .into_iter()
        .map(|kv| Ok((decode("key", &kv.key)?, decode("value", &kv.value)?)))
        .collect()
}

/// Smallest key greater than every key starting with `prefix`.
///
/// Trailing `0xff` bytes cannot be incremented and are dropped; an all-`0xff`
/// prefix yields `\0`, which etcd reads as "up to the end of the keyspace".
fn prefix_end(prefix: &[u8]) -> Vec<u8> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < 0xff {
            end.push(last + 1);
            return end;
        }
    }
    vec![0]
}
