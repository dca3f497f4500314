//! Consul KV store over the HTTP API (`/v1/kv/*`).

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::infrastructure::traits::KeyValueStore;
use crate::infrastructure::{InfraError, InfraResult};

const BACKEND: &str = "consul";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Entry {
    key: String,
    value: Option<String>,
}

/// Key-value store backed by a Consul agent.
///
/// Consul keys carry no leading `/`; it is stripped on the way in and
/// restored on the way out.
#[derive(Debug)]
pub struct ConsulStore {
    client: Client,
    endpoint: String,
}

impl ConsulStore {
    pub fn new(host: &str, port: u16, timeout: Duration) -> InfraResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InfraError::http("build consul client", e))?;
        Ok(Self {
            client,
            endpoint: format!("http://{host}:{port}/v1/kv"),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, key: &str) -> String {
        format!("{}/{}", self.endpoint, key.trim_start_matches('/'))
    }

    /// Entries for `url`; Consul answers 404 when nothing matches.
    fn fetch(&self, url: &str) -> InfraResult<Vec<(String, String)>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| InfraError::http(format!("GET {url}"), e))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let entries: Vec<Entry> = response
            .error_for_status()
            .and_then(|r| r.json())
            .map_err(|e| InfraError::http(format!("GET {url}"), e))?;
        decode_entries(entries)
    }
}

impl KeyValueStore for ConsulStore {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn get(&self, key: &str) -> InfraResult<Option<String>> {
        let url = self.url(key);
        Ok(self.fetch(&url)?.into_iter().next().map(|(_, v)| v))
    }

    fn put(&mut self, key: &str, value: &str) -> InfraResult<()> {
        let url = self.url(key);
        debug!("consul: put {}", key);
        self.client
            .put(&url)
            .body(value.to_string())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| InfraError::http(format!("PUT {url}"), e))?;
        Ok(())
    }

    fn scan(&self, prefix: &str) -> InfraResult<Vec<(String, String)>> {
        let url = format!("{}?recurse=true", self.url(prefix));
        self.fetch(&url)
    }
}

/// Decode values and restore canonical keys. Folder entries have no value.
fn decode_entries(entries: Vec<Entry>) -> InfraResult<Vec<(String, String)>> {
    entries
        .into_iter()
        .filter_map(|entry| entry.value.map(|value| (entry.key, value)))
        .map(|(key, value)| {
            let bytes = STANDARD.decode(&value).map_err(|e| InfraError::Decode {
                backend: BACKEND,
                message: format!("value of {key} is not base64: {e}"),
            })?;
            let value = String::from_utf8(bytes).map_err(|e| InfraError::Decode {
                backend: BACKEND,
                message: format!("value of {key} is not UTF-8: {e}"),
            })?;
            Ok((format!("/{}", key.trim_start_matches('/')), value))
        })
        .collect()
}
