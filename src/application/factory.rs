//! URI-driven construction of configurations.
//!
//! `etcd-v3://host[:port][/prefix]`, `consul://host[:port][/prefix]`,
//! `file:<path>` (format from the extension) and `ini:|json:|toml:|yaml:<path>`.

use std::path::PathBuf;
use std::sync::Arc;

use regex::Regex;
use tracing::{debug, instrument};

use crate::application::configuration::Configuration;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::{PortSettings, Settings};
use crate::infrastructure::backends::{
    ConsulStore, DocumentBackend, DocumentFormat, EtcdStore, FlatBackend,
};
use crate::infrastructure::traits::Backend;

const NETWORK_URI: &str =
    r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.-]*)://(?P<host>[^/:]*)(?::(?P<port>[^/]*))?(?P<path>/.*)?$";

/// A parsed backend URI. Nothing is opened yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendUri {
    Etcd {
        host: String,
        port: u16,
        prefix: String,
    },
    Consul {
        host: String,
        port: u16,
        prefix: String,
    },
    Document {
        path: PathBuf,
        format: DocumentFormat,
    },
}

impl BackendUri {
    /// Parse `uri`; `ports` supply the default port per network scheme.
    pub fn parse(uri: &str, ports: &PortSettings) -> ApplicationResult<Self> {
        let (scheme, rest) = uri
            .split_once(':')
            .ok_or_else(|| ApplicationError::malformed_uri(uri, "missing scheme separator ':'"))?;

        match scheme {
            "etcd-v3" => {
                let (host, port, prefix) = parse_network(uri)?;
                Ok(Self::Etcd {
                    host,
                    port: port.unwrap_or(ports.etcd),
                    prefix,
                })
            }
            "consul" => {
                let (host, port, prefix) = parse_network(uri)?;
                Ok(Self::Consul {
                    host,
                    port: port.unwrap_or(ports.consul),
                    prefix,
                })
            }
            "file" => {
                let path = document_path(uri, rest)?;
                let format = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(DocumentFormat::from_extension)
                    .ok_or_else(|| {
                        ApplicationError::malformed_uri(
                            uri,
                            "cannot tell document format from extension",
                        )
                    })?;
                Ok(Self::Document { path, format })
            }
            other => match DocumentFormat::from_scheme(other) {
                Some(format) => Ok(Self::Document {
                    path: document_path(uri, rest)?,
                    format,
                }),
                None => Err(ApplicationError::malformed_uri(
                    uri,
                    format!("unknown scheme '{other}'"),
                )),
            },
        }
    }
}

fn parse_network(uri: &str) -> ApplicationResult<(String, Option<u16>, String)> {
    let re = Regex::new(NETWORK_URI).map_err(|e| ApplicationError::Config {
        message: format!("URI pattern: {e}"),
    })?;
    let caps = re.captures(uri).ok_or_else(|| {
        ApplicationError::malformed_uri(uri, "expected scheme://host[:port][/path]")
    })?;

    let host = caps.name("host").map_or("", |m| m.as_str());
    if host.is_empty() {
        return Err(ApplicationError::malformed_uri(uri, "empty host"));
    }
    let port = match caps.name("port") {
        Some(m) => Some(m.as_str().parse::<u16>().map_err(|_| {
            ApplicationError::malformed_uri(uri, format!("bad port '{}'", m.as_str()))
        })?),
        None => None,
    };
    let prefix = caps.name("path").map_or("", |m| m.as_str()).to_string();
    Ok((host.to_string(), port, prefix))
}

/// `file://tmp/x.ini`, `file:///tmp/x.ini` and `file:/tmp/x.ini` name the same file.
fn document_path(uri: &str, rest: &str) -> ApplicationResult<PathBuf> {
    let expanded = shellexpand::full(rest)
        .map_err(|e| ApplicationError::malformed_uri(uri, e.to_string()))?;
    let trimmed = expanded.trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(ApplicationError::malformed_uri(uri, "empty path"));
    }
    if expanded.starts_with('/') {
        Ok(PathBuf::from(format!("/{trimmed}")))
    } else {
        Ok(PathBuf::from(trimmed))
    }
}

/// Builds a [`Configuration`] for a backend URI.
#[derive(Debug, Clone)]
pub struct ConfigurationFactory {
    settings: Arc<Settings>,
}

impl ConfigurationFactory {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn parse_uri(&self, uri: &str) -> ApplicationResult<BackendUri> {
        BackendUri::parse(uri, &self.settings.ports)
    }

    /// Open the backend named by `uri`.
    ///
    /// The URI is fully validated before any file or network access. The
    /// result splits paths with the configured separator; a network URI path
    /// becomes its prefix.
    #[instrument(skip(self))]
    pub fn get_configuration(&self, uri: &str) -> ApplicationResult<Configuration> {
        let parsed = self.parse_uri(uri)?;
        debug!("get_configuration: {:?}", parsed);

        let timeout = self.settings.http_timeout();
        let (backend, prefix): (Box<dyn Backend>, String) = match parsed {
            BackendUri::Etcd { host, port, prefix } => (
                Box::new(FlatBackend::new(EtcdStore::new(&host, port, timeout)?)),
                prefix,
            ),
            BackendUri::Consul { host, port, prefix } => (
                Box::new(FlatBackend::new(ConsulStore::new(&host, port, timeout)?)),
                prefix,
            ),
            BackendUri::Document { path, format } => (
                Box::new(DocumentBackend::from_file(&path, format)?),
                String::new(),
            ),
        };

        let mut configuration = Configuration::new(backend);
        // URI paths always use '/'; the configured separator applies afterwards.
        configuration.set_prefix(&prefix)?;
        configuration.set_path_separator(self.settings.path_separator);
        Ok(configuration)
    }
}
