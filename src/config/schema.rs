//! Configuration schema definitions.
//!
//! [`HostConfig`] is the hot-reloadable document (host → directory mapping).
//! [`ServerSettings`] holds launcher settings that are fixed for the process
//! lifetime and come from the command line.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::net::TrustedProxies;

/// Host-to-directory mapping loaded from the configuration file.
///
/// Hosts are matched exactly against the request's Host header, including
/// any port suffix and without case folding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostConfig {
    /// Mapping of host header value to the directory served for it.
    #[serde(rename = "host", default, deserialize_with = "null_as_empty")]
    pub hosts: BTreeMap<String, PathBuf>,
}

impl HostConfig {
    pub fn new(hosts: BTreeMap<String, PathBuf>) -> Self {
        Self { hosts }
    }

    /// Directory mapped to `host`, if any.
    pub fn directory_for(&self, host: &str) -> Option<&Path> {
        self.hosts.get(host).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl<H, D> FromIterator<(H, D)> for HostConfig
where
    H: Into<String>,
    D: Into<PathBuf>,
{
    fn from_iter<I: IntoIterator<Item = (H, D)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(host, dir)| (host.into(), dir.into()))
                .collect(),
        )
    }
}

/// `host:` with no value is an empty mapping rather than a type error.
fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<BTreeMap<String, PathBuf>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Process-wide launcher settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Interface to bind (combined with `port`).
    pub bind: String,

    /// Listening port.
    pub port: String,

    /// Path of the host mapping document.
    pub config_path: PathBuf,

    /// Directory served for hosts without a mapping.
    pub default_root: PathBuf,

    /// Require on-disk existence before handing a request to the file responder.
    pub strict: bool,

    /// Verbose framework logging.
    pub debug: bool,

    /// Proxies whose forwarding headers are trusted for client IP logging.
    pub trusted_proxies: TrustedProxies,

    /// Mount `GET /reload`.
    pub reload_endpoint: bool,

    /// Watch the configuration file for changes.
    pub watch: bool,

    /// Prometheus exporter address; metrics are off when unset.
    pub metrics_address: Option<SocketAddr>,

    /// Upper bound for handling a single request.
    pub request_timeout: Duration,
}

impl ServerSettings {
    /// Address string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: "8080".to_string(),
            config_path: PathBuf::from("config.yml"),
            default_root: PathBuf::from("./"),
            strict: false,
            debug: false,
            trusted_proxies: TrustedProxies::default(),
            reload_endpoint: false,
            watch: true,
            metrics_address: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}
