//! Configuration types for a broker node and its companion CLI.
//!
//! Every block that only models a subset of the keys it may meet carries an
//! [`Extra`] side-map. Keys not claimed by a named field land there during
//! deserialization and are written back at the same nesting level on
//! serialization, so a read-modify-write cycle never drops configuration this
//! crate does not understand.
//!
//! [`Config::default()`] is the *zero* document (what an empty file parses
//! to). Production defaults live in the embedded defaults table applied by
//! the [`loader`](crate::loader).

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{ConfigError, ConfigResult};

/// File name of the process lock inside the data directory.
pub const PID_FILE_NAME: &str = "pid.lock";

/// Unrecognised keys found at one nesting level, kept verbatim and in order.
pub type Extra = serde_yaml::Mapping;

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Accept any scalar for a string field. `rack: 1` and `password: 123456`
/// are strings to the node even though YAML reads them as numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

/// Like [`lenient_string`], with `null` read as `None`.
fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_to_string(serde_yaml::Value::deserialize(deserializer)?)
}

fn scalar_to_string<E: de::Error>(value: serde_yaml::Value) -> Result<Option<String>, E> {
    use serde_yaml::Value;

    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Sequence(_) => Err(E::invalid_type(de::Unexpected::Seq, &"a string")),
        Value::Mapping(_) => Err(E::invalid_type(de::Unexpected::Map, &"a string")),
    }
}

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration document for a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stable identifier of this node installation.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub node_uuid: Option<String>,
    /// Organization the node is registered to.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub organization: Option<String>,
    /// Enterprise license key.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub license_key: Option<String>,
    /// Cluster identifier.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub cluster_id: Option<String>,
    /// Path of the file this document was loaded from.
    #[serde(deserialize_with = "lenient_string")]
    pub config_file: String,
    /// Core node settings.
    pub redpanda: RedpandaConfig,
    /// CLI-facing client and tuning settings.
    pub rpk: RpkConfig,
    /// HTTP proxy front-end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pandaproxy: Option<Pandaproxy>,
    /// Kafka client used by the HTTP proxy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pandaproxy_client: Option<KafkaClient>,
    /// Schema registry front-end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_registry: Option<SchemaRegistry>,
    /// Kafka client used by the schema registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_registry_client: Option<KafkaClient>,
    /// Unrecognised top-level keys.
    #[serde(flatten)]
    pub other: Extra,
}

impl Config {
    /// Parse a YAML document. An empty or comment-only document yields the
    /// zero configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the input is not valid YAML or
    /// does not fit the schema.
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let raw = crate::loader::parse_document(content, "<yaml input>")?;
        Self::from_value(raw, "<yaml input>")
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::JsonError`] if the input is not valid JSON or
    /// does not fit the schema.
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::JsonError {
            path: "<json input>".to_owned(),
            source: e,
        })
    }

    /// Serialize to YAML, unknown keys included.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SerializeError`] if serialization fails.
    pub fn to_yaml(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Serialize to pretty-printed JSON, unknown keys included.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SerializeError`] if serialization fails (for
    /// example an unknown key that is not a string or number).
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Convert to a raw YAML tree.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SerializeError`] if serialization fails.
    pub fn to_value(&self) -> ConfigResult<serde_yaml::Value> {
        serde_yaml::to_value(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Deserialize a raw YAML tree. `origin` names the source in errors.
    pub(crate) fn from_value(raw: serde_yaml::Value, origin: &str) -> ConfigResult<Self> {
        serde_yaml::from_value(raw).map_err(|e| ConfigError::ParseError {
            path: origin.to_owned(),
            source: e,
        })
    }

    /// Path of the process lock file: the data directory joined with
    /// [`PID_FILE_NAME`]. Computed on every call.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBasePath`] if the data directory is empty
    /// or unusable.
    pub fn pid_file(&self) -> ConfigResult<PathBuf> {
        lock_file_path(&self.redpanda.data_directory)
    }
}

/// Join `data_directory` with [`PID_FILE_NAME`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBasePath`] for an empty or whitespace-only
/// directory, or one containing a NUL byte.
pub fn lock_file_path(data_directory: &str) -> ConfigResult<PathBuf> {
    if data_directory.trim().is_empty() {
        return Err(ConfigError::InvalidBasePath {
            path: data_directory.to_owned(),
            message: "data directory is empty".to_owned(),
        });
    }
    if data_directory.contains('\0') {
        return Err(ConfigError::InvalidBasePath {
            path: data_directory.escape_default().to_string(),
            message: "data directory contains a NUL byte".to_owned(),
        });
    }
    Ok(Path::new(data_directory).join(PID_FILE_NAME))
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// A host and port. An empty address means "bind-all / inherit".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketAddress {
    /// Host name or IP literal.
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    /// TCP port.
    pub port: u16,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

impl SocketAddress {
    /// Create an address.
    #[must_use]
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
            other: Extra::new(),
        }
    }
}

impl fmt::Display for SocketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_host_port(f, &self.address, self.port)
    }
}

/// A host and port with an optional listener label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedSocketAddress {
    /// Host name or IP literal.
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    /// TCP port.
    pub port: u16,
    /// Label distinguishing listeners of the same kind (e.g. internal vs
    /// external).
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub name: Option<String>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

impl NamedSocketAddress {
    /// Create an unnamed listener address.
    #[must_use]
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
            name: None,
            other: Extra::new(),
        }
    }

    /// Attach a listener label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl fmt::Display for NamedSocketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_host_port(f, &self.address, self.port)
    }
}

fn write_host_port(f: &mut fmt::Formatter<'_>, address: &str, port: u16) -> fmt::Result {
    if address.contains(':') {
        write!(f, "[{address}]:{port}")
    } else {
        write!(f, "{address}:{port}")
    }
}

/// A cluster peer used for initial discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedServer {
    /// The peer's RPC endpoint.
    pub host: SocketAddress,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

// ---------------------------------------------------------------------------
// TLS descriptors
// ---------------------------------------------------------------------------

/// Credentials for a process acting as a TLS client. Holds paths, never key
/// bytes; see [`Tls::materialize`](crate::tls) for turning it into a rustls
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tls {
    /// PEM private key presented for mutual TLS.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub key_file: Option<String>,
    /// PEM certificate chain presented for mutual TLS.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub cert_file: Option<String>,
    /// PEM bundle of trusted roots.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub truststore_file: Option<String>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

impl Tls {
    /// True when no path is set (absent or empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        non_empty(self.key_file.as_deref()).is_none()
            && non_empty(self.cert_file.as_deref()).is_none()
            && non_empty(self.truststore_file.as_deref()).is_none()
    }
}

/// A listener's TLS posture. `enabled = false` means plaintext regardless of
/// the other fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerTls {
    /// Name of the listener this entry applies to.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub name: Option<String>,
    /// PEM private key.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub key_file: Option<String>,
    /// PEM certificate chain.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub cert_file: Option<String>,
    /// PEM bundle of trusted roots.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub truststore_file: Option<String>,
    /// Whether the listener negotiates TLS at all.
    #[serde(skip_serializing_if = "is_false")]
    pub enabled: bool,
    /// Whether peers must present a client certificate.
    #[serde(skip_serializing_if = "is_false")]
    pub require_client_auth: bool,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

impl ServerTls {
    /// The key/cert/truststore paths as a client-side descriptor.
    #[must_use]
    pub fn as_client_tls(&self) -> Tls {
        Tls {
            key_file: self.key_file.clone(),
            cert_file: self.cert_file.clone(),
            truststore_file: self.truststore_file.clone(),
            other: Extra::new(),
        }
    }

    /// True for the zero value (nothing configured, no unknown keys).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn matches_listener(&self, listener: Option<&str>) -> bool {
        non_empty(self.name.as_deref()) == non_empty(listener)
    }
}

/// Treat `Some("")` the same as `None`.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// SASL
// ---------------------------------------------------------------------------

/// SASL credentials used by CLI clients.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sasl {
    /// User name.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub user: Option<String>,
    /// Password.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub password: Option<String>,
    /// Mechanism (e.g. `SCRAM-SHA-256`).
    #[serde(
        rename = "type",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub mechanism: Option<String>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

impl Sasl {
    /// True when no field is set (absent or empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        non_empty(self.user.as_deref()).is_none()
            && non_empty(self.password.as_deref()).is_none()
            && non_empty(self.mechanism.as_deref()).is_none()
    }
}

impl fmt::Debug for Sasl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sasl")
            .field("user", &self.user)
            .field("has_password", &self.password.is_some())
            .field("mechanism", &self.mechanism)
            .field("other", &self.other)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// KafkaClient
// ---------------------------------------------------------------------------

/// Kafka client settings used by auxiliary front-ends to reach the brokers.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KafkaClient {
    /// Broker endpoints, in preference order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub brokers: Vec<SocketAddress>,
    /// TLS used towards the brokers.
    #[serde(skip_serializing_if = "ServerTls::is_empty")]
    pub broker_tls: ServerTls,
    /// SASL mechanism.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub sasl_mechanism: Option<String>,
    /// SCRAM user name.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub scram_username: Option<String>,
    /// SCRAM password.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub scram_password: Option<String>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

impl fmt::Debug for KafkaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KafkaClient")
            .field("brokers", &self.brokers)
            .field("broker_tls", &self.broker_tls)
            .field("sasl_mechanism", &self.sasl_mechanism)
            .field("scram_username", &self.scram_username)
            .field("has_scram_password", &self.scram_password.is_some())
            .field("other", &self.other)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// RedpandaConfig
// ---------------------------------------------------------------------------

/// Core node settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedpandaConfig {
    /// Data directory.
    #[serde(deserialize_with = "lenient_string")]
    pub data_directory: String,
    /// Numeric node id.
    pub node_id: i32,
    /// Rack label for replica placement.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub rack: Option<String>,
    /// Peers contacted for initial cluster discovery.
    pub seed_servers: Vec<SeedServer>,
    /// Internal RPC listener.
    pub rpc_server: SocketAddress,
    /// TLS for the RPC listener.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rpc_server_tls: Vec<ServerTls>,
    /// Kafka protocol listeners.
    pub kafka_api: Vec<NamedSocketAddress>,
    /// TLS for Kafka listeners, matched by `name`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub kafka_api_tls: Vec<ServerTls>,
    /// Admin API listeners.
    #[serde(rename = "admin")]
    pub admin_api: Vec<NamedSocketAddress>,
    /// TLS for admin listeners, matched by `name`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub admin_api_tls: Vec<ServerTls>,
    /// Coprocessor supervisor endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coproc_supervisor_server: Option<SocketAddress>,
    /// Directory holding the admin API documentation.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub admin_api_doc_dir: Option<String>,
    /// Directory holding dashboard assets.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub dashboard_dir: Option<String>,
    /// Local cache for tiered storage.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub cloud_storage_cache_directory: Option<String>,
    /// RPC address announced to peers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertised_rpc_api: Option<SocketAddress>,
    /// Kafka addresses announced to clients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advertised_kafka_api: Vec<NamedSocketAddress>,
    /// Relaxes production safety checks.
    pub developer_mode: bool,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

impl RedpandaConfig {
    /// TLS entry for the Kafka listener labelled `listener` (`None` for the
    /// unnamed listener).
    #[must_use]
    pub fn kafka_api_tls_for(&self, listener: Option<&str>) -> Option<&ServerTls> {
        self.kafka_api_tls
            .iter()
            .find(|tls| tls.matches_listener(listener))
    }

    /// TLS entry for the admin listener labelled `listener`.
    #[must_use]
    pub fn admin_api_tls_for(&self, listener: Option<&str>) -> Option<&ServerTls> {
        self.admin_api_tls
            .iter()
            .find(|tls| tls.matches_listener(listener))
    }
}

// ---------------------------------------------------------------------------
// Auxiliary front-ends
// ---------------------------------------------------------------------------

/// HTTP proxy listeners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pandaproxy {
    /// Proxy listeners.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pandaproxy_api: Vec<NamedSocketAddress>,
    /// TLS for proxy listeners.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pandaproxy_api_tls: Vec<ServerTls>,
    /// Proxy addresses announced to clients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advertised_pandaproxy_api: Vec<NamedSocketAddress>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

/// Schema registry listeners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaRegistry {
    /// Registry listeners.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schema_registry_api: Vec<NamedSocketAddress>,
    /// TLS for registry listeners.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schema_registry_api_tls: Vec<ServerTls>,
    /// Replication factor of the schemas topic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_registry_replication_factor: Option<i32>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

// ---------------------------------------------------------------------------
// RpkConfig
// ---------------------------------------------------------------------------

/// CLI-facing settings: client endpoints, credentials and tuner toggles.
///
/// `tls` and `sasl` at this level are deprecated in favour of
/// `kafka_api.tls` / `kafka_api.sasl` and `admin_api.tls` /
/// `admin_api.sasl`. They are kept as loaded and consulted lazily; see
/// [`crate::compat`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpkConfig {
    /// Deprecated: TLS for every API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,
    /// Deprecated: SASL for every API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sasl: Option<Sasl>,
    /// Kafka API client settings.
    #[serde(skip_serializing_if = "RpkKafkaApi::is_empty")]
    pub kafka_api: RpkKafkaApi,
    /// Admin API client settings.
    #[serde(skip_serializing_if = "RpkAdminApi::is_empty")]
    pub admin_api: RpkAdminApi,
    /// Extra flags appended when starting the node.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_start_flags: Vec<String>,
    /// Send anonymous usage statistics.
    pub enable_usage_stats: bool,
    /// Tune NIC queues and IRQs.
    pub tune_network: bool,
    /// Pick the disk I/O scheduler.
    pub tune_disk_scheduler: bool,
    /// Disable disk request merging.
    pub tune_disk_nomerges: bool,
    /// Disable disk write caching.
    pub tune_disk_write_cache: bool,
    /// Distribute disk IRQs across cores.
    pub tune_disk_irq: bool,
    /// Schedule periodic fstrim.
    pub tune_fstrim: bool,
    /// Set the CPU governor and idle states.
    pub tune_cpu: bool,
    /// Raise the AIO event limit.
    pub tune_aio_events: bool,
    /// Prefer the TSC clock source.
    pub tune_clocksource: bool,
    /// Lower VM swappiness.
    pub tune_swappiness: bool,
    /// Enable transparent huge pages.
    pub tune_transparent_hugepages: bool,
    /// Lock process memory.
    pub enable_memory_locking: bool,
    /// Configure core dumps.
    pub tune_coredump: bool,
    /// Where core dumps are written.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub coredump_dir: Option<String>,
    /// Pre-allocate a ballast file.
    pub tune_ballast_file: bool,
    /// Ballast file location.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub ballast_file_path: Option<String>,
    /// Ballast file size (e.g. `1GiB`).
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub ballast_file_size: Option<String>,
    /// Well-known I/O profile name.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_string"
    )]
    pub well_known_io: Option<String>,
    /// The host is shared; avoid pinning and busy polling.
    pub overprovisioned: bool,
    /// Number of cores to use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smp: Option<u32>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

/// Kafka API endpoints and credentials used by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpkKafkaApi {
    /// `host:port` seed brokers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub brokers: Vec<String>,
    /// TLS towards the brokers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,
    /// SASL towards the brokers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sasl: Option<Sasl>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

impl RpkKafkaApi {
    /// True for the zero value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Admin API endpoints and credentials used by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpkAdminApi {
    /// `host:port` admin endpoints.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
    /// TLS towards the admin API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,
    /// Basic-auth style credentials towards the admin API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sasl: Option<Sasl>,
    /// Unrecognised keys.
    #[serde(flatten)]
    pub other: Extra,
}

impl RpkAdminApi {
    /// True for the zero value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_file_path_joins_data_directory() {
        let path = lock_file_path("/var/lib/node").unwrap();
        assert_eq!(path, PathBuf::from("/var/lib/node/pid.lock"));
    }

    #[test]
    fn test_lock_file_path_rejects_empty() {
        assert!(matches!(
            lock_file_path(""),
            Err(ConfigError::InvalidBasePath { .. })
        ));
        assert!(matches!(
            lock_file_path("   "),
            Err(ConfigError::InvalidBasePath { .. })
        ));
        assert!(matches!(
            lock_file_path("/var/\0lib"),
            Err(ConfigError::InvalidBasePath { .. })
        ));
    }

    #[test]
    fn test_pid_file_tracks_latest_directory() {
        let mut cfg = Config::default();
        cfg.redpanda.data_directory = "/data/a".to_owned();
        assert_eq!(cfg.pid_file().unwrap(), PathBuf::from("/data/a/pid.lock"));

        cfg.redpanda.data_directory = "/data/b".to_owned();
        assert_eq!(cfg.pid_file().unwrap(), PathBuf::from("/data/b/pid.lock"));
    }

    #[test]
    fn test_socket_address_display() {
        assert_eq!(SocketAddress::new("0.0.0.0", 9092).to_string(), "0.0.0.0:9092");
        assert_eq!(SocketAddress::new("::1", 9092).to_string(), "[::1]:9092");
    }

    #[test]
    fn test_empty_document_is_zero_config() {
        let cfg = Config::from_yaml("").unwrap();
        assert_eq!(cfg, Config::default());

        let cfg = Config::from_yaml("# only a comment\n").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_optional_string_absent_vs_empty() {
        let absent = Config::from_yaml("redpanda:\n  node_id: 1\n").unwrap();
        assert_eq!(absent.redpanda.rack, None);

        let empty = Config::from_yaml("redpanda:\n  rack: \"\"\n").unwrap();
        assert_eq!(empty.redpanda.rack.as_deref(), Some(""));

        let yaml = empty.to_yaml().unwrap();
        assert!(yaml.contains("rack: ''"), "explicit empty must be kept: {yaml}");
        assert!(!absent.to_yaml().unwrap().contains("rack"));
    }

    #[test]
    fn test_admin_field_renamed() {
        let cfg = Config::from_yaml(
            r"
redpanda:
  admin:
    - address: 127.0.0.1
      port: 9644
",
        )
        .unwrap();
        assert_eq!(cfg.redpanda.admin_api, vec![NamedSocketAddress::new("127.0.0.1", 9644)]);
    }

    #[test]
    fn test_sasl_mechanism_serialized_as_type() {
        let cfg = Config::from_yaml(
            r"
rpk:
  kafka_api:
    sasl:
      user: admin
      password: hunter2
      type: SCRAM-SHA-256
",
        )
        .unwrap();
        let sasl = cfg.rpk.kafka_api.sasl.as_ref().unwrap();
        assert_eq!(sasl.mechanism.as_deref(), Some("SCRAM-SHA-256"));
        assert!(cfg.to_yaml().unwrap().contains("type: SCRAM-SHA-256"));
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let sasl = Sasl {
            user: Some("admin".to_owned()),
            password: Some("hunter2".to_owned()),
            ..Sasl::default()
        };
        let debug_str = format!("{sasl:?}");
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("has_password: true"));

        let client = KafkaClient {
            scram_password: Some("s3cret".to_owned()),
            ..KafkaClient::default()
        };
        assert!(!format!("{client:?}").contains("s3cret"));
    }

    #[test]
    fn test_tls_for_listener_matches_by_name() {
        let cfg = Config::from_yaml(
            r"
redpanda:
  kafka_api:
    - {address: 0.0.0.0, port: 9092, name: internal}
    - {address: 0.0.0.0, port: 9093}
  kafka_api_tls:
    - {name: internal, enabled: true, cert_file: /a.crt, key_file: /a.key}
    - {enabled: false, cert_file: /b.crt}
",
        )
        .unwrap();

        let internal = cfg.redpanda.kafka_api_tls_for(Some("internal")).unwrap();
        assert!(internal.enabled);
        let unnamed = cfg.redpanda.kafka_api_tls_for(None).unwrap();
        assert_eq!(unnamed.cert_file.as_deref(), Some("/b.crt"));
        assert!(cfg.redpanda.kafka_api_tls_for(Some("external")).is_none());
        assert!(cfg.redpanda.admin_api_tls_for(None).is_none());
    }

    #[test]
    fn test_disabled_server_tls_keeps_paths() {
        let tls: ServerTls = serde_yaml::from_str(
            "cert_file: /c.crt\nkey_file: /c.key\ntruststore_file: /ca.crt\nenabled: false\n",
        )
        .unwrap();
        assert!(!tls.enabled);
        assert_eq!(tls.as_client_tls().truststore_file.as_deref(), Some("/ca.crt"));
        assert!(!tls.is_empty());
    }

    #[test]
    fn test_tls_is_empty_treats_blank_paths_as_unset() {
        assert!(Tls::default().is_empty());
        let blank = Tls {
            key_file: Some(String::new()),
            ..Tls::default()
        };
        assert!(blank.is_empty());
        let set = Tls {
            truststore_file: Some("/ca.crt".to_owned()),
            ..Tls::default()
        };
        assert!(!set.is_empty());
    }
}
