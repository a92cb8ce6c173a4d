//! Config file discovery and layered loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Parse `defaults.yaml` → base
//! 2. Locate the config file (`--config`, `NODECFG_CONFIG_FILE`, search paths)
//! 3. Parse the file on its own → pristine snapshot
//! 4. Deep-merge the file over the defaults
//! 5. Apply `key=value` overrides
//! 6. Deserialize merged tree → effective `Config`
//! 7. Return `ResolvedConfig`

use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::fs::FileSource;
use crate::merge::{ConfigLayer, FieldSources, deep_merge_tracking, record_all_leaves};
use crate::overrides::Override;
use crate::show::ResolvedConfig;
use crate::types::Config;

/// Embedded default configuration.
const DEFAULTS_YAML: &str = include_str!("defaults.yaml");

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "NODECFG_CONFIG_FILE";

/// Locations tried, in order, when no path is given.
pub const DEFAULT_SEARCH_PATHS: [&str; 2] = ["redpanda.yaml", "/etc/redpanda/redpanda.yaml"];

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: usize = 1_048_576;

/// What to load and what to layer on top.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Explicit config file. Must exist when set.
    pub path: Option<PathBuf>,
    /// Overrides applied after the file, in order.
    pub overrides: Vec<Override>,
    /// Candidates tried when `path` is unset; the first one found wins.
    pub search_paths: Vec<PathBuf>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            path: None,
            overrides: Vec::new(),
            search_paths: DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl LoadOptions {
    /// Default search paths, no explicit file, no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`new`](Self::new), but take the path from
    /// [`CONFIG_ENV_VAR`] when it is set and non-empty.
    #[must_use]
    pub fn from_env() -> Self {
        let mut options = Self::new();
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            debug!(var = CONFIG_ENV_VAR, path = ?path, "config path from environment");
            options.path = Some(PathBuf::from(path));
        }
        options
    }

    /// Load exactly this file.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Replace the search paths.
    #[must_use]
    pub fn with_search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Append a `key=value` override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if `raw` is malformed.
    pub fn with_override(mut self, raw: &str) -> ConfigResult<Self> {
        self.overrides.push(Override::parse(raw)?);
        Ok(self)
    }
}

/// Load the configuration: defaults, then the file, then overrides.
///
/// When no file is found the document is built from defaults alone and
/// [`ResolvedConfig::pristine`] is `None`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the explicit file is missing or unreadable,
/// any document is malformed, or an override cannot be applied.
pub fn load<F: FileSource + ?Sized>(options: &LoadOptions, fs: &F) -> ConfigResult<ResolvedConfig> {
    // 1. Parse embedded defaults.
    let mut merged = parse_document(DEFAULTS_YAML, "<embedded defaults>")?;
    let mut field_sources = FieldSources::new();
    record_all_leaves(&merged, "", ConfigLayer::Defaults, &mut field_sources);

    // 2. Locate the file.
    let found = locate(options, fs)?;

    // 3-4. Snapshot it as loaded, then merge it over the defaults.
    let mut pristine = None;
    if let Some((path, content)) = &found {
        let origin = path.display().to_string();
        let raw = parse_document(content, &origin)?;
        pristine = Some(Config::from_value(raw.clone(), &origin)?);
        deep_merge_tracking(&mut merged, &raw, "", ConfigLayer::File, &mut field_sources);
        info!(path = %path.display(), "loaded config file");
    } else {
        debug!("no config file found, using defaults");
    }

    // 5. Overrides.
    for item in &options.overrides {
        item.apply(&mut merged, &mut field_sources)?;
    }

    // 6. Effective document.
    let mut config = Config::from_value(merged, "<merged config>")?;
    let loaded_path = found.map(|(path, _)| path);
    if let Some(path) = &loaded_path {
        config.config_file = path.display().to_string();
        field_sources.insert("config_file".to_owned(), ConfigLayer::File);
    }

    // 7. Result.
    let mut resolved = ResolvedConfig::new(config, field_sources, loaded_path);
    if let Some(snapshot) = &pristine {
        resolved.set_pristine(snapshot)?;
    }
    Ok(resolved)
}

/// Load a config from a specific file path (no defaults, no overrides).
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed.
pub fn load_file<F: FileSource + ?Sized>(path: &Path, fs: &F) -> ConfigResult<Config> {
    let content = try_read(path, fs)?.ok_or_else(|| ConfigError::ReadError {
        path: path.display().to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
    })?;
    let origin = path.display().to_string();
    Config::from_value(parse_document(&content, &origin)?, &origin)
}

/// Parse YAML text to a raw tree. An empty or comment-only document is an
/// empty mapping.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] if the text is not valid YAML.
pub fn parse_document(content: &str, origin: &str) -> ConfigResult<Value> {
    if is_blank_document(content) {
        return Ok(Value::Mapping(Mapping::new()));
    }
    let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: origin.to_owned(),
        source: e,
    })?;
    Ok(match value {
        Value::Null => Value::Mapping(Mapping::new()),
        other => other,
    })
}

fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

/// The path to load and its contents, or `None` when nothing was found.
fn locate<F: FileSource + ?Sized>(
    options: &LoadOptions,
    fs: &F,
) -> ConfigResult<Option<(PathBuf, String)>> {
    if let Some(path) = &options.path {
        return match try_read(path, fs)? {
            Some(content) => Ok(Some((path.clone(), content))),
            None => Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
            }),
        };
    }

    for candidate in &options.search_paths {
        if let Some(content) = try_read(candidate, fs)? {
            return Ok(Some((candidate.clone(), content)));
        }
    }
    Ok(None)
}

/// Try to read a file, returning `None` if the file doesn't exist.
fn try_read<F: FileSource + ?Sized>(path: &Path, fs: &F) -> ConfigResult<Option<String>> {
    let bytes = match fs.read_file(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.display().to_string(),
            size: bytes.len(),
            limit: MAX_CONFIG_FILE_SIZE,
        });
    }

    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemFs;
    use crate::types::{NamedSocketAddress, SocketAddress};

    fn no_search() -> LoadOptions {
        LoadOptions::new().with_search_paths(Vec::<PathBuf>::new())
    }

    #[test]
    fn test_defaults_parse() {
        let val = parse_document(DEFAULTS_YAML, "<embedded defaults>").unwrap();
        let map = val.as_mapping().unwrap();
        assert!(map.contains_key("redpanda"));
        assert!(map.contains_key("rpk"));
        assert!(map.contains_key("pandaproxy"));
    }

    #[test]
    fn test_defaults_deserialize_to_config() {
        let config = Config::from_yaml(DEFAULTS_YAML).unwrap();
        assert_eq!(config.config_file, "/etc/redpanda/redpanda.yaml");
        assert_eq!(config.redpanda.data_directory, "/var/lib/redpanda/data");
        assert_eq!(config.redpanda.rpc_server, SocketAddress::new("0.0.0.0", 33145));
        assert_eq!(config.redpanda.kafka_api, vec![NamedSocketAddress::new("0.0.0.0", 9092)]);
        assert_eq!(config.redpanda.admin_api, vec![NamedSocketAddress::new("0.0.0.0", 9644)]);
        assert!(config.redpanda.developer_mode);
        assert_eq!(config.rpk.coredump_dir.as_deref(), Some("/var/lib/redpanda/coredump"));
        assert!(config.pandaproxy.is_some());
        assert!(config.schema_registry.is_some());
        assert!(config.pandaproxy_client.is_none());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let resolved = load(&no_search(), &MemFs::new()).unwrap();
        assert!(resolved.pristine().is_none());
        assert!(resolved.loaded_path.is_none());
        assert_eq!(resolved.config.redpanda.node_id, 0);
        assert_eq!(
            resolved.field_sources.get("redpanda.data_directory"),
            Some(&ConfigLayer::Defaults)
        );
    }

    #[test]
    fn test_explicit_path_missing_is_error() {
        let options = LoadOptions::new().with_path("/nonexistent/redpanda.yaml");
        let result = load(&options, &MemFs::new());
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_search_paths_first_found_wins() {
        let fs = MemFs::new()
            .with_file("/b.yaml", "redpanda:\n  node_id: 2\n")
            .with_file("/c.yaml", "redpanda:\n  node_id: 3\n");
        let options = LoadOptions::new().with_search_paths(["/a.yaml", "/b.yaml", "/c.yaml"]);
        let resolved = load(&options, &fs).unwrap();
        assert_eq!(resolved.loaded_path, Some(PathBuf::from("/b.yaml")));
        assert_eq!(resolved.config.redpanda.node_id, 2);
        assert_eq!(resolved.config.config_file, "/b.yaml");
    }

    #[test]
    fn test_file_merges_over_defaults() {
        let fs = MemFs::new().with_file(
            "/etc/node.yaml",
            "redpanda:\n  node_id: 5\n  rack: r1\n",
        );
        let resolved = load(&no_search().with_path("/etc/node.yaml"), &fs).unwrap();

        assert_eq!(resolved.config.redpanda.node_id, 5);
        assert_eq!(resolved.config.redpanda.data_directory, "/var/lib/redpanda/data");
        assert_eq!(
            resolved.field_sources.get("redpanda.node_id"),
            Some(&ConfigLayer::File)
        );
        assert_eq!(
            resolved.field_sources.get("redpanda.data_directory"),
            Some(&ConfigLayer::Defaults)
        );

        // The snapshot has no defaults in it.
        let pristine = resolved.pristine().unwrap();
        assert_eq!(pristine.redpanda.node_id, 5);
        assert!(pristine.redpanda.data_directory.is_empty());
        assert!(pristine.redpanda.kafka_api.is_empty());
    }

    #[test]
    fn test_overrides_applied_last() {
        let fs = MemFs::new().with_file("/n.yaml", "redpanda:\n  node_id: 5\n");
        let options = no_search()
            .with_path("/n.yaml")
            .with_override("redpanda.node_id=9")
            .unwrap()
            .with_override("rpk.kafka_api.brokers=[\"10.0.0.1:9092\"]")
            .unwrap();
        let resolved = load(&options, &fs).unwrap();

        assert_eq!(resolved.config.redpanda.node_id, 9);
        assert_eq!(resolved.config.rpk.kafka_api.brokers, vec!["10.0.0.1:9092".to_owned()]);
        assert_eq!(
            resolved.field_sources.get("redpanda.node_id"),
            Some(&ConfigLayer::Override)
        );
        assert_eq!(resolved.pristine().unwrap().redpanda.node_id, 5);
    }

    #[test]
    fn test_bad_override_fails_load() {
        let options = no_search().with_override("redpanda.node_id.x=1").unwrap();
        let result = load(&options, &MemFs::new());
        assert!(matches!(result, Err(ConfigError::InvalidOverride { .. })));
    }

    #[test]
    fn test_numeric_override_into_string_field() {
        let options = no_search()
            .with_override("rpk.kafka_api.sasl.password=123456")
            .unwrap()
            .with_override("redpanda.rack=1")
            .unwrap()
            .with_override("rpk.tls.truststore_file=true")
            .unwrap();
        let resolved = load(&options, &MemFs::new()).unwrap();

        let sasl = resolved.config.rpk.kafka_api.sasl.as_ref().unwrap();
        assert_eq!(sasl.password.as_deref(), Some("123456"));
        assert_eq!(resolved.config.redpanda.rack.as_deref(), Some("1"));
        assert_eq!(
            resolved.config.rpk.tls.as_ref().unwrap().truststore_file.as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_numeric_file_values_into_string_fields() {
        let fs = MemFs::new().with_file(
            "/n.yaml",
            "redpanda:\n  rack: 7\n  data_directory: 2024\nrpk:\n  sasl:\n    user: 42\n    password: 123456\n",
        );
        let resolved = load(&no_search().with_path("/n.yaml"), &fs).unwrap();

        assert_eq!(resolved.config.redpanda.rack.as_deref(), Some("7"));
        assert_eq!(resolved.config.redpanda.data_directory, "2024");
        let pristine = resolved.pristine().unwrap();
        let sasl = pristine.rpk.sasl.as_ref().unwrap();
        assert_eq!(sasl.user.as_deref(), Some("42"));
        assert_eq!(sasl.password.as_deref(), Some("123456"));
    }

    #[test]
    fn test_mapping_into_string_field_is_parse_error() {
        let fs = MemFs::new().with_file("/n.yaml", "redpanda:\n  rack:\n    zone: a\n");
        let result = load(&no_search().with_path("/n.yaml"), &fs);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_empty_file_gives_present_zero_snapshot() {
        let fs = MemFs::new().with_file("/empty.yaml", "");
        let resolved = load(&no_search().with_path("/empty.yaml"), &fs).unwrap();
        assert_eq!(resolved.pristine(), Some(&Config::default()));
        assert_eq!(resolved.config.redpanda.data_directory, "/var/lib/redpanda/data");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let fs = MemFs::new().with_file("/bad.yaml", "redpanda: [unclosed\n");
        let result = load(&no_search().with_path("/bad.yaml"), &fs);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_file_nonexistent() {
        let result = load_file(Path::new("/nonexistent/redpanda.yaml"), &MemFs::new());
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_file_has_no_defaults() {
        let fs = MemFs::new().with_file("/n.yaml", "redpanda:\n  node_id: 1\n");
        let config = load_file(Path::new("/n.yaml"), &fs).unwrap();
        assert_eq!(config.redpanda.node_id, 1);
        assert!(config.redpanda.data_directory.is_empty());
    }

    #[test]
    fn test_try_read_missing() {
        let result = try_read(Path::new("/nonexistent.yaml"), &MemFs::new()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_oversized_config_rejected() {
        let data = "x: \"".to_owned() + &"a".repeat(1_100_000) + "\"";
        let fs = MemFs::new().with_file("/huge.yaml", data);
        let result = try_read(Path::new("/huge.yaml"), &fs);
        assert!(
            matches!(result, Err(ConfigError::FileTooLarge { .. })),
            "Expected FileTooLarge for oversized config, got: {result:?}"
        );
    }

    #[test]
    fn test_blank_documents() {
        assert!(is_blank_document(""));
        assert!(is_blank_document("\n  \n# comment\n---\n"));
        assert!(!is_blank_document("redpanda: {}\n"));
    }
}
