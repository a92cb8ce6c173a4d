use std::io;
use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TLS descriptor names a certificate without a key, or a key without a
    /// certificate.
    #[error("Incomplete TLS key pair: {present} is set but {missing} is not")]
    IncompleteKeyPair {
        /// The descriptor field that was set.
        present: &'static str,
        /// The descriptor field that is missing.
        missing: &'static str,
    },

    /// A credential file named by a TLS descriptor could not be read.
    #[error("Failed to read credential file at {path}: {source}")]
    CredentialRead {
        /// Path of the unreadable credential.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A credential file was read but holds no usable PEM material.
    #[error("Invalid credential file at {path}: {message}")]
    InvalidCredential {
        /// Path of the rejected credential.
        path: String,
        /// Why the contents were rejected.
        message: String,
    },

    /// rustls refused the assembled credentials.
    #[error("Failed to build TLS configuration: {0}")]
    TlsBuild(#[from] rustls::Error),

    /// A derived path was requested from an empty or unusable base directory.
    #[error("Invalid base path '{path}': {message}")]
    InvalidBasePath {
        /// The offending directory value.
        path: String,
        /// Why it was rejected.
        message: String,
    },

    /// Failed to read configuration file.
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// Path to the config file that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to parse YAML or JSON configuration.
    #[error("Failed to parse config at {path}: {source}")]
    ParseError {
        /// Path (or pseudo-path) of the document that failed to parse.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Failed to parse JSON configuration.
    #[error("Failed to parse JSON config at {path}: {source}")]
    JsonError {
        /// Path (or pseudo-path) of the document that failed to parse.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The config file exceeds the size limit.
    #[error("Config file at {path} is {size} bytes, exceeding the {limit} byte limit")]
    FileTooLarge {
        /// Path to the oversized file.
        path: String,
        /// Actual size in bytes.
        size: usize,
        /// Maximum accepted size in bytes.
        limit: usize,
    },

    /// Failed to serialize a document.
    #[error("Failed to serialize config: {0}")]
    SerializeError(String),

    /// A `key=value` override could not be understood.
    #[error("Invalid override '{raw}': {message}")]
    InvalidOverride {
        /// The override as given.
        raw: String,
        /// Why it was rejected.
        message: String,
    },

    /// The as-loaded document was requested but no file was loaded.
    #[error("No configuration file was loaded")]
    NotLoaded,

    /// A section named for display does not exist in the document.
    #[error("Unknown config section '{0}'")]
    UnknownSection(String),

    /// The as-loaded snapshot has already been assigned for this load.
    #[error("Pristine configuration snapshot is already set")]
    PristineAlreadySet,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
