#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Configuration model for a broker node and its companion CLI.
//!
//! A load produces two documents: the *effective* [`Config`] (defaults, then
//! the file, then overrides) that everything reads, and the *pristine*
//! snapshot of exactly what the file contained. Both live in the
//! [`ResolvedConfig`] returned by the loader.
//!
//! # Usage
//!
//! ```rust,no_run
//! use nodecfg_config::{Config, LoadOptions};
//!
//! let resolved = Config::load(&LoadOptions::from_env()).unwrap();
//! println!("lock file: {}", resolved.config.pid_file().unwrap().display());
//! if let Some(file) = resolved.pristine() {
//!     println!("file sets node_id = {}", file.redpanda.node_id);
//! }
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Overrides** (`key=value`, e.g. `--set redpanda.node_id=3`)
//! 2. **Config file** (`--config`, `NODECFG_CONFIG_FILE`, `./redpanda.yaml`,
//!    `/etc/redpanda/redpanda.yaml`)
//! 3. **Embedded defaults** (`defaults.yaml` compiled into the binary)
//!
//! Keys this crate does not model are kept at every level and written back
//! on serialization.

/// Deprecated-field resolution.
pub mod compat;
/// Configuration error types.
pub mod error;
/// File-reading capability.
pub mod fs;
/// Configuration file discovery and loading.
pub mod loader;
/// Layered configuration merging with source tracking.
pub mod merge;
/// `key=value` overrides.
pub mod overrides;
/// Resolved configuration display and serialization.
pub mod show;
/// TLS materialization.
pub mod tls;
/// Configuration struct definitions.
pub mod types;

// Re-export primary types at the crate root.
pub use compat::{Resolution, resolve};
pub use error::{ConfigError, ConfigResult};
pub use fs::{FileSource, HostFs, MemFs};
pub use loader::LoadOptions;
pub use merge::{ConfigLayer, FieldSources};
pub use overrides::Override;
pub use show::{ResolvedConfig, ShowFormat};
pub use tls::{ListenerTls, MaterializedTls, TrustSource, materialize};
pub use types::*;

impl Config {
    /// Load configuration from the host filesystem: defaults, file,
    /// overrides.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the config file is malformed or an
    /// override cannot be applied.
    pub fn load(options: &LoadOptions) -> ConfigResult<ResolvedConfig> {
        loader::load(options, &HostFs)
    }

    /// Load configuration from a single file (no defaults, no overrides).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path, &HostFs)
    }
}
