//! TLS materialization: file-path descriptors → ready-to-use rustls client
//! configuration.
//!
//! Rules:
//! - no descriptor → no TLS (`Ok(None)`), not an error;
//! - a truststore path replaces the ambient roots with the roots it holds;
//! - a cert path and a key path together are presented for mutual TLS, one
//!   without the other is [`ConfigError::IncompleteKeyPair`];
//! - a descriptor with nothing set still yields TLS, trusting the bundled
//!   web PKI roots.
//!
//! Every byte is read through the injected [`FileSource`].

use std::path::Path;
use std::sync::Arc;

use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::pem::PemObject;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::fs::FileSource;
use crate::types::{ServerTls, Tls, non_empty};

/// Where a materialized configuration gets its trust anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustSource {
    /// Bundled web PKI roots.
    System,
    /// Roots loaded from a truststore file.
    Truststore {
        /// Path of the truststore.
        path: String,
        /// Number of certificates accepted as roots.
        roots: usize,
    },
}

/// A client TLS configuration built from a [`Tls`] descriptor.
#[derive(Debug, Clone)]
pub struct MaterializedTls {
    /// The configuration handed to networking code.
    pub config: Arc<ClientConfig>,
    /// Where the trust anchors came from.
    pub trust: TrustSource,
    /// Whether a client certificate is presented.
    pub presents_identity: bool,
}

/// TLS for one listener, produced only when the listener has TLS enabled.
#[derive(Debug, Clone)]
pub struct ListenerTls {
    /// Listener name the entry applies to.
    pub name: Option<String>,
    /// Materialized credentials.
    pub tls: MaterializedTls,
    /// Whether the listener must demand client certificates. Not consumed
    /// here; listener setup acts on it.
    pub require_client_auth: bool,
}

/// Materialize an optional descriptor. `None` means "no TLS configured".
///
/// # Errors
///
/// See [`Tls::materialize`].
pub fn materialize<F: FileSource + ?Sized>(
    descriptor: Option<&Tls>,
    fs: &F,
) -> ConfigResult<Option<MaterializedTls>> {
    descriptor.map(|tls| tls.materialize(fs)).transpose()
}

impl Tls {
    /// Build a client TLS configuration from the paths in this descriptor.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::IncompleteKeyPair`] if only one of cert/key is set.
    /// - [`ConfigError::CredentialRead`] if a file cannot be read.
    /// - [`ConfigError::InvalidCredential`] if a file holds no usable PEM.
    /// - [`ConfigError::TlsBuild`] if rustls rejects the material.
    pub fn materialize<F: FileSource + ?Sized>(&self, fs: &F) -> ConfigResult<MaterializedTls> {
        let key_pair = self.key_pair()?;

        let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
        let builder = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?;

        let (roots, trust) = match non_empty(self.truststore_file.as_deref()) {
            Some(path) => load_truststore(path, fs)?,
            None => (
                RootCertStore {
                    roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
                },
                TrustSource::System,
            ),
        };
        let builder = builder.with_root_certificates(roots);

        let (config, presents_identity) = match key_pair {
            Some((cert_path, key_path)) => {
                let chain = parse_certificates(cert_path, &read_credential(cert_path, fs)?)?;
                let key = parse_private_key(key_path, &read_credential(key_path, fs)?)?;
                debug!(cert = cert_path, key = key_path, "loaded client key pair");
                (builder.with_client_auth_cert(chain, key)?, true)
            },
            None => (builder.with_no_client_auth(), false),
        };

        Ok(MaterializedTls {
            config: Arc::new(config),
            trust,
            presents_identity,
        })
    }

    /// The `(cert, key)` paths when both are set, `None` when neither is.
    fn key_pair(&self) -> ConfigResult<Option<(&str, &str)>> {
        match (
            non_empty(self.cert_file.as_deref()),
            non_empty(self.key_file.as_deref()),
        ) {
            (Some(cert), Some(key)) => Ok(Some((cert, key))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::IncompleteKeyPair {
                present: "cert_file",
                missing: "key_file",
            }),
            (None, Some(_)) => Err(ConfigError::IncompleteKeyPair {
                present: "key_file",
                missing: "cert_file",
            }),
        }
    }
}

impl ServerTls {
    /// Materialize this listener's credentials. Returns `None` when
    /// `enabled` is false, whatever paths are set.
    ///
    /// # Errors
    ///
    /// See [`Tls::materialize`].
    pub fn materialize<F: FileSource + ?Sized>(&self, fs: &F) -> ConfigResult<Option<ListenerTls>> {
        if !self.enabled {
            debug!(listener = ?self.name, "listener TLS disabled");
            return Ok(None);
        }
        let tls = self.as_client_tls().materialize(fs)?;
        Ok(Some(ListenerTls {
            name: self.name.clone(),
            tls,
            require_client_auth: self.require_client_auth,
        }))
    }
}

fn read_credential<F: FileSource + ?Sized>(path: &str, fs: &F) -> ConfigResult<Vec<u8>> {
    fs.read_file(Path::new(path))
        .map_err(|e| ConfigError::CredentialRead {
            path: path.to_owned(),
            source: e,
        })
}

fn load_truststore<F: FileSource + ?Sized>(
    path: &str,
    fs: &F,
) -> ConfigResult<(RootCertStore, TrustSource)> {
    let certs = parse_certificates(path, &read_credential(path, fs)?)?;
    let mut roots = RootCertStore::empty();
    let (added, ignored) = roots.add_parsable_certificates(certs);
    if added == 0 {
        return Err(ConfigError::InvalidCredential {
            path: path.to_owned(),
            message: "no usable root certificates".to_owned(),
        });
    }
    debug!(path, added, ignored, "loaded truststore");
    Ok((
        roots,
        TrustSource::Truststore {
            path: path.to_owned(),
            roots: added,
        },
    ))
}

fn parse_certificates(path: &str, pem: &[u8]) -> ConfigResult<Vec<CertificateDer<'static>>> {
    let certs = CertificateDer::pem_slice_iter(pem)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::InvalidCredential {
            path: path.to_owned(),
            message: e.to_string(),
        })?;
    if certs.is_empty() {
        return Err(ConfigError::InvalidCredential {
            path: path.to_owned(),
            message: "no PEM certificates found".to_owned(),
        });
    }
    Ok(certs)
}

fn parse_private_key(path: &str, pem: &[u8]) -> ConfigResult<PrivateKeyDer<'static>> {
    PrivateKeyDer::from_pem_slice(pem).map_err(|e| ConfigError::InvalidCredential {
        path: path.to_owned(),
        message: e.to_string(),
    })
}
