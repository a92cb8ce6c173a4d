//! Resolution of the deprecated `rpk.tls` / `rpk.sasl` fields.
//!
//! Order, per API, evaluated on every call and never written back:
//!
//! 1. the per-API field (`rpk.kafka_api.tls`, `rpk.admin_api.sasl`, ...) if it
//!    is present and non-empty;
//! 2. otherwise the legacy top-level field if it is present;
//! 3. otherwise nothing is configured.
//!
//! No consistency check is made between the two levels; the per-API value
//! simply wins.
//!
//! The two levels treat an empty block differently. An empty per-API block
//! (`rpk.kafka_api.tls: {}`) counts as not set, so with no legacy field the
//! API resolves to [`Resolution::Unset`] and runs without TLS. An empty
//! legacy block (`rpk.tls: {}`) is present, so it resolves to
//! [`Resolution::Legacy`] and materializes as TLS trusting the bundled roots.

use tracing::warn;

use crate::types::{RpkConfig, Sasl, Tls};

/// Settings that can be present yet carry nothing.
pub trait Unset {
    /// True when no field carries a value.
    fn is_unset(&self) -> bool;
}

impl Unset for Tls {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Unset for Sasl {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

/// Which level supplied a setting.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a, T> {
    /// The per-API field.
    PerApi(&'a T),
    /// The deprecated top-level field.
    Legacy(&'a T),
    /// Neither level.
    Unset,
}

impl<'a, T> Resolution<'a, T> {
    /// The resolved value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&'a T> {
        match *self {
            Self::PerApi(v) | Self::Legacy(v) => Some(v),
            Self::Unset => None,
        }
    }

    /// True when the deprecated field was used.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

/// Pick between a per-API setting and its deprecated fallback.
#[must_use]
pub fn resolve<'a, T: Unset>(per_api: Option<&'a T>, legacy: Option<&'a T>) -> Resolution<'a, T> {
    match (per_api, legacy) {
        (Some(current), _) if !current.is_unset() => Resolution::PerApi(current),
        (_, Some(old)) => Resolution::Legacy(old),
        _ => Resolution::Unset,
    }
}

fn note_legacy<'a, T>(
    resolution: Resolution<'a, T>,
    legacy: &str,
    replacement: &str,
) -> Resolution<'a, T> {
    if resolution.is_legacy() {
        warn!(field = legacy, replacement, "using deprecated configuration field");
    }
    resolution
}

impl RpkConfig {
    /// TLS for the Kafka API.
    #[must_use]
    pub fn kafka_tls(&self) -> Resolution<'_, Tls> {
        note_legacy(
            resolve(self.kafka_api.tls.as_ref(), self.tls.as_ref()),
            "rpk.tls",
            "rpk.kafka_api.tls",
        )
    }

    /// SASL for the Kafka API.
    #[must_use]
    pub fn kafka_sasl(&self) -> Resolution<'_, Sasl> {
        note_legacy(
            resolve(self.kafka_api.sasl.as_ref(), self.sasl.as_ref()),
            "rpk.sasl",
            "rpk.kafka_api.sasl",
        )
    }

    /// TLS for the admin API.
    #[must_use]
    pub fn admin_tls(&self) -> Resolution<'_, Tls> {
        note_legacy(
            resolve(self.admin_api.tls.as_ref(), self.tls.as_ref()),
            "rpk.tls",
            "rpk.admin_api.tls",
        )
    }

    /// SASL for the admin API.
    #[must_use]
    pub fn admin_sasl(&self) -> Resolution<'_, Sasl> {
        note_legacy(
            resolve(self.admin_api.sasl.as_ref(), self.sasl.as_ref()),
            "rpk.sasl",
            "rpk.admin_api.sasl",
        )
    }
}
