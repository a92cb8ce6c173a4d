//! Deep merge of YAML values with per-field source tracking.
//!
//! The merge operates on raw [`serde_yaml::Value`] trees rather than
//! deserialized structs. This correctly handles "absent vs default": a key
//! missing from an upper layer never overrides the layer below it.

mod deep;
mod path;
mod types;

pub use deep::{deep_merge_tracking, forget_below, record_all_leaves};
pub use path::{get_nested, key_str, set_nested};
pub use types::{ConfigLayer, FieldSources};

#[cfg(test)]
mod tests;
