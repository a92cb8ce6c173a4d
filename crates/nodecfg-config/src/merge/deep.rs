use serde_yaml::Value;

use super::{ConfigLayer, FieldSources, key_str};

/// Deep-merge `overlay` into `base`, recording which layer set each leaf
/// field. `prefix` is the dotted path prefix (e.g. `"redpanda"`) and `layer`
/// identifies where the overlay came from.
///
/// - Mappings merge recursively per-key.
/// - Scalars and sequences from the overlay **replace** the base value.
pub fn deep_merge_tracking(
    base: &mut Value,
    overlay: &Value,
    prefix: &str,
    layer: ConfigLayer,
    sources: &mut FieldSources,
) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let path = join(prefix, &key_str(key));

                if let Some(base_val) = base_map.get_mut(key) {
                    if overlay_val.is_mapping() && base_val.is_mapping() {
                        deep_merge_tracking(base_val, overlay_val, &path, layer, sources);
                    } else {
                        *base_val = overlay_val.clone();
                        forget_below(&path, sources);
                        record_all_leaves(overlay_val, &path, layer, sources);
                    }
                } else {
                    base_map.insert(key.clone(), overlay_val.clone());
                    record_all_leaves(overlay_val, &path, layer, sources);
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            forget_below(prefix, sources);
            record_all_leaves(overlay, prefix, layer, sources);
        },
    }
}

/// Walk a value tree and record all leaf paths with their source layer.
/// Sequences and empty mappings count as leaves.
pub fn record_all_leaves(val: &Value, prefix: &str, layer: ConfigLayer, sources: &mut FieldSources) {
    match val {
        Value::Mapping(map) if !map.is_empty() => {
            for (key, child) in map {
                record_all_leaves(child, &join(prefix, &key_str(key)), layer, sources);
            }
        },
        _ => {
            sources.insert(prefix.to_owned(), layer);
        },
    }
}

/// Drop recorded sources at or below `prefix`, for a subtree about to be
/// replaced.
pub fn forget_below(prefix: &str, sources: &mut FieldSources) {
    if prefix.is_empty() {
        sources.clear();
        return;
    }
    let nested = format!("{prefix}.");
    sources.retain(|path, _| path != prefix && !path.starts_with(&nested));
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}
