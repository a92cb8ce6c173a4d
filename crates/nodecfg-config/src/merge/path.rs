use serde_yaml::{Mapping, Value};

/// Render a mapping key as a path segment.
#[must_use]
pub fn key_str(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "~".to_owned(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}

/// Navigate into a nested value by dotted path segments. A numeric segment
/// indexes into a sequence.
#[must_use]
pub fn get_nested<'a>(val: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = val;
    for segment in path {
        current = match current {
            Value::Mapping(map) => map.get(*segment)?,
            Value::Sequence(seq) => seq.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Set a value at a nested path, creating intermediate mappings as needed.
///
/// A numeric segment addresses an existing sequence element; the index one
/// past the end appends.
///
/// # Errors
///
/// Returns a message if the path is empty, crosses a scalar, or indexes
/// outside a sequence.
pub fn set_nested(val: &mut Value, path: &[&str], new_val: Value) -> Result<(), String> {
    let Some((leaf, parents)) = path.split_last() else {
        return Err("empty key".to_owned());
    };

    let mut current = val;
    for segment in parents {
        current = child_mut(current, segment)?;
    }

    match current {
        Value::Sequence(seq) => {
            let index = sequence_index(leaf, seq.len())?;
            if index == seq.len() {
                seq.push(new_val);
            } else if let Some(slot) = seq.get_mut(index) {
                *slot = new_val;
            }
            Ok(())
        },
        other => {
            as_mapping(other, leaf)?.insert(Value::String((*leaf).to_owned()), new_val);
            Ok(())
        },
    }
}

fn child_mut<'a>(current: &'a mut Value, segment: &str) -> Result<&'a mut Value, String> {
    match current {
        Value::Sequence(seq) => {
            let index = sequence_index(segment, seq.len())?;
            if index == seq.len() {
                seq.push(Value::Mapping(Mapping::new()));
            }
            seq.get_mut(index)
                .ok_or_else(|| format!("index {index} is out of range"))
        },
        other => Ok(as_mapping(other, segment)?
            .entry(Value::String(segment.to_owned()))
            .or_insert(Value::Mapping(Mapping::new()))),
    }
}

/// View `current` as a mapping, turning null into an empty one.
fn as_mapping<'a>(current: &'a mut Value, segment: &str) -> Result<&'a mut Mapping, String> {
    if current.is_null() {
        *current = Value::Mapping(Mapping::new());
    }
    current
        .as_mapping_mut()
        .ok_or_else(|| format!("cannot set '{segment}' inside a scalar value"))
}

fn sequence_index(segment: &str, len: usize) -> Result<usize, String> {
    let index: usize = segment
        .parse()
        .map_err(|_| format!("'{segment}' is not a list index"))?;
    if index > len {
        return Err(format!("index {index} is out of range for a list of {len}"));
    }
    Ok(index)
}
