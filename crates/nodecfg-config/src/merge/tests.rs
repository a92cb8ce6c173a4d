use serde_yaml::Value;

use super::*;

fn yaml(s: &str) -> Value {
    serde_yaml::from_str(s).unwrap()
}

#[test]
fn test_merge_scalars() {
    let mut base = yaml(
        r"
redpanda:
  data_directory: /var/lib/redpanda/data
  node_id: 0
",
    );
    let overlay = yaml(
        r"
redpanda:
  node_id: 3
",
    );

    deep_merge_tracking(&mut base, &overlay, "", ConfigLayer::File, &mut FieldSources::new());

    assert_eq!(base["redpanda"]["data_directory"].as_str(), Some("/var/lib/redpanda/data"));
    assert_eq!(base["redpanda"]["node_id"].as_i64(), Some(3));
}

#[test]
fn test_merge_new_keys() {
    let mut base = yaml("redpanda:\n  node_id: 0\n");
    let overlay = yaml(
        r"
redpanda:
  rack: r1
extra_feature_flag: true
",
    );

    deep_merge_tracking(&mut base, &overlay, "", ConfigLayer::File, &mut FieldSources::new());

    assert_eq!(base["redpanda"]["rack"].as_str(), Some("r1"));
    assert_eq!(base["extra_feature_flag"].as_bool(), Some(true));
}

#[test]
fn test_merge_sequences_replace() {
    let mut base = yaml(
        r"
redpanda:
  kafka_api:
    - {address: 0.0.0.0, port: 9092}
    - {address: 0.0.0.0, port: 9093}
",
    );
    let overlay = yaml(
        r"
redpanda:
  kafka_api:
    - {address: 10.0.0.1, port: 19092}
",
    );

    deep_merge_tracking(&mut base, &overlay, "", ConfigLayer::File, &mut FieldSources::new());

    let listeners = base["redpanda"]["kafka_api"].as_sequence().unwrap();
    assert_eq!(listeners.len(), 1);
    assert_eq!(listeners[0]["port"].as_u64(), Some(19092));
}

#[test]
fn test_deep_merge_tracking() {
    let mut base = yaml(
        r"
redpanda:
  data_directory: /var/lib/redpanda/data
  node_id: 0
",
    );
    let overlay = yaml(
        r"
redpanda:
  node_id: 2
",
    );

    let mut sources = FieldSources::new();
    deep_merge_tracking(&mut base, &overlay, "", ConfigLayer::File, &mut sources);

    assert_eq!(sources.get("redpanda.node_id"), Some(&ConfigLayer::File));
    assert!(!sources.contains_key("redpanda.data_directory"));
}

#[test]
fn test_tracking_replaced_subtree_forgets_old_leaves() {
    let mut base = yaml("pandaproxy:\n  pandaproxy_api:\n    - {port: 8082}\n");
    let mut sources = FieldSources::new();
    record_all_leaves(&base, "", ConfigLayer::Defaults, &mut sources);
    assert_eq!(
        sources.get("pandaproxy.pandaproxy_api"),
        Some(&ConfigLayer::Defaults)
    );

    deep_merge_tracking(&mut base, &yaml("pandaproxy: off\n"), "", ConfigLayer::File, &mut sources);

    assert_eq!(sources.get("pandaproxy"), Some(&ConfigLayer::File));
    assert!(!sources.contains_key("pandaproxy.pandaproxy_api"));
}

#[test]
fn test_record_all_leaves_treats_empty_mapping_as_leaf() {
    let val = yaml("pandaproxy: {}\nredpanda:\n  seed_servers: []\n");
    let mut sources = FieldSources::new();
    record_all_leaves(&val, "", ConfigLayer::Defaults, &mut sources);

    assert_eq!(sources.get("pandaproxy"), Some(&ConfigLayer::Defaults));
    assert_eq!(sources.get("redpanda.seed_servers"), Some(&ConfigLayer::Defaults));
    assert_eq!(sources.len(), 2);
}

#[test]
fn test_get_nested() {
    let val = yaml(
        r"
redpanda:
  kafka_api:
    - {address: 0.0.0.0, port: 9092}
",
    );
    assert_eq!(
        get_nested(&val, &["redpanda", "kafka_api", "0", "port"]).and_then(Value::as_u64),
        Some(9092)
    );
    assert!(get_nested(&val, &["redpanda", "kafka_api", "1"]).is_none());
    assert!(get_nested(&val, &["rpk", "tls"]).is_none());
}

#[test]
fn test_set_nested_creates_intermediate_mappings() {
    let mut val = Value::Mapping(serde_yaml::Mapping::new());
    set_nested(&mut val, &["rpk", "kafka_api", "tls", "truststore_file"], Value::from("/ca.crt"))
        .unwrap();
    assert_eq!(val["rpk"]["kafka_api"]["tls"]["truststore_file"].as_str(), Some("/ca.crt"));
}

#[test]
fn test_set_nested_into_null_document() {
    let mut val = Value::Null;
    set_nested(&mut val, &["redpanda", "node_id"], Value::from(4)).unwrap();
    assert_eq!(val["redpanda"]["node_id"].as_i64(), Some(4));
}

#[test]
fn test_set_nested_sequence_index() {
    let mut val = yaml("redpanda:\n  kafka_api:\n    - {address: 0.0.0.0, port: 9092}\n");
    set_nested(&mut val, &["redpanda", "kafka_api", "0", "port"], Value::from(19092)).unwrap();
    assert_eq!(val["redpanda"]["kafka_api"][0]["port"].as_u64(), Some(19092));

    // One past the end appends.
    set_nested(&mut val, &["redpanda", "kafka_api", "1", "port"], Value::from(9093)).unwrap();
    assert_eq!(val["redpanda"]["kafka_api"].as_sequence().unwrap().len(), 2);

    let err = set_nested(&mut val, &["redpanda", "kafka_api", "7"], Value::Null).unwrap_err();
    assert!(err.contains("out of range"), "{err}");
}

#[test]
fn test_set_nested_rejects_scalar_parent() {
    let mut val = yaml("redpanda:\n  node_id: 1\n");
    let err = set_nested(&mut val, &["redpanda", "node_id", "x"], Value::Null).unwrap_err();
    assert!(err.contains("scalar"), "{err}");
    assert!(set_nested(&mut val, &[], Value::Null).is_err());
}

#[test]
fn test_key_str() {
    assert_eq!(key_str(&Value::from("a")), "a");
    assert_eq!(key_str(&Value::from(3)), "3");
    assert_eq!(key_str(&Value::Bool(true)), "true");
}

#[test]
fn test_layer_display() {
    assert_eq!(ConfigLayer::Defaults.to_string(), "defaults");
    assert_eq!(ConfigLayer::File.to_string(), "file");
    assert_eq!(ConfigLayer::Override.to_string(), "override");
}
