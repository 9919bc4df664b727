//! Snapshot module tests.

use super::*;
use crate::dns::RecordKind;
use serde_json::json;
use tempfile::TempDir;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn apex_snapshot() -> Snapshot {
    let mut records = ResolutionResult::default();
    records
        .records
        .insert(RecordKind::A, strings(&["192.0.2.1", "192.0.2.2"]));
    records
        .records
        .insert(RecordKind::MX, strings(&["10 mx1.example.com.", "20 mx2.example.com."]));
    records.records.insert(
        RecordKind::SOA,
        strings(&["ns1.example.com. hostmaster.example.com. 2024010101 7200 3600 1209600 3600"]),
    );
    records
        .records
        .insert(RecordKind::TXT, strings(&["v=spf1 -all"]));
    records
        .dmarc
        .insert(RecordKind::TXT, strings(&["v=DMARC1; p=reject"]));
    Snapshot {
        prefix: "@".to_string(),
        records,
    }
}

#[test]
fn test_to_value_nests_records_under_prefix() {
    let value = apex_snapshot().to_value().unwrap();
    assert_eq!(value["@"]["A"], json!(["192.0.2.1", "192.0.2.2"]));
    assert_eq!(value["@"]["_dmarc"]["TXT"], json!(["v=DMARC1; p=reject"]));
    assert!(value["@"].get("CNAME").is_none());
}

#[test]
fn test_to_value_omits_empty_dmarc_block() {
    let snapshot = Snapshot {
        prefix: "www".to_string(),
        records: ResolutionResult::default(),
    };
    assert_eq!(snapshot.to_value().unwrap(), json!({ "www": {} }));
}

#[test]
fn test_pretty_json_sorts_keys_and_indents_four_spaces() {
    let rendered = apex_snapshot().to_pretty_json().unwrap();
    assert!(rendered.starts_with("{\n    \"@\": {\n        \"A\": [\n"));

    let a = rendered.find("\"A\"").unwrap();
    let mx = rendered.find("\"MX\"").unwrap();
    let soa = rendered.find("\"SOA\"").unwrap();
    let txt = rendered.find("\"TXT\"").unwrap();
    let dmarc = rendered.find("\"_dmarc\"").unwrap();
    assert!(a < mx && mx < soa && soa < txt && txt < dmarc);
}

#[test]
fn test_first_run_is_changed() {
    assert!(snapshot_changed(None, &apex_snapshot()).unwrap());
}

#[test]
fn test_identical_snapshot_is_unchanged() {
    let snapshot = apex_snapshot();
    let previous = snapshot.to_value().unwrap();
    assert!(!snapshot_changed(Some(&previous), &snapshot).unwrap());
}

#[test]
fn test_shuffled_values_are_unchanged() {
    let snapshot = apex_snapshot();
    let previous = json!({
        "@": {
            "A": ["192.0.2.2", "192.0.2.1"],
            "MX": ["20 mx2.example.com.", "10 mx1.example.com."],
            "SOA": ["ns1.example.com. hostmaster.example.com. 2024010101 7200 3600 1209600 3600"],
            "TXT": ["v=spf1 -all"],
            "_dmarc": { "TXT": ["v=DMARC1; p=reject"] }
        }
    });
    assert!(!snapshot_changed(Some(&previous), &snapshot).unwrap());
}

#[test]
fn test_soa_only_difference_is_unchanged() {
    let snapshot = apex_snapshot();
    let mut previous = snapshot.to_value().unwrap();
    previous["@"]["SOA"] =
        json!(["ns1.example.com. hostmaster.example.com. 2024020202 7200 3600 1209600 3600"]);
    assert!(!snapshot_changed(Some(&previous), &snapshot).unwrap());

    // A vanished SOA does not count either
    previous["@"].as_object_mut().unwrap().remove("SOA");
    assert!(!snapshot_changed(Some(&previous), &snapshot).unwrap());
}

#[test]
fn test_added_value_is_changed() {
    let mut snapshot = apex_snapshot();
    let previous = snapshot.to_value().unwrap();
    snapshot
        .records
        .records
        .get_mut(&RecordKind::A)
        .unwrap()
        .push("192.0.2.3".to_string());
    assert!(snapshot_changed(Some(&previous), &snapshot).unwrap());
}

#[test]
fn test_duplicate_multiplicity_is_changed() {
    let snapshot = apex_snapshot();
    let mut previous = snapshot.to_value().unwrap();
    previous["@"]["A"] = json!(["192.0.2.1", "192.0.2.1", "192.0.2.2"]);
    assert!(snapshot_changed(Some(&previous), &snapshot).unwrap());
}

#[test]
fn test_new_record_type_is_changed() {
    let mut snapshot = apex_snapshot();
    let previous = snapshot.to_value().unwrap();
    snapshot
        .records
        .records
        .insert(RecordKind::CAA, strings(&["0 issue \"letsencrypt.org\""]));
    assert!(snapshot_changed(Some(&previous), &snapshot).unwrap());
}

#[test]
fn test_dmarc_difference_is_changed() {
    let snapshot = apex_snapshot();
    let mut previous = snapshot.to_value().unwrap();
    previous["@"]["_dmarc"]["TXT"] = json!(["v=DMARC1; p=none"]);
    assert!(snapshot_changed(Some(&previous), &snapshot).unwrap());
}

#[test]
fn test_missing_type_equals_empty_list() {
    let snapshot = apex_snapshot();
    let mut previous = snapshot.to_value().unwrap();
    previous["@"]["AAAA"] = json!([]);
    assert!(!snapshot_changed(Some(&previous), &snapshot).unwrap());
}

#[test]
fn test_other_prefix_is_changed() {
    let snapshot = apex_snapshot();
    let previous = json!({ "www": { "A": ["192.0.2.1", "192.0.2.2"] } });
    assert!(snapshot_changed(Some(&previous), &snapshot).unwrap());
}

#[test]
fn test_flatten_records_nested_keys() {
    let flat = flatten_records(&json!({
        "A": ["192.0.2.1"],
        "_dmarc": { "CNAME": ["dmarc.example.net."] }
    }));
    assert_eq!(flat["A"], strings(&["192.0.2.1"]));
    assert_eq!(flat["_dmarc/CNAME"], strings(&["dmarc.example.net."]));
}

#[test]
fn test_multiset_eq() {
    assert!(multiset_eq(&strings(&["a", "b", "a"]), &strings(&["a", "a", "b"])));
    assert!(!multiset_eq(&strings(&["a", "b"]), &strings(&["a", "b", "b"])));
    assert!(!multiset_eq(&strings(&["a", "b"]), &strings(&["a", "c"])));
    assert!(multiset_eq(&[], &[]));
}

#[test]
fn test_store_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    assert!(store.load("example.com").unwrap().is_none());
}

#[test]
fn test_store_write_then_load() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path().join("data"));
    let snapshot = apex_snapshot();
    let json = snapshot.to_pretty_json().unwrap();

    let path = store.write("example.com", &json).unwrap();
    assert_eq!(path, dir.path().join("data").join("example.com.json"));

    let loaded = store.load("example.com").unwrap().unwrap();
    assert_eq!(loaded, snapshot.to_value().unwrap());
    assert!(!snapshot_changed(Some(&loaded), &snapshot).unwrap());
}

#[test]
fn test_store_load_invalid_json() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("example.com.json"), "{ not json").unwrap();
    let store = SnapshotStore::new(dir.path());
    assert!(matches!(
        store.load("example.com"),
        Err(SnapshotError::Json(_))
    ));
}
