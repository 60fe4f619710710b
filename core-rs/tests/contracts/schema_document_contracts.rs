//! Schema Document Contract Tests
//!
//! The schema document is both the snapshot file format and the shape the
//! dashboard reads. These tests document which properties of it are load-bearing.

use odissei_schema::schema::{assemble, load_snapshot, save_snapshot, SchemaDocument, Term};
use serde_json::{json, Value};
use tempfile::TempDir;

fn terms(uris: &[&str]) -> Vec<Term> {
    uris.iter().map(|u| Term::from_uri(u.to_string())).collect()
}

fn sample_document() -> SchemaDocument {
    assemble(
        "https://example.org/sparql",
        terms(&[
            "https://portal.odissei.nl/schema/geospatial#hasLocation",
            "https://dataverse.org/schema/citation/author",
            "http://purl.org/dc/terms/title",
        ]),
        terms(&[
            "http://xmlns.com/foaf/0.1/Person",
            "https://w3id.org/odissei/ns/kg/Dataset",
            "http://www.w3.org/2002/07/owl#Class",
        ]),
    )
}

/// WHY: Metadata counts always equal the collection lengths
/// REASON: The dashboard shows the counts without re-counting
/// BREAKS: Summary cards disagree with the tables beneath them
/// SACRIFICES: If this fails, users see numbers that do not match the data
#[test]
fn counts_always_match_collections() {
    let doc = sample_document();
    assert!(doc.is_consistent());
    assert_eq!(doc.metadata.total_predicates, 3);
    assert_eq!(doc.metadata.total_classes, 3);
    assert_eq!(doc.metadata.domain_specific_predicates, 2);
    assert_eq!(doc.metadata.domain_specific_classes, 2);

    let empty = SchemaDocument::empty("https://example.org/sparql");
    assert!(empty.is_consistent());
}

/// WHY: domain_specific is always a subset of all
/// REASON: Filtering never invents terms, it only selects
/// BREAKS: Domain tables show terms the endpoint never returned
#[test]
fn domain_specific_is_subset_of_all() {
    let doc = sample_document();
    for term in &doc.classes.domain_specific {
        assert!(doc.classes.all.contains(term), "{} missing from classes.all", term.uri);
    }
    for term in &doc.predicates.domain_specific {
        assert!(doc.predicates.all.contains(term), "{} missing from predicates.all", term.uri);
    }
}

/// WHY: Every namespace of every term appears in all_namespaces
/// REASON: all_namespaces drives the namespace filter; a missing entry hides terms
/// BREAKS: Terms become unreachable through the namespace filter
#[test]
fn all_namespaces_covers_every_term() {
    let doc = sample_document();
    for term in doc.classes.all.iter().chain(doc.predicates.all.iter()) {
        assert!(
            doc.namespaces.all_namespaces.contains(&term.namespace()),
            "namespace of {} missing",
            term.uri
        );
    }
}

/// WHY: Group lists are disjoint, de-duplicated and sourced from predicates only
/// REASON: Group lists describe vocabularies the ODISSEI graph defines properties in
/// BREAKS: Class-only namespaces (FOAF, w3id) would show up as ODISSEI vocabularies
/// SACRIFICES: If this fails, the "ODISSEI Namespaces" count is inflated
#[test]
fn group_lists_are_disjoint_and_predicate_sourced() {
    let doc = sample_document();
    let odissei = &doc.namespaces.odissei_namespaces;
    let dataverse = &doc.namespaces.dataverse_namespaces;

    assert_eq!(odissei, &vec!["https://portal.odissei.nl/schema/geospatial#".to_string()]);
    assert_eq!(dataverse, &vec!["https://dataverse.org/schema/citation/".to_string()]);
    assert!(odissei.iter().all(|ns| !dataverse.contains(ns)));

    // The w3id class namespace mentions odissei but only came from a class
    assert!(!odissei.contains(&"https://w3id.org/odissei/ns/kg/".to_string()));
    assert!(doc.namespaces.all_namespaces.contains("https://w3id.org/odissei/ns/kg/"));
}

/// WHY: The JSON layout uses snake_case keys under four top-level sections
/// REASON: Existing snapshot files and the dashboard read these exact keys
/// BREAKS: Every previously written backup becomes unreadable
/// SACRIFICES: If this fails, a restart during an outage serves an empty schema
#[test]
fn json_layout_is_stable() {
    let doc = sample_document();
    let value = serde_json::to_value(&doc).unwrap();

    for section in ["metadata", "namespaces", "classes", "predicates"] {
        assert!(value.get(section).is_some(), "missing section {}", section);
    }
    for key in [
        "title",
        "description",
        "endpoint",
        "total_classes",
        "total_predicates",
        "domain_specific_classes",
        "domain_specific_predicates",
        "last_updated",
    ] {
        assert!(value["metadata"].get(key).is_some(), "missing metadata.{}", key);
    }
    for key in ["odissei_namespaces", "dataverse_namespaces", "all_namespaces"] {
        assert!(value["namespaces"][key].is_array(), "namespaces.{} is not an array", key);
    }
    assert_eq!(
        value["classes"]["all"][0],
        json!({"uri": "http://xmlns.com/foaf/0.1/Person", "local_name": "Person"})
    );
}

/// WHY: all_namespaces serializes in sorted order
/// REASON: Snapshot diffs between refreshes stay readable
/// BREAKS: Identical schemas produce different files
#[test]
fn all_namespaces_serializes_sorted() {
    let value = serde_json::to_value(sample_document()).unwrap();
    let listed: Vec<String> = value["namespaces"]["all_namespaces"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();

    let mut sorted = listed.clone();
    sorted.sort();
    assert_eq!(listed, sorted);
}

/// WHY: A minimal document (metadata counts only) still loads
/// REASON: Hand-made seed files and old snapshots omit collections
/// BREAKS: Startup fallback rejects a perfectly usable seed
#[test]
fn minimal_snapshot_loads_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("seed.json");
    let minimal: Value = json!({
        "metadata": {"total_classes": 0, "total_predicates": 0}
    });
    std::fs::write(&path, minimal.to_string()).unwrap();

    let doc = load_snapshot(&path).unwrap();
    assert!(doc.is_empty());
    assert!(doc.is_consistent());
    assert_eq!(doc.metadata.title, "ODISSEI Knowledge Graph Schema");
    assert!(doc.metadata.last_updated.is_none());
}

/// WHY: What is saved is exactly what is loaded back
/// REASON: The backup is the only copy of the schema during an outage
/// BREAKS: Restarted processes serve a different document than they saved
#[test]
fn saved_snapshot_loads_identically() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("odissei_schema_live.json");

    let mut doc = sample_document();
    doc.metadata.last_updated = Some("2026-10-19 12:00:00".to_string());
    save_snapshot(&doc, &path).unwrap();

    assert_eq!(load_snapshot(&path).unwrap(), doc);
}
