// Rust guideline compliant 2026-10-18

//! Integration tests for snapshot capture and restore.

use pearly_core::{
    escape, Error, FieldSpec, Mode, Schema, Snapshot, TypeRegistry, Value, ValueObject,
};
use std::sync::Arc;

fn schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder("Page")
            .defaults(FieldSpec::defaults().maxlength(40))
            .field_with("title", FieldSpec::string().dname("Title"))
            .field_with("hits", FieldSpec::number())
            .field_with("posted", FieldSpec::date())
            .field("body")
            .build()
            .unwrap(),
    )
}

fn registry() -> Arc<TypeRegistry> {
    Arc::new(TypeRegistry::default())
}

fn page() -> ValueObject {
    let mut vo = ValueObject::new(schema(), registry());
    vo.set("title", "Fish & Chips").unwrap();
    vo.set("hits", "17").unwrap();
    vo.set("posted", "2023-12-24").unwrap();
    vo.set_mode(Mode::View);
    vo
}

#[test]
fn test_snapshot_json_round_trip() {
    let snapshot = page().snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);
    assert_eq!(decoded.mode, Mode::View);
    assert_eq!(decoded.fields, vec!["title", "hits", "posted", "body"]);
}

#[test]
fn test_snapshot_json_encodes_non_finite_floats_as_null() {
    let mut vo = page();
    vo.set("body", Value::Float(f64::NAN)).unwrap();
    vo.set("title", Value::Float(f64::INFINITY)).unwrap();
    let snapshot = vo.snapshot();
    assert!(matches!(snapshot.values["body"], Value::Float(f) if f.is_nan()));

    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.values["body"], Value::Null);
    assert_eq!(decoded.values["title"], Value::Null);
    assert_eq!(Value::Float(f64::NAN).to_json(), serde_json::Value::Null);

    vo.set("body", Value::Float(2.5)).unwrap();
    let json = serde_json::to_string(&vo.snapshot()).unwrap();
    let decoded: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.values["body"], Value::Float(2.5));
}

#[test]
fn test_restore_reproduces_values_and_mode() {
    let original = page();
    let restored =
        ValueObject::restore(original.snapshot(), schema(), registry(), None).unwrap();
    assert_eq!(restored.mode(), Mode::View);
    for name in ["title", "hits", "posted", "body"] {
        assert_eq!(restored.get(name).unwrap(), original.get(name).unwrap());
    }
}

#[test]
fn test_restore_starts_with_empty_baseline() {
    let mut original = page();
    original.clean_values();
    let restored =
        ValueObject::restore(original.snapshot(), schema(), registry(), None).unwrap();
    assert_eq!(restored.get_dirty().unwrap().len(), 3);
}

#[test]
fn test_restore_uses_supplied_escape() {
    let snapshot = {
        let mut vo = page();
        vo.set_escape(escape::html());
        vo.set_mode(Mode::ViewEscaped);
        vo.snapshot()
    };

    let plain = ValueObject::restore(snapshot.clone(), schema(), registry(), None).unwrap();
    assert!(!plain.has_escape());
    assert_eq!(plain.get("title").unwrap(), Value::from("Fish & Chips"));

    let escaped =
        ValueObject::restore(snapshot, schema(), registry(), Some(escape::html())).unwrap();
    assert_eq!(escaped.get("title").unwrap(), Value::from("Fish &amp; Chips"));
}

#[test]
fn test_restore_rejects_mismatched_fields() {
    let mut snapshot = page().snapshot();
    snapshot.fields.push("extra".to_string());
    let result = ValueObject::restore(snapshot, schema(), registry(), None);
    assert!(matches!(result, Err(Error::Contract(_))));
}

#[test]
fn test_restore_rejects_unmanaged_values() {
    let mut snapshot = page().snapshot();
    snapshot.values.insert("stray".to_string(), Value::from("x"));
    let result = ValueObject::restore(snapshot, schema(), registry(), None);
    assert!(matches!(result, Err(Error::Contract(_))));
}

#[test]
fn test_restore_rejects_changed_specs() {
    let mut snapshot = page().snapshot();
    snapshot
        .field_specs
        .insert("body".to_string(), FieldSpec::string().maxlength(1));
    let result = ValueObject::restore(snapshot, schema(), registry(), None);
    assert!(matches!(result, Err(Error::Contract(_))));
}

#[test]
fn test_schema_from_snapshot() {
    let snapshot = page().snapshot();
    let rebuilt = Schema::from_snapshot(&snapshot).unwrap();
    assert_eq!(rebuilt.name(), "Page");
    assert_eq!(rebuilt.fields(), schema().fields());
    assert_eq!(rebuilt.type_of("posted"), Some("date"));
    assert_eq!(rebuilt.resolved_spec("body").unwrap().maxlength, Some(40));

    let mut restored =
        ValueObject::restore(snapshot, Arc::new(rebuilt), registry(), None).unwrap();
    restored.validate().unwrap();
}

#[test]
fn test_schema_from_snapshot_rejects_stray_spec() {
    let mut snapshot = page().snapshot();
    snapshot
        .field_specs
        .insert("ghost".to_string(), FieldSpec::string());
    assert!(matches!(
        Schema::from_snapshot(&snapshot),
        Err(Error::Contract(_))
    ));
}
