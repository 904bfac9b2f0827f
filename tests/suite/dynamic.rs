//! Dynamic records and interop with static records

use std::sync::Arc;

use serde_json::json;
use tagmap_config::TagmapConfig;
use tagmap_core::{MapError, map, map_value};
use tagmap_types::{DynamicRecord, Scalar, Schema, Value};

use crate::common::{Contact, SCHEMA_CONFIG, ada, write_config};

fn schema(name: &str) -> Arc<Schema> {
    let file = write_config(SCHEMA_CONFIG);
    let config = TagmapConfig::load_from(file.path()).unwrap();
    config.schemas().unwrap().require(name).unwrap()
}

#[test]
fn static_source_fills_dynamic_destination() {
    let mut person = DynamicRecord::new(schema("Person"));
    map(&ada(), &mut person).unwrap();

    assert_eq!(
        person.to_json(),
        json!({
            "address": { "city": "X", "street": "1 Analytical Way" },
            "age": 31,
            "name": "Ada",
            "orders": [
                { "sku": "engine", "total": 120.5 },
                { "sku": "cards", "total": 3.0 },
            ],
        })
    );
}

#[test]
fn dynamic_source_fills_static_destination() {
    let person = DynamicRecord::from_json(
        schema("Person"),
        &json!({ "name": "Grace", "address": { "city": "Arlington" } }),
    )
    .unwrap();

    let mut contact = Contact::default();
    map(&person, &mut contact).unwrap();
    assert_eq!(contact.full_name, "Grace");
    assert_eq!(contact.town, "Arlington");
}

#[test]
fn dynamic_slots_keep_their_declared_type() {
    let person = DynamicRecord::from_json(schema("Person"), &json!({ "age": 31 })).unwrap();

    // Summary declares `age` as text: the int is skipped, not converted.
    let mut summary = DynamicRecord::new(schema("Summary"));
    map(&person, &mut summary).unwrap();
    assert_eq!(summary.scalar("age"), Some(&Scalar::Text(String::new())));
}

#[test]
fn map_value_between_records() {
    let source = Value::Record(
        DynamicRecord::from_json(schema("Person"), &json!({ "name": "Ada" })).unwrap(),
    );
    let mut destination = Value::Record(DynamicRecord::new(schema("Summary")));
    map_value(&source, &mut destination).unwrap();

    let summary = destination.as_record().unwrap();
    assert_eq!(summary.scalar("name"), Some(&Scalar::Text("Ada".to_string())));
}

#[test]
fn map_value_rejects_list_destination() {
    let source = Value::Record(DynamicRecord::new(schema("Person")));
    let mut destination = DynamicRecord::new(schema("Person"))
        .get("orders")
        .cloned()
        .unwrap();

    let err = map_value(&source, &mut destination).unwrap_err();
    assert!(matches!(err, MapError::InvalidDestination { .. }));
    assert!(err.to_string().contains("found a collection"), "{err}");
}
