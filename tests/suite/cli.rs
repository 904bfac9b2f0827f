//! End-to-end runs of the CLI pipeline

use tagmap::{MapRequest, run};
use tagmap_config::TagmapConfig;

use crate::common::{SCHEMA_CONFIG, write_config};

const INPUT: &str = r#"{
    "name": "Ada",
    "age": 31,
    "address": { "street": "1 Analytical Way", "city": "X" },
    "orders": [{ "sku": "engine", "total": 120.5 }]
}"#;

fn config() -> TagmapConfig {
    let file = write_config(SCHEMA_CONFIG);
    TagmapConfig::load_from(file.path()).unwrap()
}

fn request(strict: bool) -> MapRequest<'static> {
    MapRequest {
        from: "Person",
        to: "Summary",
        strict,
    }
}

#[test]
fn maps_input_into_destination_json() {
    let output = run(&config(), &request(false), INPUT).unwrap();
    insta::assert_snapshot!(output, @r#"
    {
      "age": "",
      "city": "X",
      "name": "Ada",
      "orders": [
        {
          "sku": "engine"
        }
      ]
    }
    "#);
}

#[test]
fn strict_flag_turns_skips_into_errors() {
    let err = run(&config(), &request(true), INPUT).unwrap_err();
    let report = format!("{err:#}");
    assert!(
        report.starts_with("failed to map `Person` into `Summary`"),
        "{report}"
    );
    assert!(
        report.contains("tag `age`: cannot assign i64 to a field of type text"),
        "{report}"
    );
}

#[test]
fn unknown_record_is_reported() {
    let req = MapRequest {
        from: "Person",
        to: "Invoice",
        strict: false,
    };
    let err = run(&config(), &req, INPUT).unwrap_err();
    assert_eq!(err.to_string(), "no record named `Invoice` in config");
}

#[test]
fn input_must_be_a_json_object_of_the_source_shape() {
    let err = run(&config(), &request(false), "[1, 2]").unwrap_err();
    assert_eq!(err.to_string(), "input does not match record `Person`");

    let err = run(&config(), &request(false), "{ not json").unwrap_err();
    assert_eq!(err.to_string(), "input is not valid JSON");
}
