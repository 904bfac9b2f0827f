//! Shared test utilities and fixtures
//!
//! Statically typed records used across the suite, plus a config file with
//! matching dynamic schemas.

#![allow(dead_code)]

use std::io::Write;

use chrono::NaiveDate;
use tagmap_types::record;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub born: Option<NaiveDate>,
    pub address: Address,
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub sku: String,
    pub total: f64,
}

/// Destination shape: flat, with one untagged field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    pub full_name: String,
    pub town: String,
    pub notes: String,
}

record!(Address {
    street: scalar = "street",
    city: scalar = "city",
});
record!(Person {
    name: scalar = "name",
    age: scalar = "age",
    born: scalar = "born",
    address: record = "address",
    orders: collection = "orders",
});
record!(Order {
    sku: scalar = "sku",
    total: scalar = "total",
});
record!(Contact {
    full_name: scalar = "name",
    town: scalar = "city",
    notes: scalar,
});

pub fn ada() -> Person {
    Person {
        name: "Ada".to_string(),
        age: 31,
        born: NaiveDate::from_ymd_opt(1815, 12, 10),
        address: Address {
            street: "1 Analytical Way".to_string(),
            city: "X".to_string(),
        },
        orders: vec![
            Order {
                sku: "engine".to_string(),
                total: 120.5,
            },
            Order {
                sku: "cards".to_string(),
                total: 3.0,
            },
        ],
    }
}

/// Schemas mirroring the static fixtures, plus a `Summary` destination.
pub const SCHEMA_CONFIG: &str = r#"
[mapping]
strict = false

[records.Person]
fields = [
  { name = "name", tag = "name", type = "text" },
  { name = "age", tag = "age", type = "int" },
  { name = "address", tag = "address", type = "record", record = "Address" },
  { name = "orders", tag = "orders", type = "list", record = "Order" },
]

[records.Address]
fields = [
  { name = "street", tag = "street", type = "text" },
  { name = "city", tag = "city", type = "text" },
]

[records.Order]
fields = [
  { name = "sku", tag = "sku", type = "text" },
  { name = "total", tag = "total", type = "float" },
]

[records.Summary]
fields = [
  { name = "city", tag = "city", type = "text" },
  { name = "age", tag = "age", type = "text" },
  { name = "name", tag = "name", type = "text" },
  { name = "orders", tag = "orders", type = "list", record = "Line" },
]

[records.Line]
fields = [{ name = "sku", tag = "sku", type = "text" }]
"#;

pub fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    file.write_all(content.as_bytes()).expect("write temp config");
    file
}
