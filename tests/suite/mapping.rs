//! Static record mapping

use chrono::NaiveDate;
use tagmap_core::{MapError, MapOptions, build_index, map, map_with};
use tagmap_types::record;

use crate::common::{Address, Contact, Order, Person, ada};

#[test]
fn ada_scenario() {
    let mut contact = Contact {
        notes: "met at the exhibition".to_string(),
        ..Contact::default()
    };
    map(&ada(), &mut contact).unwrap();

    assert_eq!(contact.full_name, "Ada");
    assert_eq!(contact.town, "X");
    assert_eq!(contact.notes, "met at the exhibition");
}

#[test]
fn source_is_not_modified() {
    let source = ada();
    let mut contact = Contact::default();
    map(&source, &mut contact).unwrap();
    assert_eq!(source, ada());
}

#[test]
fn index_flattens_nested_tags() {
    let source = ada();
    let index = build_index(&source);

    let mut tags: Vec<_> = index.tags().map(|tag| tag.as_str().to_string()).collect();
    tags.sort_unstable();
    assert_eq!(tags, ["age", "born", "city", "name", "orders", "street"]);
}

#[derive(Debug, Default, PartialEq)]
struct Profile {
    born: Option<NaiveDate>,
    age: i32,
    home: Address,
}

record!(Profile {
    born: scalar = "born",
    age: scalar = "age",
    home: record = "address",
});

#[test]
fn type_mismatch_is_skipped_by_default() {
    let mut profile = Profile {
        age: -1,
        ..Profile::default()
    };
    map(&ada(), &mut profile).unwrap();

    assert_eq!(profile.born, NaiveDate::from_ymd_opt(1815, 12, 10));
    assert_eq!(profile.age, -1, "i64 never widens or narrows into i32");
    assert_eq!(profile.home.city, "X");
}

#[test]
fn type_mismatch_is_an_error_in_strict_mode() {
    let mut profile = Profile::default();
    let err = map_with(&ada(), &mut profile, &MapOptions::strict()).unwrap_err();

    let MapError::TypeMismatch {
        tag,
        expected,
        found,
    } = err
    else {
        panic!("expected a type mismatch");
    };
    assert_eq!(tag.as_str(), "age");
    assert_eq!(expected, "i32");
    assert_eq!(found, "i64");
    assert_eq!(profile, Profile::default());
}

#[derive(Debug, Default, PartialEq)]
struct Receipt {
    sku: String,
}

#[derive(Debug, Default, PartialEq)]
struct Ledger {
    owner: String,
    receipts: Vec<Receipt>,
}

record!(Receipt { sku: scalar = "sku" });
record!(Ledger {
    owner: scalar = "name",
    receipts: collection = "orders",
});

#[test]
fn collections_map_element_by_element() {
    let mut ledger = Ledger::default();
    map(&ada(), &mut ledger).unwrap();

    assert_eq!(ledger.owner, "Ada");
    let skus: Vec<_> = ledger.receipts.iter().map(|r| r.sku.as_str()).collect();
    assert_eq!(skus, ["engine", "cards"]);
}

#[test]
fn repeated_mapping_is_stable() {
    let mut first = Ledger::default();
    let mut second = Ledger::default();
    map(&ada(), &mut first).unwrap();
    map(&ada(), &mut second).unwrap();
    map(&ada(), &mut second).unwrap();
    assert_eq!(first, second);
}

#[derive(Debug, Default)]
struct Shadowed {
    city: String,
    address: Address,
}

#[derive(Debug, Default)]
struct CityOnly {
    city: String,
}

record!(Shadowed {
    city: scalar = "city",
    address: record,
});
record!(CityOnly { city: scalar = "city" });

#[test]
fn collisions_resolve_to_the_last_declared_field() {
    let source = Shadowed {
        city: "outer".to_string(),
        address: Address {
            street: String::new(),
            city: "inner".to_string(),
        },
    };
    let mut destination = CityOnly::default();
    map(&source, &mut destination).unwrap();
    assert_eq!(destination.city, "inner");
}

#[test]
fn collection_elements_of_differing_shapes() {
    let source = Person {
        orders: vec![Order {
            sku: "x".to_string(),
            total: 1.0,
        }],
        ..Person::default()
    };
    let mut ledger = Ledger {
        receipts: vec![
            Receipt {
                sku: "stale".to_string(),
            },
            Receipt {
                sku: "stale".to_string(),
            },
        ],
        ..Ledger::default()
    };
    map(&source, &mut ledger).unwrap();
    assert_eq!(
        ledger.receipts,
        [Receipt {
            sku: "x".to_string()
        }]
    );
}
