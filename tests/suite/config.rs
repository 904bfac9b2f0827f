//! Config loading and schema resolution

use tagmap_config::{ConfigError, TagmapConfig};
use tagmap_core::MapOptions;
use tagmap_types::FieldKind;

use crate::common::{SCHEMA_CONFIG, write_config};

#[test]
fn fixture_config_resolves_every_record() {
    let file = write_config(SCHEMA_CONFIG);
    let config = TagmapConfig::load_from(file.path()).unwrap();
    assert_eq!(config.mapping.options(), MapOptions::default());

    let registry = config.schemas().unwrap();
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        ["Address", "Line", "Order", "Person", "Summary"]
    );

    let summary = registry.require("Summary").unwrap();
    let orders = &summary.descriptor().fields()[3];
    assert_eq!(orders.kind(), FieldKind::Collection);
    assert_eq!(orders.type_name(), "[Line]");
}

#[test]
fn parse_errors_carry_the_path() {
    let file = write_config("[mapping]\nstrict = \"yes\"\n");
    let err = TagmapConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), Some(file.path()));
}
