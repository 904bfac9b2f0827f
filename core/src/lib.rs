//! Tag-driven structural mapping.
//!
//! Copies field values from a source record into a destination record of an
//! unrelated type by matching field tags, not names or positions.
//!
//! ```text
//! map(source, destination)
//!   -> build_index(source)            flatten source tags into one namespace
//!   -> populate(index, destination)   walk destination fields by tag
//!        nested record  -> build_index(matched record)  -> populate(...)
//!        collection     -> build_index(source[j])       -> populate(new element j)
//! ```
//!
//! Mapping is best-effort: unmatched tags and incompatible types are skipped.
//! See [`MapOptions::strict`] for the opt-in alternative.
//!
//! A call is synchronous and keeps no state between calls; the only shared
//! data is each record type's immutable descriptor.

mod error;
mod index;
mod options;
mod populate;

pub use error::MapError;
pub use index::{TagIndex, build_index};
pub use options::MapOptions;
pub use populate::populate;

use tagmap_types::{Record, Value};

/// Map `source` into `destination` with the lossy default options.
pub fn map(source: &dyn Record, destination: &mut dyn Record) -> Result<(), MapError> {
    map_with(source, destination, &MapOptions::default())
}

pub fn map_with(
    source: &dyn Record,
    destination: &mut dyn Record,
    options: &MapOptions,
) -> Result<(), MapError> {
    let span = tracing::debug_span!(
        "map",
        source = source.descriptor().name(),
        destination = destination.descriptor().name(),
        strict = options.strict,
    );
    let _guard = span.enter();

    let index = build_index(source);
    populate(&index, destination, options)
}

/// Map between dynamic values.
///
/// The destination must be a [`Value::Record`]. A source that is not a
/// record contributes no tags, so the destination is left as it was.
pub fn map_value(source: &Value, destination: &mut Value) -> Result<(), MapError> {
    map_value_with(source, destination, &MapOptions::default())
}

pub fn map_value_with(
    source: &Value,
    destination: &mut Value,
    options: &MapOptions,
) -> Result<(), MapError> {
    let found = destination.kind();
    let Some(target) = destination.as_record_mut() else {
        return Err(MapError::InvalidDestination {
            reason: format!("expected a record, found a {}", found.as_str()),
        });
    };

    match source.as_record() {
        Some(record) => map_with(record, target, options),
        None => populate(&TagIndex::new(), target, options),
    }
}
