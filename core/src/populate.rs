//! Record populator.
//!
//! Walks the destination's declared fields and pulls values out of a tag
//! index. Matching is by the destination field's own tag. Nested records and
//! collection elements get a fresh index built from the matched source value.

use std::sync::Arc;

use tagmap_types::{FieldMut, FieldRef, Record, RecordDescriptor, RecordSeq, RecordSeqMut};

use crate::error::MapError;
use crate::index::{TagIndex, build_index};
use crate::options::MapOptions;

/// Populate `destination` from `index`.
///
/// The destination is validated first; a malformed destination is rejected
/// with [`MapError::InvalidDestination`] before any field is written.
/// Unmatched tags and incompatible types leave fields unchanged unless
/// `options.strict` is set.
pub fn populate(
    index: &TagIndex<'_>,
    destination: &mut dyn Record,
    options: &MapOptions,
) -> Result<(), MapError> {
    validate_destination(destination, &mut Vec::new())?;
    fill(index, destination, options)
}

/// Checks that every declared field yields a writable slot of the declared
/// classification, recursing into nested records and into one template
/// element per collection. Each element type is checked once, which also
/// stops self-referencing collections.
fn validate_destination(
    record: &mut dyn Record,
    checked: &mut Vec<Arc<RecordDescriptor>>,
) -> Result<(), MapError> {
    let descriptor = record.descriptor();
    for (position, field) in descriptor.fields().iter().enumerate() {
        let Some(slot) = record.field_mut(position) else {
            return Err(MapError::invalid(format!(
                "{}.{} has no writable slot",
                descriptor.name(),
                field.name()
            )));
        };
        if slot.kind() != field.kind() {
            return Err(MapError::invalid(format!(
                "{}.{} is declared as {} but holds a {}",
                descriptor.name(),
                field.name(),
                field.kind().as_str(),
                slot.kind().as_str()
            )));
        }
        match slot {
            FieldMut::Record(nested) => validate_destination(nested, checked)?,
            FieldMut::Collection(seq) => {
                let mut outcome = Ok(());
                seq.with_template(&mut |element: &mut dyn Record| {
                    let element_descriptor = element.descriptor();
                    if checked
                        .iter()
                        .any(|known| Arc::ptr_eq(known, &element_descriptor))
                    {
                        return;
                    }
                    checked.push(element_descriptor);
                    outcome = validate_destination(element, checked);
                });
                outcome?;
            }
            FieldMut::Scalar(_) => {}
        }
    }
    Ok(())
}

fn fill(
    index: &TagIndex<'_>,
    destination: &mut dyn Record,
    options: &MapOptions,
) -> Result<(), MapError> {
    let descriptor = destination.descriptor();
    if options.strict {
        check_types(index, destination, &descriptor)?;
    }

    let mut written = 0usize;
    for (position, field) in descriptor.fields().iter().enumerate() {
        let Some(tag) = field.tag() else {
            continue;
        };
        let Some(slot) = destination.field_mut(position) else {
            return Err(MapError::invalid(format!(
                "{}.{} has no writable slot",
                descriptor.name(),
                field.name()
            )));
        };

        match slot {
            FieldMut::Scalar(slot) => match index.get(tag.as_str()) {
                Some(FieldRef::Scalar(value)) if slot.assign(value) => written += 1,
                Some(other) => tracing::trace!(
                    tag = %tag,
                    expected = field.type_name(),
                    found = %other.type_name(),
                    "skipping incompatible value"
                ),
                None => tracing::trace!(tag = %tag, "no source value for tag"),
            },
            FieldMut::Record(nested) => {
                let Some(source) = index.scope(tag.as_str()) else {
                    tracing::trace!(tag = %tag, "no source record for tag");
                    continue;
                };
                let sub_index = build_index(source);
                fill(&sub_index, nested, options)?;
                written += 1;
            }
            FieldMut::Collection(target) => {
                let Some(FieldRef::Collection(source)) = index.get(tag.as_str()) else {
                    tracing::trace!(tag = %tag, "no source collection for tag");
                    continue;
                };

                if fill_collection(source, target, options)? {
                    written += 1;
                }
            }
        }
    }

    tracing::debug!(record = descriptor.name(), written, "populated record");
    Ok(())
}

/// Rebuilds `target` with one element per source element, in source order.
///
/// Returns whether the rebuilt collection was assigned.
fn fill_collection(
    source: &dyn RecordSeq,
    target: &mut dyn RecordSeqMut,
    options: &MapOptions,
) -> Result<bool, MapError> {
    let mut failure = None;
    let completed = target.rebuild(
        source.len(),
        &mut |position: usize, element: &mut dyn Record| {
            let Some(item) = source.element(position) else {
                return true;
            };
            match populate(&build_index(item), element, options) {
                Ok(()) => true,
                Err(err) => {
                    failure = Some(err);
                    false
                }
            }
        },
    );
    match failure {
        Some(err) => Err(err),
        None => Ok(completed),
    }
}

/// Strict mode: reject a matched scalar field whose source value cannot be
/// assigned, before this record level is written.
fn check_types(
    index: &TagIndex<'_>,
    destination: &dyn Record,
    descriptor: &RecordDescriptor,
) -> Result<(), MapError> {
    for (position, field) in descriptor.fields().iter().enumerate() {
        let Some(tag) = field.tag() else {
            continue;
        };
        let Some(FieldRef::Scalar(slot)) = destination.field(position) else {
            continue;
        };
        let Some(entry) = index.get(tag.as_str()) else {
            continue;
        };
        let compatible = matches!(entry, FieldRef::Scalar(value) if slot.accepts(value));
        if !compatible {
            return Err(MapError::TypeMismatch {
                tag: tag.clone(),
                expected: field.type_name().to_string(),
                found: entry.type_name(),
            });
        }
    }
    Ok(())
}
