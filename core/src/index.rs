//! Tag-index builder.
//!
//! Flattens a source record into a single tag namespace. Nested records
//! contribute their children's tags; collections are indexed whole under
//! their own tag. Fields are visited depth-first in declaration order, so the
//! last field declaring a tag wins.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use tagmap_types::{FieldRef, Record, Tag};

/// Flattened map from tag to a handle into the source record.
///
/// Borrows the source: an index cannot outlive the record it was built from.
#[derive(Default)]
pub struct TagIndex<'a> {
    entries: HashMap<Tag, FieldRef<'a>>,
    scopes: HashMap<Tag, &'a dyn Record>,
}

impl fmt::Debug for TagIndex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagIndex")
            .field("entries", &self.entries)
            .field("scopes", &self.scopes.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> TagIndex<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The scalar or collection handle registered under `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<FieldRef<'a>> {
        self.entries.get(tag).copied()
    }

    /// The tagged nested record registered under `tag`.
    ///
    /// Nested records never appear in [`TagIndex::get`]: their children are
    /// flattened into the index. A nested record that also carries a tag is
    /// remembered here so a tagged destination record can descend into it.
    #[must_use]
    pub fn scope(&self, tag: &str) -> Option<&'a dyn Record> {
        self.scopes.get(tag).copied()
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.entries.keys()
    }

    /// Insert or overwrite. Returns the handle that was replaced.
    pub fn insert(&mut self, tag: Tag, handle: FieldRef<'a>) -> Option<FieldRef<'a>> {
        self.entries.insert(tag, handle)
    }

    fn insert_scope(&mut self, tag: Tag, record: &'a dyn Record) {
        match self.scopes.entry(tag) {
            Entry::Occupied(mut slot) => {
                tracing::trace!(tag = %slot.key(), "record scope overwritten by later field");
                slot.insert(record);
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }
}

/// Build a fresh tag index over `source`.
///
/// Never fails: a record with no tagged fields yields an empty index.
#[must_use]
pub fn build_index(source: &dyn Record) -> TagIndex<'_> {
    let mut index = TagIndex::new();
    collect(source, &mut index);
    index
}

fn collect<'a>(record: &'a dyn Record, index: &mut TagIndex<'a>) {
    let descriptor = record.descriptor();
    for (position, field) in descriptor.fields().iter().enumerate() {
        let Some(handle) = record.field(position) else {
            tracing::trace!(
                record = descriptor.name(),
                field = field.name(),
                "source field has no readable slot"
            );
            continue;
        };

        match handle {
            FieldRef::Record(nested) => {
                if let Some(tag) = field.tag() {
                    index.insert_scope(tag.clone(), nested);
                }
                collect(nested, index);
            }
            FieldRef::Scalar(_) | FieldRef::Collection(_) => {
                let Some(tag) = field.tag() else {
                    continue;
                };
                if index.insert(tag.clone(), handle).is_some() {
                    tracing::trace!(
                        tag = %tag,
                        record = descriptor.name(),
                        field = field.name(),
                        "tag overwritten by later field"
                    );
                }
            }
        }
    }
}
