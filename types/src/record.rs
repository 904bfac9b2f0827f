//! The record abstraction: descriptor plus indexed field access.
//!
//! Field handles borrow the record they come from, so a handle can never
//! outlive its record and a destination can never alias its source.

use std::fmt;
use std::sync::Arc;

use crate::descriptor::{FieldKind, RecordDescriptor};
use crate::scalar::ScalarValue;

/// A composite value with a fixed, declared set of fields.
///
/// Field `i` of [`Record::field`] and [`Record::field_mut`] corresponds to
/// field `i` of the descriptor. Implement it for structs with
/// [`record!`](crate::record).
pub trait Record {
    fn descriptor(&self) -> Arc<RecordDescriptor>;

    fn field(&self, index: usize) -> Option<FieldRef<'_>>;

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

/// Read-only handle to a field slot.
#[derive(Clone, Copy)]
pub enum FieldRef<'a> {
    Scalar(&'a dyn ScalarValue),
    Record(&'a dyn Record),
    Collection(&'a dyn RecordSeq),
}

impl FieldRef<'_> {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldRef::Scalar(_) => FieldKind::Scalar,
            FieldRef::Record(_) => FieldKind::Record,
            FieldRef::Collection(_) => FieldKind::Collection,
        }
    }

    /// Run-time type of the referenced value, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            FieldRef::Scalar(value) => value.type_name().to_string(),
            FieldRef::Record(record) => record.descriptor().name().to_string(),
            FieldRef::Collection(_) => FieldKind::Collection.as_str().to_string(),
        }
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldRef")
            .field(&self.kind())
            .field(&self.type_name())
            .finish()
    }
}

/// Writable handle to a field slot.
pub enum FieldMut<'a> {
    Scalar(&'a mut dyn ScalarValue),
    Record(&'a mut dyn Record),
    Collection(&'a mut dyn RecordSeqMut),
}

impl FieldMut<'_> {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldMut::Scalar(_) => FieldKind::Scalar,
            FieldMut::Record(_) => FieldKind::Record,
            FieldMut::Collection(_) => FieldKind::Collection,
        }
    }
}

/// An ordered sequence of records, read side.
pub trait RecordSeq {
    fn len(&self) -> usize;

    fn element(&self, index: usize) -> Option<&dyn Record>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An ordered sequence of records, write side.
pub trait RecordSeqMut {
    /// Replace the contents with `len` freshly constructed elements.
    ///
    /// `fill` is called for each new element in order. If it returns `false`
    /// the rebuild is abandoned, the sequence keeps its previous contents, and
    /// `rebuild` returns `false`.
    fn rebuild(&mut self, len: usize, fill: &mut dyn FnMut(usize, &mut dyn Record) -> bool)
    -> bool;

    /// Hand `inspect` a freshly constructed element, as `rebuild` would
    /// create it. The sequence itself is not modified.
    fn with_template(&self, inspect: &mut dyn FnMut(&mut dyn Record));
}

impl<T: Record> RecordSeq for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn element(&self, index: usize) -> Option<&dyn Record> {
        self.get(index).map(|element| element as &dyn Record)
    }
}

impl<T: Record + Default> RecordSeqMut for Vec<T> {
    fn rebuild(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, &mut dyn Record) -> bool,
    ) -> bool {
        let mut fresh = Vec::with_capacity(len);
        for index in 0..len {
            let mut element = T::default();
            if !fill(index, &mut element) {
                return false;
            }
            fresh.push(element);
        }
        *self = fresh;
        true
    }

    fn with_template(&self, inspect: &mut dyn FnMut(&mut dyn Record)) {
        inspect(&mut T::default());
    }
}
