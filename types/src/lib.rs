//! Core record types for tagmap.
//!
//! This crate describes *shapes*: which fields a record declares, how each
//! field is tagged and classified, and how a field slot is read or written.
//! It has no IO and no mapping logic; `tagmap-core` walks these types.
//!
//! Two kinds of records implement [`Record`]:
//!
//! - Plain Rust structs, via the [`record!`] macro, which builds the
//!   descriptor table once per type.
//! - [`DynamicRecord`], whose [`Schema`] is only known at run time.

mod descriptor;
mod dynamic;
mod macros;
mod record;
mod scalar;
mod tag;

pub use descriptor::{DescriptorError, FieldDescriptor, FieldKind, RecordDescriptor};
pub use dynamic::{DynamicList, DynamicRecord, FieldType, Schema, SchemaField, Value, ValueError};
pub use record::{FieldMut, FieldRef, Record, RecordSeq, RecordSeqMut};
pub use scalar::{Scalar, ScalarType, ScalarValue, accepts_exact, assign_exact};
pub use tag::{EmptyTagError, Tag};
