//! Scalar slots and the assignability rule.
//!
//! Assignability is exact type equality over a closed set of representational
//! types. There is no numeric widening and no string parsing: an `i32` source
//! never lands in an `i64` field.

use std::any::{Any, type_name};
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A leaf value that can be read from a source record and written into a
/// destination record.
///
/// Implemented for `bool`, `char`, every integer width, `f32`, `f64`,
/// `String`, `chrono::NaiveDate`, `chrono::DateTime<Utc>`, `Option<T>` of
/// each of those, and [`Scalar`]. Other types can opt in with
/// [`accepts_exact`] and [`assign_exact`]:
///
/// ```
/// use std::any::Any;
/// use tagmap_types::{ScalarValue, accepts_exact, assign_exact};
///
/// #[derive(Clone)]
/// struct Email(String);
///
/// impl ScalarValue for Email {
///     fn as_any(&self) -> &dyn Any { self }
///     fn type_name(&self) -> &'static str { "Email" }
///     fn accepts(&self, value: &dyn ScalarValue) -> bool { accepts_exact::<Self>(value) }
///     fn assign(&mut self, value: &dyn ScalarValue) -> bool { assign_exact(self, value) }
/// }
/// ```
pub trait ScalarValue: Any {
    /// The representational value other slots compare against.
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str;

    /// Whether `value` could be assigned into this slot.
    fn accepts(&self, value: &dyn ScalarValue) -> bool;

    /// Overwrite this slot with `value` if its type is assignable.
    ///
    /// Returns `false` and leaves the slot untouched otherwise.
    fn assign(&mut self, value: &dyn ScalarValue) -> bool;
}

#[must_use]
pub fn accepts_exact<T: Any>(value: &dyn ScalarValue) -> bool {
    value.as_any().is::<T>()
}

pub fn assign_exact<T: Any + Clone>(slot: &mut T, value: &dyn ScalarValue) -> bool {
    match value.as_any().downcast_ref::<T>() {
        Some(value) => {
            slot.clone_from(value);
            true
        }
        None => false,
    }
}

macro_rules! exact_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ScalarValue for $ty {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn type_name(&self) -> &'static str {
                    type_name::<$ty>()
                }

                fn accepts(&self, value: &dyn ScalarValue) -> bool {
                    accepts_exact::<$ty>(value)
                }

                fn assign(&mut self, value: &dyn ScalarValue) -> bool {
                    assign_exact(self, value)
                }
            }

            impl ScalarValue for Option<$ty> {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn type_name(&self) -> &'static str {
                    type_name::<Option<$ty>>()
                }

                fn accepts(&self, value: &dyn ScalarValue) -> bool {
                    accepts_exact::<Option<$ty>>(value)
                }

                fn assign(&mut self, value: &dyn ScalarValue) -> bool {
                    assign_exact(self, value)
                }
            }
        )*
    };
}

exact_scalar!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    NaiveDate,
    DateTime<Utc>,
);

/// The declared type of a dynamic scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Bool,
    Int,
    UInt,
    Float,
    Text,
}

impl ScalarType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Int => "int",
            ScalarType::UInt => "uint",
            ScalarType::Float => "float",
            ScalarType::Text => "text",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar held by a dynamic record.
///
/// The variant is the slot's declared type and never changes: assigning a
/// `Text` into an `Int` slot is refused. For assignability a `Scalar`
/// presents its inner primitive, so `Scalar::Int(5)` and a plain `i64`
/// field are interchangeable.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// The zero value for `ty`.
    #[must_use]
    pub fn zero(ty: ScalarType) -> Self {
        match ty {
            ScalarType::Bool => Scalar::Bool(false),
            ScalarType::Int => Scalar::Int(0),
            ScalarType::UInt => Scalar::UInt(0),
            ScalarType::Float => Scalar::Float(0.0),
            ScalarType::Text => Scalar::Text(String::new()),
        }
    }

    #[must_use]
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Scalar::Bool(_) => ScalarType::Bool,
            Scalar::Int(_) => ScalarType::Int,
            Scalar::UInt(_) => ScalarType::UInt,
            Scalar::Float(_) => ScalarType::Float,
            Scalar::Text(_) => ScalarType::Text,
        }
    }
}

impl ScalarValue for Scalar {
    fn as_any(&self) -> &dyn Any {
        match self {
            Scalar::Bool(value) => value,
            Scalar::Int(value) => value,
            Scalar::UInt(value) => value,
            Scalar::Float(value) => value,
            Scalar::Text(value) => value,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(value) => value.type_name(),
            Scalar::Int(value) => value.type_name(),
            Scalar::UInt(value) => value.type_name(),
            Scalar::Float(value) => value.type_name(),
            Scalar::Text(value) => value.type_name(),
        }
    }

    fn accepts(&self, value: &dyn ScalarValue) -> bool {
        match self {
            Scalar::Bool(slot) => slot.accepts(value),
            Scalar::Int(slot) => slot.accepts(value),
            Scalar::UInt(slot) => slot.accepts(value),
            Scalar::Float(slot) => slot.accepts(value),
            Scalar::Text(slot) => slot.accepts(value),
        }
    }

    fn assign(&mut self, value: &dyn ScalarValue) -> bool {
        match self {
            Scalar::Bool(slot) => slot.assign(value),
            Scalar::Int(slot) => slot.assign(value),
            Scalar::UInt(slot) => slot.assign(value),
            Scalar::Float(slot) => slot.assign(value),
            Scalar::Text(slot) => slot.assign(value),
        }
    }
}
