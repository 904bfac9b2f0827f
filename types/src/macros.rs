//! `record!`: derive a [`Record`](crate::Record) impl for a plain struct.

/// Implements [`Record`](crate::Record) for an existing struct.
///
/// List every field in declaration order with its classification (`scalar`,
/// `record` or `collection`) and an optional tag:
///
/// ```
/// use tagmap_types::{Record, record};
///
/// #[derive(Debug, Default)]
/// struct Address {
///     city: String,
/// }
///
/// #[derive(Debug, Default)]
/// struct Person {
///     name: String,
///     age: u32,
///     address: Address,
///     notes: String,
/// }
///
/// record!(Address { city: scalar = "city" });
/// record!(Person {
///     name: scalar = "name",
///     age: scalar = "age",
///     address: record,
///     notes: scalar,
/// });
///
/// let person = Person::default();
/// assert_eq!(person.descriptor().len(), 4);
/// ```
///
/// Scalar fields must implement [`ScalarValue`](crate::ScalarValue), nested
/// records must implement `Record`, and collections must be `Vec<T>` with
/// `T: Record + Default`. The descriptor is built on first use and shared by
/// every value of the type.
#[macro_export]
macro_rules! record {
    ($ty:ident { $( $field:ident : $kind:ident $( = $tag:literal )? ),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn descriptor(&self) -> ::std::sync::Arc<$crate::RecordDescriptor> {
                static DESCRIPTOR: ::std::sync::OnceLock<::std::sync::Arc<$crate::RecordDescriptor>> =
                    ::std::sync::OnceLock::new();
                ::std::sync::Arc::clone(DESCRIPTOR.get_or_init(|| {
                    ::std::sync::Arc::new($crate::RecordDescriptor::from_rust_struct(
                        stringify!($ty),
                        ::std::vec![$(
                            $crate::FieldDescriptor::new(
                                stringify!($field),
                                ::std::any::type_name_of_val(&self.$field),
                                $crate::__record_field_kind!($kind),
                            )
                            $( .with_tag($tag) )?
                        ),*],
                    ))
                }))
            }

            #[allow(unused_mut, unused_assignments)]
            fn field(&self, index: usize) -> ::std::option::Option<$crate::FieldRef<'_>> {
                let mut position = 0usize;
                $(
                    if position == index {
                        return ::std::option::Option::Some(
                            $crate::__record_field_ref!($kind, &self.$field),
                        );
                    }
                    position += 1;
                )*
                ::std::option::Option::None
            }

            #[allow(unused_mut, unused_assignments)]
            fn field_mut(&mut self, index: usize) -> ::std::option::Option<$crate::FieldMut<'_>> {
                let mut position = 0usize;
                $(
                    if position == index {
                        return ::std::option::Option::Some(
                            $crate::__record_field_mut!($kind, &mut self.$field),
                        );
                    }
                    position += 1;
                )*
                ::std::option::Option::None
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field_kind {
    (scalar) => {
        $crate::FieldKind::Scalar
    };
    (record) => {
        $crate::FieldKind::Record
    };
    (collection) => {
        $crate::FieldKind::Collection
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field_ref {
    (scalar, $slot:expr) => {
        $crate::FieldRef::Scalar($slot)
    };
    (record, $slot:expr) => {
        $crate::FieldRef::Record($slot)
    };
    (collection, $slot:expr) => {
        $crate::FieldRef::Collection($slot)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field_mut {
    (scalar, $slot:expr) => {
        $crate::FieldMut::Scalar($slot)
    };
    (record, $slot:expr) => {
        $crate::FieldMut::Record($slot)
    };
    (collection, $slot:expr) => {
        $crate::FieldMut::Collection($slot)
    };
}
