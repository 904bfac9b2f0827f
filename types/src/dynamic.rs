//! Records whose shape is only known at run time.
//!
//! A [`Schema`] pairs a [`RecordDescriptor`] with the concrete type of every
//! field, which is enough to construct a default [`DynamicRecord`] and to
//! convert it to and from JSON.

use std::sync::Arc;

use serde_json::{Map, Number};
use thiserror::Error;

use crate::descriptor::{DescriptorError, FieldDescriptor, FieldKind, RecordDescriptor};
use crate::record::{FieldMut, FieldRef, Record, RecordSeq, RecordSeqMut};
use crate::scalar::{Scalar, ScalarType};

/// Concrete type of a dynamic field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Scalar(ScalarType),
    Record(Arc<Schema>),
    List(Arc<Schema>),
}

impl FieldType {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldType::Scalar(_) => FieldKind::Scalar,
            FieldType::Record(_) => FieldKind::Record,
            FieldType::List(_) => FieldKind::Collection,
        }
    }

    fn type_name(&self) -> String {
        match self {
            FieldType::Scalar(ty) => ty.as_str().to_string(),
            FieldType::Record(schema) => schema.name().to_string(),
            FieldType::List(schema) => format!("[{}]", schema.name()),
        }
    }
}

/// One field of a [`Schema`] under construction.
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub name: String,
    pub tag: Option<String>,
    pub ty: FieldType,
}

impl SchemaField {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            tag: None,
            ty,
        }
    }

    #[must_use]
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    descriptor: Arc<RecordDescriptor>,
    types: Vec<FieldType>,
}

impl Schema {
    pub fn new(name: impl Into<String>, fields: Vec<SchemaField>) -> Result<Self, DescriptorError> {
        let mut descriptors = Vec::with_capacity(fields.len());
        let mut types = Vec::with_capacity(fields.len());
        for field in fields {
            let mut descriptor =
                FieldDescriptor::new(field.name, field.ty.type_name(), field.ty.kind());
            if let Some(tag) = field.tag {
                descriptor = descriptor.with_tag(tag);
            }
            descriptors.push(descriptor);
            types.push(field.ty);
        }

        let descriptor = RecordDescriptor::new(name.into(), descriptors)?;
        Ok(Self {
            descriptor: Arc::new(descriptor),
            types,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    #[must_use]
    pub fn descriptor(&self) -> &Arc<RecordDescriptor> {
        &self.descriptor
    }

    #[must_use]
    pub fn field_type(&self, index: usize) -> Option<&FieldType> {
        self.types.get(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("record `{record}` expects a JSON object, found {found}")]
    NotAnObject { record: String, found: &'static str },
    #[error("field `{record}.{field}` expects {expected}, found {found}")]
    FieldType {
        record: String,
        field: String,
        expected: String,
        found: &'static str,
    },
}

/// A value stored in a dynamic record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Record(DynamicRecord),
    List(DynamicList),
}

impl Value {
    fn zero(ty: &FieldType) -> Self {
        match ty {
            FieldType::Scalar(ty) => Value::Scalar(Scalar::zero(*ty)),
            FieldType::Record(schema) => Value::Record(DynamicRecord::new(Arc::clone(schema))),
            FieldType::List(schema) => Value::List(DynamicList::new(Arc::clone(schema))),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Scalar(_) => FieldKind::Scalar,
            Value::Record(_) => FieldKind::Record,
            Value::List(_) => FieldKind::Collection,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&DynamicRecord> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_record_mut(&mut self) -> Option<&mut DynamicRecord> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Scalar(scalar) => scalar_to_json(scalar),
            Value::Record(record) => record.to_json(),
            Value::List(list) => {
                serde_json::Value::Array(list.items.iter().map(DynamicRecord::to_json).collect())
            }
        }
    }
}

/// A record backed by a run-time [`Schema`].
///
/// Invariant: `values[i]` always has the shape declared by field `i` of the
/// schema. Every constructor goes through the schema, and scalar slots never
/// change their variant.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl DynamicRecord {
    /// A record with every field at its zero value: zero scalars, default
    /// nested records, empty lists.
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = schema.types.iter().map(Value::zero).collect();
        Self { schema, values }
    }

    /// Reads a record from a JSON object keyed by field name.
    ///
    /// Missing members and `null` keep the zero value. Unknown members are
    /// ignored.
    pub fn from_json(schema: Arc<Schema>, json: &serde_json::Value) -> Result<Self, ValueError> {
        let object = json.as_object().ok_or_else(|| ValueError::NotAnObject {
            record: schema.name().to_string(),
            found: json_kind(json),
        })?;

        let mut record = Self::new(schema);
        for (index, field) in record.schema.descriptor.fields().iter().enumerate() {
            let Some(member) = object.get(field.name()).filter(|member| !member.is_null()) else {
                continue;
            };
            let value = json_to_value(&record.schema, index, member)?;
            record.values[index] = value;
        }
        Ok(record)
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = Map::new();
        for (field, value) in self.schema.descriptor.fields().iter().zip(&self.values) {
            object.insert(field.name().to_string(), value.to_json());
        }
        serde_json::Value::Object(object)
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The value of the field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.schema.descriptor.position(name)?;
        self.values.get(index)
    }

    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        match self.get(name)? {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }
}

impl Record for DynamicRecord {
    fn descriptor(&self) -> Arc<RecordDescriptor> {
        Arc::clone(&self.schema.descriptor)
    }

    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        Some(match self.values.get(index)? {
            Value::Scalar(scalar) => FieldRef::Scalar(scalar),
            Value::Record(record) => FieldRef::Record(record),
            Value::List(list) => FieldRef::Collection(list),
        })
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        Some(match self.values.get_mut(index)? {
            Value::Scalar(scalar) => FieldMut::Scalar(scalar),
            Value::Record(record) => FieldMut::Record(record),
            Value::List(list) => FieldMut::Collection(list),
        })
    }
}

/// A list of dynamic records sharing one element schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicList {
    element: Arc<Schema>,
    items: Vec<DynamicRecord>,
}

impl DynamicList {
    #[must_use]
    pub fn new(element: Arc<Schema>) -> Self {
        Self {
            element,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn element_schema(&self) -> &Arc<Schema> {
        &self.element
    }

    #[must_use]
    pub fn items(&self) -> &[DynamicRecord] {
        &self.items
    }

    /// Appends `item` if it was built from this list's element schema.
    ///
    /// Returns the item back when the schema differs.
    pub fn push(&mut self, item: DynamicRecord) -> Result<(), DynamicRecord> {
        if Arc::ptr_eq(&item.schema, &self.element) || item.schema == self.element {
            self.items.push(item);
            Ok(())
        } else {
            Err(item)
        }
    }
}

impl RecordSeq for DynamicList {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn element(&self, index: usize) -> Option<&dyn Record> {
        self.items.get(index).map(|item| item as &dyn Record)
    }
}

impl RecordSeqMut for DynamicList {
    fn rebuild(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, &mut dyn Record) -> bool,
    ) -> bool {
        let mut fresh = Vec::with_capacity(len);
        for index in 0..len {
            let mut item = DynamicRecord::new(Arc::clone(&self.element));
            if !fill(index, &mut item) {
                return false;
            }
            fresh.push(item);
        }
        self.items = fresh;
        true
    }

    fn with_template(&self, inspect: &mut dyn FnMut(&mut dyn Record)) {
        inspect(&mut DynamicRecord::new(Arc::clone(&self.element)));
    }
}

fn json_to_value(
    schema: &Schema,
    index: usize,
    member: &serde_json::Value,
) -> Result<Value, ValueError> {
    let field = &schema.descriptor.fields()[index];
    let mismatch = |expected: String| ValueError::FieldType {
        record: schema.name().to_string(),
        field: field.name().to_string(),
        expected,
        found: json_kind(member),
    };

    match &schema.types[index] {
        FieldType::Scalar(ty) => {
            let scalar = match ty {
                ScalarType::Bool => member.as_bool().map(Scalar::Bool),
                ScalarType::Int => member.as_i64().map(Scalar::Int),
                ScalarType::UInt => member.as_u64().map(Scalar::UInt),
                ScalarType::Float => member.as_f64().map(Scalar::Float),
                ScalarType::Text => member.as_str().map(|text| Scalar::Text(text.to_string())),
            };
            scalar
                .map(Value::Scalar)
                .ok_or_else(|| mismatch(ty.as_str().to_string()))
        }
        FieldType::Record(nested) => {
            DynamicRecord::from_json(Arc::clone(nested), member).map(Value::Record)
        }
        FieldType::List(element) => {
            let items = member
                .as_array()
                .ok_or_else(|| mismatch(format!("[{}]", element.name())))?;
            let mut list = DynamicList::new(Arc::clone(element));
            for item in items {
                list.items
                    .push(DynamicRecord::from_json(Arc::clone(element), item)?);
            }
            Ok(Value::List(list))
        }
    }
}

fn scalar_to_json(scalar: &Scalar) -> serde_json::Value {
    match scalar {
        Scalar::Bool(value) => serde_json::Value::Bool(*value),
        Scalar::Int(value) => serde_json::Value::from(*value),
        Scalar::UInt(value) => serde_json::Value::from(*value),
        Scalar::Float(value) => {
            Number::from_f64(*value).map_or(serde_json::Value::Null, serde_json::Value::Number)
        }
        Scalar::Text(value) => serde_json::Value::String(value.clone()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
