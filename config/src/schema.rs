//! Resolution of `[records.*]` tables into [`Schema`]s.

use std::collections::BTreeMap;
use std::sync::Arc;

use tagmap_types::{FieldType, ScalarType, Schema, SchemaField};

use crate::{ConfigError, FieldConfig, FieldTypeConfig, RecordConfig};

/// Every record schema declared in a config, resolved by name.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Arc<Schema>>,
}

impl SchemaRegistry {
    /// Resolve all records, following `record = "..."` references.
    ///
    /// A record that reaches itself through its own fields, directly or via
    /// lists, is rejected.
    pub fn resolve(records: &BTreeMap<String, RecordConfig>) -> Result<Self, ConfigError> {
        let mut resolver = Resolver {
            records,
            resolved: BTreeMap::new(),
            stack: Vec::new(),
        };
        for name in records.keys() {
            resolver.resolve(name)?;
        }
        tracing::debug!(records = resolver.resolved.len(), "resolved record schemas");
        Ok(Self {
            schemas: resolver.resolved,
        })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(name)
    }

    pub fn require(&self, name: &str) -> Result<Arc<Schema>, ConfigError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownRecord(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

struct Resolver<'a> {
    records: &'a BTreeMap<String, RecordConfig>,
    resolved: BTreeMap<String, Arc<Schema>>,
    /// Records currently being resolved, outermost first.
    stack: Vec<&'a str>,
}

impl<'a> Resolver<'a> {
    fn resolve(&mut self, name: &'a str) -> Result<Arc<Schema>, ConfigError> {
        if let Some(schema) = self.resolved.get(name) {
            return Ok(Arc::clone(schema));
        }
        if self.stack.contains(&name) {
            let mut path = self.stack.join(" -> ");
            path.push_str(" -> ");
            path.push_str(name);
            return Err(ConfigError::Schema {
                record: name.to_string(),
                reason: format!("record contains itself ({path})"),
            });
        }
        let Some((name, record)) = self.records.get_key_value(name) else {
            return Err(ConfigError::UnknownRecord(name.to_string()));
        };

        self.stack.push(name);
        let mut fields = Vec::with_capacity(record.fields.len());
        for field in &record.fields {
            let ty = self.field_type(name, field)?;
            let mut resolved = SchemaField::new(field.name.clone(), ty);
            if let Some(tag) = &field.tag {
                resolved = resolved.tagged(tag.clone());
            }
            fields.push(resolved);
        }
        self.stack.pop();

        let schema = Schema::new(name.clone(), fields).map_err(|err| ConfigError::Schema {
            record: name.clone(),
            reason: err.to_string(),
        })?;
        let schema = Arc::new(schema);
        self.resolved.insert(name.clone(), Arc::clone(&schema));
        Ok(schema)
    }

    fn field_type(&mut self, record: &str, field: &'a FieldConfig) -> Result<FieldType, ConfigError> {
        let scalar = match field.ty {
            FieldTypeConfig::Bool => Some(ScalarType::Bool),
            FieldTypeConfig::Int => Some(ScalarType::Int),
            FieldTypeConfig::Uint => Some(ScalarType::UInt),
            FieldTypeConfig::Float => Some(ScalarType::Float),
            FieldTypeConfig::Text => Some(ScalarType::Text),
            FieldTypeConfig::Record | FieldTypeConfig::List => None,
        };

        match (scalar, field.record.as_deref()) {
            (Some(ty), None) => Ok(FieldType::Scalar(ty)),
            (Some(_), Some(_)) => Err(ConfigError::Schema {
                record: record.to_string(),
                reason: format!("scalar field `{}` cannot reference a record", field.name),
            }),
            (None, None) => Err(ConfigError::Schema {
                record: record.to_string(),
                reason: format!("field `{}` needs a `record` reference", field.name),
            }),
            (None, Some(target)) => {
                if !self.records.contains_key(target) {
                    return Err(ConfigError::Schema {
                        record: record.to_string(),
                        reason: format!(
                            "field `{}` references unknown record `{target}`",
                            field.name
                        ),
                    });
                }
                let nested = self.resolve(target)?;
                Ok(if field.ty == FieldTypeConfig::List {
                    FieldType::List(nested)
                } else {
                    FieldType::Record(nested)
                })
            }
        }
    }
}
