//! Configuration for tagmap.
//!
//! Loads `~/.tagmap/config.toml` (or an explicit path). The file carries the
//! default mapping options and the record schemas used for dynamic mapping:
//!
//! ```toml
//! [mapping]
//! strict = false
//!
//! [records.Person]
//! fields = [
//!   { name = "name", tag = "name", type = "text" },
//!   { name = "address", type = "record", record = "Address" },
//! ]
//! ```

mod schema;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tagmap_core::MapOptions;
use thiserror::Error;

pub use schema::SchemaRegistry;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid schema for record `{record}`: {reason}")]
    Schema { record: String, reason: String },
    #[error("no record named `{0}` in config")]
    UnknownRecord(String),
}

impl ConfigError {
    /// The config file involved, for read and parse failures.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path),
            ConfigError::Schema { .. } | ConfigError::UnknownRecord(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TagmapConfig {
    #[serde(default)]
    pub mapping: MappingConfig,
    #[serde(default)]
    pub records: BTreeMap<String, RecordConfig>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct MappingConfig {
    /// Fail on matched type mismatches instead of skipping them.
    #[serde(default)]
    pub strict: bool,
}

impl MappingConfig {
    #[must_use]
    pub fn options(&self) -> MapOptions {
        MapOptions {
            strict: self.strict,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordConfig {
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    /// Omitted or empty means untagged.
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(rename = "type")]
    pub ty: FieldTypeConfig,
    /// Referenced record name, required for `record` and `list` fields.
    #[serde(default)]
    pub record: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldTypeConfig {
    Bool,
    Int,
    Uint,
    Float,
    Text,
    Record,
    List,
}

impl TagmapConfig {
    /// Load the default config file.
    ///
    /// Returns `Ok(None)` when there is no home directory or the file does
    /// not exist.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Load an explicit config file. A missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read config");
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str::<Self>(&content) {
            Ok(config) => {
                tracing::debug!(
                    path = %path.display(),
                    records = config.records.len(),
                    strict = config.mapping.strict,
                    "loaded config"
                );
                Ok(config)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to parse config");
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolve every `[records.*]` table into a schema.
    pub fn schemas(&self) -> Result<SchemaRegistry, ConfigError> {
        SchemaRegistry::resolve(&self.records)
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tagmap").join("config.toml"))
}
