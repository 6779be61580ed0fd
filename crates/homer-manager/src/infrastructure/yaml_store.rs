//! `config.yml` on disk, as a [`DocumentStore`].
//!
//! Reads distinguish every way the file can be broken so the operator gets a
//! message that points at the actual problem:
//!
//! | Condition                          | Error                        |
//! |------------------------------------|------------------------------|
//! | file absent                        | [`StoreError::NotFound`]     |
//! | unreadable (permissions, EISDIR)   | [`StoreError::Read`]         |
//! | only whitespace                    | [`StoreError::Empty`]        |
//! | not YAML                           | [`StoreError::Parse`]        |
//! | YAML, but not a config mapping     | [`StoreError::InvalidShape`] |
//!
//! Writes overwrite the file in place rather than renaming a temporary over
//! it; the config is commonly a single-file bind mount, where a rename
//! would fail or replace the mount point.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use homer_core::ConfigDocument;
use serde_yaml::Value;
use tracing::debug;

use super::yaml_emit::to_yaml_string;
use crate::application::{DocumentStore, StoreError};

/// Document store backed by a single YAML file.
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    path: PathBuf,
}

impl YamlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for YamlFileStore {
    fn read(&self) -> Result<ConfigDocument, StoreError> {
        let path = &self.path;
        let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StoreError::NotFound {
                path: path.clone(),
                source,
            },
            _ => StoreError::Read {
                path: path.clone(),
                source,
            },
        })?;

        if text.trim().is_empty() {
            return Err(StoreError::Empty { path: path.clone() });
        }

        let mut value: Value = serde_yaml::from_str(&text).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;
        value.apply_merge().map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;

        if !value.is_mapping() {
            return Err(StoreError::InvalidShape {
                path: path.clone(),
                reason: format!("expected a mapping at the top level, found {}", kind_of(&value)),
            });
        }

        let doc: ConfigDocument =
            serde_yaml::from_value(value).map_err(|e| StoreError::InvalidShape {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        debug!(path = %path.display(), categories = doc.services.len(), "config read");
        Ok(doc)
    }

    fn write(&self, doc: &ConfigDocument) -> Result<(), StoreError> {
        let yaml = to_yaml_string(doc).map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, yaml).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "config written");
        Ok(())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
