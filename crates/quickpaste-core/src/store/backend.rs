//! Key-value persistence backends

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::PersistError;

/// Key-value persistence service the settings store writes through.
///
/// `set` stages a value; only `save` makes staged values durable.
#[allow(async_fn_in_trait)]
pub trait SettingsBackend {
    /// Read a staged or previously saved value
    async fn get(&self, key: &str) -> Result<Option<Value>, PersistError>;

    /// Stage a value for the next save
    async fn set(&mut self, key: &str, value: Value) -> Result<(), PersistError>;

    /// Stage removal of a key
    async fn remove(&mut self, key: &str) -> Result<(), PersistError>;

    /// Commit staged values to durable storage
    async fn save(&mut self) -> Result<(), PersistError>;
}

/// In-process backend (tests, scratch sessions)
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    staged: BTreeMap<String, Value>,
    committed: BTreeMap<String, Value>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose durable state already holds `entries`
    pub fn with_entries<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let committed: BTreeMap<String, Value> =
            entries.into_iter().map(|(key, value)| (key.into(), value)).collect();
        Self {
            staged: committed.clone(),
            committed,
        }
    }

    /// What the last successful `save` made durable
    pub const fn committed(&self) -> &BTreeMap<String, Value> {
        &self.committed
    }
}

impl SettingsBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>, PersistError> {
        Ok(self.staged.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: Value) -> Result<(), PersistError> {
        self.staged.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.staged.remove(key);
        Ok(())
    }

    async fn save(&mut self) -> Result<(), PersistError> {
        self.committed.clone_from(&self.staged);
        Ok(())
    }
}

/// A single JSON object file, e.g. `settings.json`
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileBackend {
    /// Open the file at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => Map::new(),
            Ok(raw) => match serde_json::from_str::<Value>(&raw)? {
                Value::Object(entries) => entries,
                other => {
                    return Err(PersistError::Backend(format!(
                        "expected a JSON object in {}, found {}",
                        path.display(),
                        json_kind(&other)
                    )))
                }
            },
            Err(error) if error.kind() == ErrorKind::NotFound => Map::new(),
            Err(error) => return Err(error.into()),
        };

        Ok(Self { path, entries })
    }

    /// An empty store that will write to `path` on save
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Map::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsBackend for JsonFileBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: Value) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn save(&mut self) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let serialized = serde_json::to_string_pretty(&self.entries)?;
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, serialized).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
