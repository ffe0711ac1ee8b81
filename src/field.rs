//! Watched fields: named text sources the synchronizer reads at fire time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Read access to the current value of named fields.
pub trait FieldSource: Send + Sync {
    /// Current text of `name`, or `None` if the field cannot be read.
    fn get_field_value(&self, name: &str) -> Option<String>;
}

/// Field values held in memory and edited in place.
#[derive(Debug, Default)]
pub struct MemoryFields {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }

    /// Overwrite a field's value. Does not notify anyone; callers pair this
    /// with `Synchronizer::on_field_changed` the way an input event would.
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }
}

impl FieldSource for MemoryFields {
    fn get_field_value(&self, name: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

/// Fields backed by files on disk, read fresh on every access.
#[derive(Debug, Default, Clone)]
pub struct FileFields {
    paths: Vec<(String, PathBuf)>,
}

impl FileFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map field `name` to the file at `path`.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.paths.push((name.into(), path.into()));
        self
    }

    /// All files backing a field, in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(|(_, p)| p.as_path())
    }

    fn path_for(&self, name: &str) -> Option<&Path> {
        self.paths
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.as_path())
    }
}

impl FieldSource for FileFields {
    fn get_field_value(&self, name: &str) -> Option<String> {
        let path = self.path_for(name)?;
        match std::fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!(field = name, path = %path.display(), %err, "failed to read field");
                None
            }
        }
    }
}
