//! On-device store: one JSON object per file, replaced atomically on write.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, TcgpError};

use super::traits::{KeyValueStore, TrackedValue};

/// Store backed by a JSON file such as `collection.json`.
///
/// A missing file reads as an empty map. Unset values (zero counts, `false`
/// flags) are dropped on write to keep the file small.
#[derive(Debug, Clone)]
pub struct FileStore<V> {
    path: PathBuf,
    _value: PhantomData<fn() -> V>,
}

impl<V: TrackedValue> FileStore<V> {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _value: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, map: &HashMap<String, V>) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let kept: HashMap<&String, &V> = map.iter().filter(|(_, v)| v.is_set()).collect();
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(&serde_json::to_vec_pretty(&kept)?)?;
        tmp.persist(&self.path).map_err(|e| TcgpError::Io(e.error))?;
        Ok(())
    }

    fn modify<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut HashMap<String, V>),
    {
        let mut map = self.load()?;
        f(&mut map);
        self.write(&map)
    }
}

impl<V: TrackedValue> KeyValueStore<V> for FileStore<V> {
    fn load(&self) -> Result<HashMap<String, V>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable store file");
                Err(TcgpError::Json(e))
            }
        }
    }

    fn set(&mut self, card_id: &str, value: V) -> Result<()> {
        self.modify(|map| {
            map.insert(card_id.to_string(), value);
        })
    }

    fn set_many(&mut self, values: &HashMap<String, V>) -> Result<()> {
        self.modify(|map| {
            for (k, v) in values {
                map.insert(k.clone(), *v);
            }
        })
    }
}
