use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, TcgpError};

use super::traits::{KeyValueStore, TrackedValue};

/// In-memory store. Clones share the same map, so a caller can keep a handle
/// after handing a clone to a tracker.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore<V> {
    inner: Arc<Mutex<HashMap<String, V>>>,
}

impl<V: TrackedValue> MemoryStore<V> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store pre-filled with `values`.
    pub fn with_values(values: HashMap<String, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(values)),
        }
    }

    /// Snapshot of the current contents.
    pub fn snapshot(&self) -> Result<HashMap<String, V>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, V>>> {
        self.inner
            .lock()
            .map_err(|_| TcgpError::InvalidArgument("store lock poisoned".into()))
    }
}

impl<V: TrackedValue> KeyValueStore<V> for MemoryStore<V> {
    fn load(&self) -> Result<HashMap<String, V>> {
        self.snapshot()
    }

    fn set(&mut self, card_id: &str, value: V) -> Result<()> {
        self.lock()?.insert(card_id.to_string(), value);
        Ok(())
    }

    fn set_many(&mut self, values: &HashMap<String, V>) -> Result<()> {
        let mut map = self.lock()?;
        for (k, v) in values {
            map.insert(k.clone(), *v);
        }
        Ok(())
    }
}
