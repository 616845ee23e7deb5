//! Collection and wishlist state for one user session.
//!
//! A [`Tracker`] always has an on-device store. When the user signs in a
//! remote store is attached; until its first read completes the on-device
//! map stays visible, afterwards the remote map is the source of truth.
//! Writes against the remote map are applied optimistically and queued in an
//! [`Outbox`] that is delivered by [`Tracker::flush`], and once more when the
//! tracker is dropped.

pub mod collection;
pub mod outbox;
pub mod wishlist;

pub use outbox::{Outbox, Pending};

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::store::{KeyValueStore, TrackedValue};

/// Owned-copy counts per card.
pub type CollectionTracker = Tracker<u32>;
/// Wishlist flags per card.
pub type WishlistTracker = Tracker<bool>;

/// Outcome of one [`Tracker::flush`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Keys delivered to the remote store.
    pub sent: usize,
    /// Keys whose delivery failed and were dropped.
    pub dropped: usize,
}

pub struct Tracker<V: TrackedValue> {
    local: Box<dyn KeyValueStore<V>>,
    local_map: HashMap<String, V>,
    remote: Option<Box<dyn KeyValueStore<V>>>,
    remote_map: Option<HashMap<String, V>>,
    outbox: Outbox<V>,
}

impl<V: TrackedValue> Tracker<V> {
    /// Open a tracker over an on-device store, reading its current contents.
    pub fn new(local: Box<dyn KeyValueStore<V>>) -> Result<Self> {
        let local_map = local.load()?;
        Ok(Self {
            local,
            local_map,
            remote: None,
            remote_map: None,
            outbox: Outbox::new(),
        })
    }

    // -- Session -----------------------------------------------------------

    /// Attach the signed-in user's remote store. Call [`load_remote`](Self::load_remote)
    /// afterwards to switch over to it.
    pub fn attach_remote(&mut self, remote: Box<dyn KeyValueStore<V>>) {
        self.remote = Some(remote);
        self.remote_map = None;
        self.outbox.clear();
    }

    /// Sign out: deliver what is pending, then fall back to the on-device map.
    pub fn detach_remote(&mut self) -> FlushReport {
        let report = self.flush();
        self.remote = None;
        self.remote_map = None;
        report
    }

    /// Read the remote map and make it the visible one.
    ///
    /// Writes still pending in the outbox are laid over the fresh read so an
    /// in-flight change is not lost. If the read fails the on-device map is
    /// adopted as the remote view and the error is logged, not returned.
    pub fn load_remote(&mut self) -> Result<()> {
        let Some(remote) = self.remote.as_ref() else {
            return Ok(());
        };
        let mut map = match remote.load() {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "remote read failed, using on-device data");
                self.local_map.clone()
            }
        };
        for (key, pending) in self.outbox.iter() {
            map.insert(key.clone(), pending.value);
        }
        debug!(entries = map.len(), "remote map loaded");
        self.remote_map = Some(map);
        Ok(())
    }

    pub fn is_signed_in(&self) -> bool {
        self.remote.is_some()
    }

    /// Whether the remote map has been read and is the one being shown.
    pub fn is_remote_active(&self) -> bool {
        self.remote.is_some() && self.remote_map.is_some()
    }

    // -- Reads -------------------------------------------------------------

    /// The map currently shown to the user.
    pub fn map(&self) -> &HashMap<String, V> {
        match (&self.remote, &self.remote_map) {
            (Some(_), Some(map)) => map,
            _ => &self.local_map,
        }
    }

    pub fn get(&self, card_id: &str) -> V {
        self.map().get(card_id).copied().unwrap_or_default()
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.get(card_id).is_set()
    }

    /// How many of `card_ids` are set (owned / wishlisted).
    pub fn count_set(&self, card_ids: &[&str]) -> usize {
        card_ids.iter().filter(|id| self.contains(id)).count()
    }

    /// Whether the on-device map holds anything worth importing.
    pub fn has_local_data(&self) -> bool {
        self.local_map.values().any(|v| v.is_set())
    }

    /// Number of remote writes not yet delivered.
    pub fn pending_writes(&self) -> usize {
        self.outbox.len()
    }

    // -- Writes ------------------------------------------------------------

    /// Set one card's value.
    ///
    /// With an active remote the change is visible immediately and queued;
    /// otherwise it is written straight to the on-device store.
    pub fn set(&mut self, card_id: &str, value: V) -> Result<()> {
        if let (Some(_), Some(map)) = (&self.remote, self.remote_map.as_mut()) {
            map.insert(card_id.to_string(), value);
            self.outbox.push(card_id, value);
            return Ok(());
        }
        self.local_map.insert(card_id.to_string(), value);
        self.local.set(card_id, value)
    }

    /// Set many cards to the same value.
    pub fn set_all(&mut self, card_ids: &[&str], value: V) -> Result<()> {
        let values: HashMap<String, V> =
            card_ids.iter().map(|id| (id.to_string(), value)).collect();
        self.set_many(values)
    }

    fn set_many(&mut self, values: HashMap<String, V>) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        if let (Some(_), Some(map)) = (&self.remote, self.remote_map.as_mut()) {
            for (k, v) in &values {
                map.insert(k.clone(), *v);
                self.outbox.push(k, *v);
            }
            return Ok(());
        }
        for (k, v) in &values {
            self.local_map.insert(k.clone(), *v);
        }
        self.local.set_many(&values)
    }

    /// Reset every set card in the visible map to the default value.
    pub fn clear(&mut self) -> Result<()> {
        let values: HashMap<String, V> = self
            .map()
            .iter()
            .filter(|(_, v)| v.is_set())
            .map(|(k, _)| (k.clone(), V::default()))
            .collect();
        self.set_many(values)
    }

    /// Push every set on-device value to the remote store in one call, merge
    /// it into the remote view and empty the on-device store.
    ///
    /// Unlike ordinary writes this call waits for the remote store. Returns
    /// the number of cards imported; `0` when signed out or nothing to import.
    pub fn import_local(&mut self) -> Result<usize> {
        if !self.is_signed_in() || !self.has_local_data() {
            return Ok(0);
        }
        let values: HashMap<String, V> = self
            .local_map
            .iter()
            .filter(|(_, v)| v.is_set())
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        if let Some(remote) = self.remote.as_mut() {
            remote.set_many(&values)?;
        }
        if let Some(map) = self.remote_map.as_mut() {
            for (k, v) in &values {
                map.insert(k.clone(), *v);
            }
        }

        let cleared: HashMap<String, V> =
            values.keys().map(|k| (k.clone(), V::default())).collect();
        self.local.set_many(&cleared)?;
        self.local_map.clear();

        info!(count = values.len(), "imported on-device data into account");
        Ok(values.len())
    }

    /// Deliver queued writes to the remote store.
    ///
    /// Only the newest value per key is sent, in sequence order: a single
    /// key goes out as one `set`, several as one `set_many`. Delivery is
    /// at-most-once; a failed call is logged and its writes are dropped
    /// while the optimistic local view is kept.
    pub fn flush(&mut self) -> FlushReport {
        let Some(remote) = self.remote.as_mut() else {
            return FlushReport::default();
        };
        let batch = self.outbox.drain();
        if batch.is_empty() {
            return FlushReport::default();
        }

        let count = batch.len();
        let result = if let [(key, pending)] = batch.as_slice() {
            remote.set(key, pending.value)
        } else {
            let values: HashMap<String, V> =
                batch.into_iter().map(|(k, p)| (k, p.value)).collect();
            remote.set_many(&values)
        };

        match result {
            Ok(()) => {
                debug!(count, "flushed pending writes");
                FlushReport {
                    sent: count,
                    dropped: 0,
                }
            }
            Err(e) => {
                warn!(count, error = %e, "failed to sync pending writes");
                FlushReport {
                    sent: 0,
                    dropped: count,
                }
            }
        }
    }
}

impl<V: TrackedValue> Drop for Tracker<V> {
    fn drop(&mut self) {
        if self.outbox.is_empty() {
            return;
        }
        let report = self.flush();
        debug!(sent = report.sent, dropped = report.dropped, "flushed on drop");
    }
}
