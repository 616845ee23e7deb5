//! Store trait definitions.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// A value a store can hold per card.
pub trait TrackedValue:
    Copy + Default + PartialEq + Send + std::fmt::Debug + Serialize + DeserializeOwned + 'static
{
    /// Whether this value marks the card as present (owned / wishlisted).
    /// The default value is never "set" and stores may drop it.
    fn is_set(&self) -> bool;
}

impl TrackedValue for u32 {
    fn is_set(&self) -> bool {
        *self > 0
    }
}

impl TrackedValue for bool {
    fn is_set(&self) -> bool {
        *self
    }
}

/// Per-user map from card id to a tracked value.
///
/// Implementations report success or failure per call only; a failed
/// `set_many` says nothing about which keys were written.
pub trait KeyValueStore<V: TrackedValue>: Send {
    /// Read the full map for the current user.
    fn load(&self) -> Result<HashMap<String, V>>;

    /// Write one key.
    fn set(&mut self, card_id: &str, value: V) -> Result<()>;

    /// Write several keys in one call.
    fn set_many(&mut self, values: &HashMap<String, V>) -> Result<()>;
}
