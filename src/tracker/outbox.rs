//! Pending remote writes, coalesced per key.
//!
//! Every queued write gets a sequence number. Queuing a key that is already
//! pending replaces the older value, so a flush can only ever deliver the
//! newest value for a key and a slow early write cannot land after a later
//! one.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending<V> {
    pub seq: u64,
    pub value: V,
}

#[derive(Debug, Clone)]
pub struct Outbox<V> {
    next_seq: u64,
    pending: HashMap<String, Pending<V>>,
}

impl<V> Default for Outbox<V> {
    fn default() -> Self {
        Self {
            next_seq: 1,
            pending: HashMap::new(),
        }
    }
}

impl<V: Copy> Outbox<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `value` for `key`, superseding any pending value. Returns the
    /// sequence number assigned.
    pub fn push(&mut self, key: &str, value: V) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(key.to_string(), Pending { seq, value });
        seq
    }

    /// Pending value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Pending<V>> {
        self.pending.get(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return everything pending, oldest sequence first.
    pub fn drain(&mut self) -> Vec<(String, Pending<V>)> {
        let mut out: Vec<_> = self.pending.drain().collect();
        out.sort_by_key(|(_, p)| p.seq);
        out
    }

    /// Iterate pending writes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Pending<V>)> {
        self.pending.iter()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
