//! Owned-copy counts.

use crate::error::Result;

use super::Tracker;

impl Tracker<u32> {
    /// Copies owned of `card_id`; `0` when absent.
    pub fn count(&self, card_id: &str) -> u32 {
        self.get(card_id)
    }

    pub fn is_owned(&self, card_id: &str) -> bool {
        self.contains(card_id)
    }

    /// Set the owned count. Negative counts are clamped to zero.
    pub fn set_count(&mut self, card_id: &str, count: i64) -> Result<()> {
        let clamped = count.clamp(0, u32::MAX as i64) as u32;
        self.set(card_id, clamped)
    }

    pub fn increment(&mut self, card_id: &str) -> Result<()> {
        let next = self.count(card_id).saturating_add(1);
        self.set(card_id, next)
    }

    /// Remove one copy; a card at zero stays at zero.
    pub fn decrement(&mut self, card_id: &str) -> Result<()> {
        let next = self.count(card_id).saturating_sub(1);
        self.set(card_id, next)
    }

    /// Owned cards become unowned, unowned cards get one copy.
    pub fn toggle(&mut self, card_id: &str) -> Result<()> {
        let next = if self.is_owned(card_id) { 0 } else { 1 };
        self.set(card_id, next)
    }

    /// Mark every card as owned, keeping existing counts above one.
    pub fn add_cards(&mut self, card_ids: &[&str]) -> Result<()> {
        let to_add: Vec<&str> = card_ids
            .iter()
            .copied()
            .filter(|id| !self.is_owned(id))
            .collect();
        self.set_all(&to_add, 1)
    }

    /// Set every card's count to zero.
    pub fn remove_cards(&mut self, card_ids: &[&str]) -> Result<()> {
        self.set_all(card_ids, 0)
    }

    /// How many of `card_ids` are owned.
    pub fn owned_count(&self, card_ids: &[&str]) -> usize {
        self.count_set(card_ids)
    }

    /// Whether an anonymous on-device collection exists to import.
    pub fn has_local_collection(&self) -> bool {
        self.has_local_data()
    }
}
