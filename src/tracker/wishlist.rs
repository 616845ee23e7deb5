//! Wishlist flags.

use crate::error::Result;

use super::Tracker;

impl Tracker<bool> {
    pub fn is_wishlisted(&self, card_id: &str) -> bool {
        self.get(card_id)
    }

    pub fn toggle(&mut self, card_id: &str) -> Result<()> {
        let next = !self.is_wishlisted(card_id);
        self.set(card_id, next)
    }

    /// How many of `card_ids` are on the wishlist.
    pub fn count(&self, card_ids: &[&str]) -> usize {
        self.count_set(card_ids)
    }
}
