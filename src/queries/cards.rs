//! Card lookups.

use std::cell::RefCell;

use crate::cache::CacheManager;
use crate::error::Result;
use crate::models::{Card, PocketSet};

use super::{optional, SetQuery};

// ---------------------------------------------------------------------------
// CardQuery
// ---------------------------------------------------------------------------

/// Query interface for full card records.
pub struct CardQuery<'a> {
    cache: &'a RefCell<CacheManager>,
}

impl<'a> CardQuery<'a> {
    /// Create a new `CardQuery` bound to the given cache.
    pub fn new(cache: &'a RefCell<CacheManager>) -> Self {
        Self { cache }
    }

    // -- Single card lookup ------------------------------------------------

    /// Retrieve a single card by its id (e.g. `"A1-001"`).
    pub fn get(&self, card_id: &str) -> Result<Option<Card>> {
        optional(self.cache.borrow_mut().fetch(&format!("cards/{}", card_id)))
    }

    // -- Set-wide lookup ---------------------------------------------------

    /// All cards of one set, in the set's listing order.
    ///
    /// Returns an empty vector for unknown sets or sets without card listings.
    pub fn from_set(&self, set_id: &str) -> Result<Vec<Card>> {
        match SetQuery::new(self.cache).get(set_id)? {
            Some(set) => self.load_set(&set),
            None => Ok(Vec::new()),
        }
    }

    /// All cards of every given set, in set order.
    ///
    /// `progress(loaded_sets, total_sets)` is called after each set finishes,
    /// including sets without cards. A cold load of the whole series is a
    /// few thousand card requests.
    pub fn all<F>(&self, sets: &[PocketSet], mut progress: F) -> Result<Vec<Card>>
    where
        F: FnMut(usize, usize),
    {
        let mut all_cards = Vec::new();
        for (i, set) in sets.iter().enumerate() {
            all_cards.extend(self.load_set(set)?);
            progress(i + 1, sets.len());
        }
        Ok(all_cards)
    }

    /// One request per card; up to [`crate::config::FETCH_WORKERS`] run at once.
    /// Cards listed by the set but missing from the catalog are skipped.
    fn load_set(&self, set: &PocketSet) -> Result<Vec<Card>> {
        let paths: Vec<String> = set
            .cards
            .iter()
            .map(|brief| format!("cards/{}", brief.id))
            .collect();
        let documents = self.cache.borrow_mut().fetch_many_json(&paths);

        let mut cards = Vec::with_capacity(documents.len());
        for document in documents {
            if let Some(value) = optional(document)? {
                cards.push(serde_json::from_value(value)?);
            }
        }
        Ok(cards)
    }
}
