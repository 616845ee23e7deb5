//! Set and series lookups.

use std::cell::RefCell;

use crate::cache::CacheManager;
use crate::config;
use crate::error::Result;
use crate::models::{PocketSet, Series};

use super::optional;

// ---------------------------------------------------------------------------
// SetQuery
// ---------------------------------------------------------------------------

/// Query interface for TCG Pocket sets.
pub struct SetQuery<'a> {
    cache: &'a RefCell<CacheManager>,
}

impl<'a> SetQuery<'a> {
    /// Create a new `SetQuery` bound to the given cache.
    pub fn new(cache: &'a RefCell<CacheManager>) -> Self {
        Self { cache }
    }

    /// The series index. Its `sets` carry names and counts but no cards or boosters.
    pub fn series(&self) -> Result<Series> {
        self.cache
            .borrow_mut()
            .fetch(&format!("series/{}", config::SERIES_ID))
    }

    /// Get a full set (cards and boosters included) by id.
    ///
    /// Returns `None` if the catalog has no such set.
    pub fn get(&self, set_id: &str) -> Result<Option<PocketSet>> {
        optional(self.cache.borrow_mut().fetch(&format!("sets/{}", set_id)))
    }

    /// Every set in the series, fully loaded, in catalog order.
    ///
    /// Sets listed by the series but missing from the catalog are skipped.
    pub fn list(&self) -> Result<Vec<PocketSet>> {
        let series = self.series()?;
        let mut sets = Vec::with_capacity(series.sets.len());
        for brief in &series.sets {
            if let Some(set) = self.get(&brief.id)? {
                sets.push(set);
            }
        }
        Ok(sets)
    }

    /// Number of sets in the series.
    pub fn count(&self) -> Result<usize> {
        Ok(self.series()?.sets.len())
    }
}
