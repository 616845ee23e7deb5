//! Query modules for the catalog.
//!
//! Each module provides a query struct that borrows the SDK's
//! [`CacheManager`](crate::cache::CacheManager) and exposes typed lookups
//! returning `Result<T>`. Booster queries additionally need the
//! [`BoosterTaxonomy`](crate::config::BoosterTaxonomy).

pub mod boosters;
pub mod cards;
pub mod sets;

pub use boosters::BoosterQuery;
pub use cards::CardQuery;
pub use sets::SetQuery;

use crate::error::{Result, TcgpError};

/// Turn a `NotFound` into `Ok(None)`, passing every other error through.
pub(crate) fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(TcgpError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
