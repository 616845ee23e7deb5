//! Aggregation of the catalog against a user's collection and wishlist.
//!
//! Everything here is a pure function over borrowed input: no caching, no
//! interior state. Calling twice with the same input yields equal output.

pub mod boosters;
pub mod collection;

pub use boosters::summarize_boosters;
pub use collection::summarize;

/// Label used when a card has no rarity or category.
pub const UNKNOWN: &str = "Unknown";
/// Label used when a card has no evolution stage (trainers, mostly).
pub const NO_STAGE: &str = "N/A";

/// Share of owned cards with one decimal place: `round(owned / total * 1000) / 10`.
///
/// Returns `0.0` when `total` is zero.
pub fn completion_percentage(owned: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((owned as f64 / total as f64) * 1000.0).round() / 10.0
}
