//! Booster membership: which cards a booster can produce.

pub mod membership;

pub use membership::{cards_for_booster, BoosterMembership};
