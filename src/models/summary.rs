use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Tallies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub owned: u32,
    pub total: u32,
}

impl Tally {
    pub fn record(&mut self, owned: bool) {
        self.total += 1;
        if owned {
            self.owned += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistTally {
    pub owned: u32,
    pub total: u32,
    pub wishlisted: u32,
}

impl WishlistTally {
    pub fn record(&mut self, owned: bool, wishlisted: bool) {
        self.total += 1;
        if owned {
            self.owned += 1;
        }
        if wishlisted {
            self.wishlisted += 1;
        }
    }
}

pub type Breakdown<T> = BTreeMap<String, T>;
pub type CrossBreakdown = BTreeMap<String, BTreeMap<String, Tally>>;

// ---------------------------------------------------------------------------
// CollectionSummary
// ---------------------------------------------------------------------------

/// Multi-dimensional view of a collection. Derived on demand, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub total_cards: u32,
    pub owned_cards: u32,
    pub wishlisted_cards: u32,
    pub completion_percentage: f64,
    pub by_rarity: Breakdown<WishlistTally>,
    pub by_type: Breakdown<WishlistTally>,
    pub by_category: Breakdown<WishlistTally>,
    pub by_stage: Breakdown<Tally>,
    pub by_rarity_and_category: CrossBreakdown,
    pub by_rarity_and_type: CrossBreakdown,
}

// ---------------------------------------------------------------------------
// BoosterSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoosterSummary {
    pub id: String,
    pub name: String,
    pub set_id: String,
    pub set_name: String,
    pub total_cards: u32,
    pub owned_cards: u32,
    pub completion_percentage: f64,
    pub missing_by_rarity: BTreeMap<String, u32>,
}
