//! Booster listings for the set/booster selector.

use crate::booster::cards_for_booster;
use crate::config::BoosterTaxonomy;
use crate::models::{BoosterInfo, Card, PocketSet};

// ---------------------------------------------------------------------------
// BoosterQuery
// ---------------------------------------------------------------------------

/// Booster views over already-loaded sets and cards.
pub struct BoosterQuery<'a> {
    taxonomy: &'a BoosterTaxonomy,
}

impl<'a> BoosterQuery<'a> {
    /// Create a new `BoosterQuery` bound to the given taxonomy.
    pub fn new(taxonomy: &'a BoosterTaxonomy) -> Self {
        Self { taxonomy }
    }

    /// Boosters of every non-excluded set, grouped by set in `sets` order and
    /// ordered within a set by the taxonomy's display order.
    pub fn list(&self, sets: &[PocketSet], cards: &[Card]) -> Vec<BoosterInfo> {
        let mut out = Vec::new();
        for set in sets {
            if self.taxonomy.is_excluded(&set.id) {
                continue;
            }
            let mut boosters: Vec<_> = set.boosters.iter().collect();
            boosters.sort_by_key(|b| self.taxonomy.display_rank(&set.id, &b.id));

            for booster in boosters {
                out.push(BoosterInfo {
                    id: booster.id.clone(),
                    name: booster.name.clone(),
                    set_id: set.id.clone(),
                    set_name: set.name.clone(),
                    image: self.taxonomy.image_url(&booster.id),
                    card_count: self.cards(cards, &booster.id).len(),
                });
            }
        }
        out
    }

    /// Cards that can be pulled from `booster_id`, in catalog order.
    pub fn cards<'c>(&self, cards: &'c [Card], booster_id: &str) -> Vec<&'c Card> {
        cards_for_booster(cards, booster_id, self.taxonomy)
    }
}
