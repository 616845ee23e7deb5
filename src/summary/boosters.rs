use std::collections::BTreeMap;

use crate::booster::BoosterMembership;
use crate::config::BoosterTaxonomy;
use crate::models::{BoosterSummary, Card, Collection, PocketSet};

use super::{completion_percentage, UNKNOWN};

/// Per-booster completion for every non-excluded set.
///
/// Output follows the order of `sets`, then each set's `boosters` as the
/// catalog lists them. Membership is resolved through
/// [`BoosterMembership::resolve`], so a booster is counted either by set or by
/// its own tags, never both.
pub fn summarize_boosters(
    cards: &[Card],
    sets: &[PocketSet],
    collection: Option<&Collection>,
    taxonomy: &BoosterTaxonomy,
) -> Vec<BoosterSummary> {
    let mut summaries = Vec::new();

    for set in sets {
        if taxonomy.is_excluded(&set.id) {
            continue;
        }

        for booster in &set.boosters {
            let membership = BoosterMembership::resolve(&booster.id, taxonomy);

            let mut total = 0u32;
            let mut owned = 0u32;
            let mut missing_by_rarity: BTreeMap<String, u32> = BTreeMap::new();

            for card in cards.iter().filter(|c| membership.contains(c)) {
                total += 1;
                let is_owned = collection
                    .and_then(|c| c.get(&card.id))
                    .copied()
                    .unwrap_or(0)
                    > 0;
                if is_owned {
                    owned += 1;
                } else {
                    let rarity = card.rarity.as_deref().unwrap_or(UNKNOWN);
                    *missing_by_rarity.entry(rarity.to_string()).or_insert(0) += 1;
                }
            }

            summaries.push(BoosterSummary {
                id: booster.id.clone(),
                name: booster.name.clone(),
                set_id: set.id.clone(),
                set_name: set.name.clone(),
                total_cards: total,
                owned_cards: owned,
                completion_percentage: completion_percentage(owned, total),
                missing_by_rarity,
            });
        }
    }

    summaries
}
