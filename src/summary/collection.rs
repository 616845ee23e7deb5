use crate::models::{Card, Collection, CollectionSummary, Wishlist};

use super::{completion_percentage, NO_STAGE, UNKNOWN};

/// Fold the catalog against a collection and wishlist.
///
/// A `None` collection or wishlist is treated as empty: every card counts as
/// not owned / not wishlisted. Cards without a rarity or category land in the
/// `"Unknown"` bucket and cards without a stage in `"N/A"`, so the rarity,
/// category and stage totals always add up to `cards.len()`. Type totals do
/// not: a card contributes once per energy type it carries.
pub fn summarize(
    cards: &[Card],
    collection: Option<&Collection>,
    wishlist: Option<&Wishlist>,
) -> CollectionSummary {
    let mut summary = CollectionSummary {
        total_cards: cards.len() as u32,
        ..Default::default()
    };

    for card in cards {
        let owned = collection
            .and_then(|c| c.get(&card.id))
            .copied()
            .unwrap_or(0)
            > 0;
        let wishlisted = wishlist
            .and_then(|w| w.get(&card.id))
            .copied()
            .unwrap_or(false);

        if owned {
            summary.owned_cards += 1;
        }
        if wishlisted {
            summary.wishlisted_cards += 1;
        }

        let rarity = card.rarity.as_deref().unwrap_or(UNKNOWN);
        let category = card.category.as_deref().unwrap_or(UNKNOWN);
        let stage = card.stage.as_deref().unwrap_or(NO_STAGE);

        summary
            .by_rarity
            .entry(rarity.to_string())
            .or_default()
            .record(owned, wishlisted);

        for energy in &card.types {
            summary
                .by_type
                .entry(energy.clone())
                .or_default()
                .record(owned, wishlisted);
            summary
                .by_rarity_and_type
                .entry(rarity.to_string())
                .or_default()
                .entry(energy.clone())
                .or_default()
                .record(owned);
        }

        summary
            .by_category
            .entry(category.to_string())
            .or_default()
            .record(owned, wishlisted);
        summary
            .by_rarity_and_category
            .entry(rarity.to_string())
            .or_default()
            .entry(category.to_string())
            .or_default()
            .record(owned);

        summary
            .by_stage
            .entry(stage.to_string())
            .or_default()
            .record(owned);
    }

    summary.completion_percentage = completion_percentage(summary.owned_cards, summary.total_cards);
    summary
}
