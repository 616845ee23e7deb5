//! Resolve a booster id to the subset of catalog cards it draws from.
//!
//! Multi-booster sets tag every card with the boosters that can contain it.
//! Single-booster mini-sets carry no such tags, so membership there is the
//! whole set. The taxonomy decides which of the two rules applies; the other
//! is never consulted for that booster.

use crate::config::BoosterTaxonomy;
use crate::models::Card;

/// How a booster's card pool is determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoosterMembership {
    /// Every card whose `set.id` matches.
    WholeSet(String),
    /// Every card whose `boosters` list contains the booster id.
    Explicit(String),
}

impl BoosterMembership {
    /// Pick the membership rule for `booster_id`.
    ///
    /// Boosters the taxonomy does not know fall back to explicit tags.
    pub fn resolve(booster_id: &str, taxonomy: &BoosterTaxonomy) -> Self {
        match taxonomy.set_for_booster(booster_id) {
            Some(set_id) if taxonomy.is_single_booster_set(set_id) => {
                BoosterMembership::WholeSet(set_id.to_string())
            }
            _ => BoosterMembership::Explicit(booster_id.to_string()),
        }
    }

    pub fn contains(&self, card: &Card) -> bool {
        match self {
            BoosterMembership::WholeSet(set_id) => card.set.id == *set_id,
            BoosterMembership::Explicit(booster_id) => card.in_booster(booster_id),
        }
    }
}

/// Cards in `cards` that belong to `booster_id`, in catalog order.
pub fn cards_for_booster<'c>(
    cards: &'c [Card],
    booster_id: &str,
    taxonomy: &BoosterTaxonomy,
) -> Vec<&'c Card> {
    let membership = BoosterMembership::resolve(booster_id, taxonomy);
    cards.iter().filter(|c| membership.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mini_set_booster_resolves_to_whole_set() {
        let taxonomy = BoosterTaxonomy::pocket();
        assert_eq!(
            BoosterMembership::resolve("boo_A1a-mew", &taxonomy),
            BoosterMembership::WholeSet("A1a".into())
        );
    }

    #[test]
    fn multi_set_booster_resolves_to_tags() {
        let taxonomy = BoosterTaxonomy::pocket();
        assert_eq!(
            BoosterMembership::resolve("boo_A1-pikachu", &taxonomy),
            BoosterMembership::Explicit("boo_A1-pikachu".into())
        );
    }

    #[test]
    fn unknown_booster_uses_tags() {
        let taxonomy = BoosterTaxonomy::default();
        assert_eq!(
            BoosterMembership::resolve("boo_Z9-new", &taxonomy),
            BoosterMembership::Explicit("boo_Z9-new".into())
        );
    }
}
