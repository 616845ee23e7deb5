//! Competitive tier ladder for Two Star trainer (full-art supporter) cards.
//!
//! Tiers come from a community tier list and are keyed by card name as the
//! catalog spells it. Cards the list does not rank have no tier.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::models::Card;

/// Tier ranking, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrainerTier {
    #[serde(rename = "S")]
    S,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl TrainerTier {
    /// Every tier, best first.
    pub const ALL: [TrainerTier; 7] = [
        TrainerTier::S,
        TrainerTier::APlus,
        TrainerTier::A,
        TrainerTier::B,
        TrainerTier::C,
        TrainerTier::D,
        TrainerTier::F,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrainerTier::S => "S",
            TrainerTier::APlus => "A+",
            TrainerTier::A => "A",
            TrainerTier::B => "B",
            TrainerTier::C => "C",
            TrainerTier::D => "D",
            TrainerTier::F => "F",
        }
    }
}

impl fmt::Display for TrainerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static TIER_LIST: LazyLock<HashMap<&'static str, TrainerTier>> = LazyLock::new(|| {
    use TrainerTier::*;
    let ranked: &[(TrainerTier, &[&str])] = &[
        (S, &["Professor's Research"]),
        (APlus, &["Cyrus"]),
        (A, &["Sabrina", "Mars", "Red", "Lillie", "May", "Lisia", "Giovanni"]),
        (
            B,
            &[
                "Leaf",
                "Pokémon Center Lady",
                "Pokemon Center Lady",
                "Irida",
                "Erika",
                "Lusamine",
                "Roxanne",
            ],
        ),
        (C, &["Blue", "Guzma", "Misty"]),
        (
            D,
            &["Cynthia", "Lyra", "Dawn", "Team Rocket's Greed", "Will", "Gladion"],
        ),
        (
            F,
            &[
                "Adaman",
                "Acerola",
                "Barry",
                "Volkner",
                "Celio",
                "Colress's Tenacity",
                "Colress's Experiment",
                "Team Galactic Grunt",
                "Blaine",
                "Budding Expeditioner",
                "Koga",
                "Brock",
                "Lt. Surge",
                "Jasmine",
                "Hiker",
                "Fisher",
                "Poké Kid",
                "Hau",
                "Looker",
                "Mallow",
                "Sophocles",
                "Elio",
                "Lana",
                "Hala",
                "Marlon",
                "Whitney",
                "Fantina",
                "Traveling Merchant",
                "Morty",
                "Selene",
                "Pokémon Breeder",
                "Pokemon Breeder",
                "Lass",
                "Youngster",
                "Swimmer",
                "Picnicker",
                "Camper",
                "Schoolgirl",
                "Schoolboy",
                "Parasol Lady",
                "Channeler",
                "Old Amber",
                "Dome Fossil",
                "Helix Fossil",
                "Gear",
                "Fossil",
            ],
        ),
    ];
    ranked
        .iter()
        .flat_map(|(tier, names)| names.iter().map(move |n| (*n, *tier)))
        .collect()
});

/// Tier of a trainer by card name.
///
/// Tries the exact name first, then the base name with any ` -...` or
/// ` (...)` suffix removed.
pub fn trainer_tier(name: &str) -> Option<TrainerTier> {
    if let Some(tier) = TIER_LIST.get(name) {
        return Some(*tier);
    }
    let base = name.split(" -").next().unwrap_or(name);
    let base = base.split(" (").next().unwrap_or(base).trim();
    TIER_LIST.get(base).copied()
}

/// Ranked trainers of one tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierGroup<'a> {
    pub tier: TrainerTier,
    pub cards: Vec<&'a Card>,
}

/// Group Two Star trainer cards by tier.
///
/// Every tier is present, best first, even when empty. A trainer printed
/// more than once appears only under its first printing. Cards that are not
/// Two Star trainers, or that the tier list does not rank, are skipped.
pub fn group_trainers_by_tier(cards: &[Card]) -> Vec<TierGroup<'_>> {
    let mut groups: Vec<TierGroup<'_>> = TrainerTier::ALL
        .iter()
        .map(|tier| TierGroup {
            tier: *tier,
            cards: Vec::new(),
        })
        .collect();
    let mut seen = HashSet::new();

    for card in cards {
        if card.category.as_deref() != Some("Trainer") || card.rarity.as_deref() != Some("Two Star") {
            continue;
        }
        let Some(tier) = trainer_tier(&card.name) else {
            continue;
        };
        if !seen.insert(card.name.as_str()) {
            continue;
        }
        // ALL is ordered like the enum, so the discriminant is the index.
        groups[tier as usize].cards.push(card);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_suffixed_names() {
        assert_eq!(trainer_tier("Professor's Research"), Some(TrainerTier::S));
        assert_eq!(trainer_tier("Giovanni (A1 Promo)"), Some(TrainerTier::A));
        assert_eq!(trainer_tier("Misty - Alt Art"), Some(TrainerTier::C));
        assert_eq!(trainer_tier("Poké Ball"), None);
    }

    #[test]
    fn tiers_sort_best_first() {
        let mut tiers = vec![TrainerTier::F, TrainerTier::APlus, TrainerTier::S];
        tiers.sort();
        assert_eq!(tiers, vec![TrainerTier::S, TrainerTier::APlus, TrainerTier::F]);
        assert_eq!(serde_json::to_string(&TrainerTier::APlus).unwrap(), "\"A+\"");
    }
}
