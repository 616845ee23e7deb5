//! Closed vocabularies shared by the filter grammar and the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card rarity tiers from most common to rarest, as spelled by the catalog.
pub const RARITY_ORDER: [&str; 8] = [
    "One Diamond",
    "Two Diamond",
    "Three Diamond",
    "Four Diamond",
    "One Star",
    "Two Star",
    "Three Star",
    "Crown Rare",
];

/// Fold the two spellings of the top tier (`Crown`, `Crown Rare`) together.
pub fn canonical_rarity(rarity: &str) -> &str {
    match rarity {
        "Crown" => "Crown Rare",
        other => other,
    }
}

/// 1-based position of a rarity in [`RARITY_ORDER`], `None` for rarities
/// outside the main ladder (shiny tiers, unknown values).
pub fn rarity_rank(rarity: &str) -> Option<usize> {
    let rarity = canonical_rarity(rarity);
    RARITY_ORDER.iter().position(|r| *r == rarity).map(|i| i + 1)
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $label:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labelled_enum! {
    /// Rarity values accepted in a filter action.
    ///
    /// The top tier is spelled `Crown` in filters; `Crown Rare` is accepted
    /// on input as well.
    pub enum FilterRarity {
        OneDiamond => "One Diamond",
        TwoDiamond => "Two Diamond",
        ThreeDiamond => "Three Diamond",
        FourDiamond => "Four Diamond",
        OneStar => "One Star",
        TwoStar => "Two Star",
        ThreeStar => "Three Star",
        Crown => "Crown" | "Crown Rare",
        OneShiny => "One Shiny",
        TwoShiny => "Two Shiny",
    }
}

labelled_enum! {
    pub enum EnergyType {
        Grass => "Grass",
        Fire => "Fire",
        Water => "Water",
        Lightning => "Lightning",
        Psychic => "Psychic",
        Fighting => "Fighting",
        Darkness => "Darkness",
        Metal => "Metal",
        Dragon => "Dragon",
        Colorless => "Colorless",
    }
}

labelled_enum! {
    pub enum Stage {
        Basic => "Basic",
        Stage1 => "Stage 1",
        Stage2 => "Stage 2",
    }
}

labelled_enum! {
    /// Which cards to show relative to the user's collection and wishlist.
    pub enum CollectionFilter {
        All => "all",
        Owned => "owned",
        Missing => "missing",
        Wishlist => "wishlist",
    }
}

impl Default for CollectionFilter {
    fn default() -> Self {
        CollectionFilter::All
    }
}
