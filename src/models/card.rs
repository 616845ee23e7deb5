use serde::{Deserialize, Serialize};

use super::set::{Booster, SetRef};

// ---------------------------------------------------------------------------
// Card — Full card record as served by the catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    // -- Identity --
    pub id: String,
    pub local_id: String,
    pub name: String,
    pub image: Option<String>,

    // -- Classification --
    pub category: Option<String>,
    pub rarity: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub stage: Option<String>,
    pub trainer_type: Option<String>,
    pub evolve_from: Option<String>,
    pub illustrator: Option<String>,
    pub description: Option<String>,

    // -- Gameplay --
    pub hp: Option<u32>,
    #[serde(default)]
    pub attacks: Vec<Attack>,
    #[serde(default)]
    pub weaknesses: Vec<Weakness>,
    pub retreat: Option<u32>,

    // -- Placement --
    pub set: SetRef,
    #[serde(default)]
    pub boosters: Vec<Booster>,
    pub variants: Option<Variants>,
    pub legal: Option<Legal>,
}

impl Card {
    /// Whether the card can be pulled from the given booster according to its
    /// own booster tags.
    pub fn in_booster(&self, booster_id: &str) -> bool {
        self.boosters.iter().any(|b| b.id == booster_id)
    }

    pub fn has_type(&self, energy: &str) -> bool {
        self.types.iter().any(|t| t == energy)
    }
}

// ---------------------------------------------------------------------------
// Sub-records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    #[serde(default)]
    pub cost: Vec<String>,
    pub name: String,
    pub effect: Option<String>,
    /// Either a number (`30`) or a string with a modifier (`"50+"`).
    pub damage: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weakness {
    #[serde(rename = "type")]
    pub type_field: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variants {
    pub normal: Option<bool>,
    pub reverse: Option<bool>,
    pub holo: Option<bool>,
    pub first_edition: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legal {
    pub standard: bool,
    pub expanded: bool,
}
