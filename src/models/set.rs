use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CardCount / CardBrief / Booster — small records shared by sets and cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CardCount {
    pub total: u32,
    pub official: u32,
}

/// Card reference as listed inside a set payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBrief {
    pub id: String,
    pub local_id: String,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Booster {
    pub id: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// SetRef — Set summary embedded in each card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRef {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub symbol: Option<String>,
    pub card_count: Option<CardCount>,
}

// ---------------------------------------------------------------------------
// PocketSet — Full set data including card references and boosters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PocketSet {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub symbol: Option<String>,
    #[serde(default)]
    pub card_count: CardCount,
    #[serde(default)]
    pub cards: Vec<CardBrief>,
    #[serde(default)]
    pub boosters: Vec<Booster>,
}

// ---------------------------------------------------------------------------
// Series — The series index (lists sets without their cards)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sets: Vec<PocketSet>,
}

// ---------------------------------------------------------------------------
// BoosterInfo — Booster enriched for selector display
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoosterInfo {
    pub id: String,
    pub name: String,
    pub set_id: String,
    pub set_name: String,
    pub image: String,
    pub card_count: usize,
}
