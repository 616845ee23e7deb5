//! Card list filtering and sorting, as driven by the browse view and by
//! assistant filter actions.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::models::{
    canonical_rarity, rarity_rank, Card, Collection, CollectionFilter, FilterAction, Wishlist,
};

// ---------------------------------------------------------------------------
// CardFilters / SortOptions
// ---------------------------------------------------------------------------

/// Display filters. `None` (or an empty string) disables a predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilters {
    pub search: Option<String>,
    pub rarity: Option<String>,
    pub energy_type: Option<String>,
    pub stage: Option<String>,
    pub collection: CollectionFilter,
}

impl CardFilters {
    pub fn is_active(&self) -> bool {
        [&self.search, &self.rarity, &self.energy_type, &self.stage]
            .iter()
            .any(|f| active(f).is_some())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Name,
    Hp,
    Rarity,
    #[default]
    LocalId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOptions {
    pub field: SortField,
    pub order: SortOrder,
}

impl FilterAction {
    /// Display filters this action asks for. Predicates the action leaves out
    /// are cleared, and a missing collection mode means "all".
    pub fn to_card_filters(&self) -> CardFilters {
        let f = &self.filters;
        CardFilters {
            search: f.search.clone(),
            rarity: f.rarity.map(|r| r.as_str().to_string()),
            energy_type: f.energy_type.map(|t| t.as_str().to_string()),
            stage: f.stage.map(|s| s.as_str().to_string()),
            collection: f.collection_filter.unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

/// Filter then sort `cards`, returning borrowed references in display order.
pub fn apply<'c>(
    cards: &'c [Card],
    filters: &CardFilters,
    sort: SortOptions,
    collection: Option<&Collection>,
    wishlist: Option<&Wishlist>,
) -> Vec<&'c Card> {
    let search = active(&filters.search).map(str::to_lowercase);
    let rarity = active(&filters.rarity).map(canonical_rarity);
    let energy = active(&filters.energy_type);
    let stage = active(&filters.stage);

    let mut result: Vec<&Card> = cards
        .iter()
        .filter(|card| {
            let owned = collection
                .and_then(|c| c.get(&card.id))
                .copied()
                .unwrap_or(0)
                > 0;
            let wishlisted = wishlist
                .and_then(|w| w.get(&card.id))
                .copied()
                .unwrap_or(false);
            match filters.collection {
                CollectionFilter::All => true,
                CollectionFilter::Owned => owned,
                CollectionFilter::Missing => !owned,
                CollectionFilter::Wishlist => wishlisted,
            }
        })
        .filter(|card| match &search {
            Some(s) => card.name.to_lowercase().contains(s.as_str()),
            None => true,
        })
        .filter(|card| energy.map_or(true, |t| card.has_type(t)))
        .filter(|card| {
            rarity.map_or(true, |r| {
                card.rarity.as_deref().map(canonical_rarity) == Some(r)
            })
        })
        .filter(|card| stage.map_or(true, |s| card.stage.as_deref() == Some(s)))
        .collect();

    result.sort_by(|a, b| {
        let ord = compare(a, b, sort.field);
        match sort.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    result
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn compare(a: &Card, b: &Card, field: SortField) -> Ordering {
    match field {
        SortField::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortField::Hp => a.hp.unwrap_or(0).cmp(&b.hp.unwrap_or(0)),
        SortField::Rarity => rarity_sort_key(a).cmp(&rarity_sort_key(b)),
        SortField::LocalId => natural_cmp(&a.local_id, &b.local_id),
    }
}

/// Unknown and off-ladder rarities sort after Crown Rare.
fn rarity_sort_key(card: &Card) -> usize {
    card.rarity.as_deref().and_then(rarity_rank).unwrap_or(99)
}

/// Compare strings treating embedded digit runs as numbers (`"9" < "10"`).
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let xs = take_digits(&mut ai);
                let ys = take_digits(&mut bi);
                let xt = xs.trim_start_matches('0');
                let yt = ys.trim_start_matches('0');
                let ord = xt.len().cmp(&yt.len()).then_with(|| xt.cmp(yt));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x
                    .to_lowercase()
                    .cmp(y.to_lowercase())
                    .then_with(|| x.cmp(&y));
                if ord != Ordering::Equal {
                    return ord;
                }
                ai.next();
                bi.next();
            }
        }
    }
}

fn take_digits(it: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(c) = it.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        out.push(c);
        it.next();
    }
    out
}

// ---------------------------------------------------------------------------
// Filter option lists
// ---------------------------------------------------------------------------

/// Distinct energy types present in `cards`, alphabetically.
pub fn available_types(cards: &[Card]) -> Vec<String> {
    let set: BTreeSet<&str> = cards
        .iter()
        .flat_map(|c| c.types.iter().map(String::as_str))
        .collect();
    set.into_iter().map(String::from).collect()
}

/// Distinct rarities present in `cards`, ordered common to rare.
pub fn available_rarities(cards: &[Card]) -> Vec<String> {
    let set: BTreeSet<&str> = cards.iter().filter_map(|c| c.rarity.as_deref()).collect();
    let mut out: Vec<String> = set.into_iter().map(String::from).collect();
    out.sort_by_key(|r| rarity_rank(r).unwrap_or(99));
    out
}

/// Distinct evolution stages present in `cards`, alphabetically.
pub fn available_stages(cards: &[Card]) -> Vec<String> {
    let set: BTreeSet<&str> = cards.iter().filter_map(|c| c.stage.as_deref()).collect();
    set.into_iter().map(String::from).collect()
}
