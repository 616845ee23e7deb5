//! Browse-view filtering and sorting over the sample catalog.

mod common;

use serde_json::json;
use tcgp_sdk::filter::{
    apply, available_rarities, available_stages, available_types, CardFilters, SortField,
    SortOptions, SortOrder,
};
use tcgp_sdk::models::{CollectionFilter, FilterAction};

fn ids<'a>(cards: &[&'a tcgp_sdk::models::Card]) -> Vec<&'a str> {
    cards.iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn owned_psychic_cards() {
    let cards = common::sample_cards();
    let collection = common::sample_collection();
    let filters = CardFilters {
        energy_type: Some("Psychic".into()),
        collection: CollectionFilter::Owned,
        ..Default::default()
    };
    let out = apply(&cards, &filters, SortOptions::default(), Some(&collection), None);
    assert_eq!(ids(&out), vec!["A1a-032"]);
}

#[test]
fn missing_cards_without_collection() {
    let cards = common::sample_cards();
    let filters = CardFilters {
        collection: CollectionFilter::Missing,
        ..Default::default()
    };
    let out = apply(&cards, &filters, SortOptions::default(), None, None);
    assert_eq!(out.len(), cards.len());
}

#[test]
fn wishlist_mode_sorted_by_local_id() {
    let cards = common::sample_cards();
    let wishlist = common::sample_wishlist();
    let filters = CardFilters {
        collection: CollectionFilter::Wishlist,
        ..Default::default()
    };
    let out = apply(&cards, &filters, SortOptions::default(), None, Some(&wishlist));
    assert_eq!(ids(&out), vec!["A1-001", "A1-036", "A1-286"]);
}

#[test]
fn search_is_case_insensitive() {
    let cards = common::sample_cards();
    let filters = CardFilters {
        search: Some("EX".into()),
        ..Default::default()
    };
    let sort = SortOptions {
        field: SortField::Name,
        order: SortOrder::Asc,
    };
    let out = apply(&cards, &filters, sort, None, None);
    assert_eq!(
        ids(&out),
        vec!["A1a-005", "A1-036", "A1a-032", "A1-286"]
    );
}

#[test]
fn empty_strings_disable_predicates() {
    let cards = common::sample_cards();
    let filters = CardFilters {
        search: Some(String::new()),
        rarity: Some(String::new()),
        ..Default::default()
    };
    assert!(!filters.is_active());
    assert_eq!(
        apply(&cards, &filters, SortOptions::default(), None, None).len(),
        cards.len()
    );
}

#[test]
fn rarity_sort_descending_puts_crown_first() {
    let cards = common::sample_cards();
    let sort = SortOptions {
        field: SortField::Rarity,
        order: SortOrder::Desc,
    };
    let out = apply(&cards, &CardFilters::default(), sort, None, None);
    assert_eq!(out[0].id, "A1-286");
    assert_eq!(out[1].rarity.as_deref(), Some("One Star"));
}

#[test]
fn crown_action_matches_crown_rare_cards() {
    let action: FilterAction = serde_json::from_value(json!({
        "label": "Crown rares I still need",
        "filters": { "rarity": "Crown", "collectionFilter": "missing" }
    }))
    .unwrap();
    let filters = action.to_card_filters();
    assert!(filters.is_active());
    assert_eq!(filters.collection, CollectionFilter::Missing);

    let cards = common::sample_cards();
    let collection = common::sample_collection();
    let out = apply(&cards, &filters, SortOptions::default(), Some(&collection), None);
    assert_eq!(ids(&out), vec!["A1-286"]);
}

#[test]
fn action_without_filters_resets_to_all() {
    let action: FilterAction =
        serde_json::from_value(json!({ "label": "Everything", "filters": {} })).unwrap();
    assert_eq!(action.to_card_filters(), CardFilters::default());
}

#[test]
fn option_lists() {
    let cards = common::sample_cards();
    assert_eq!(
        available_types(&cards),
        vec!["Fire", "Grass", "Lightning", "Psychic"]
    );
    assert_eq!(
        available_rarities(&cards),
        vec!["One Diamond", "Two Diamond", "Four Diamond", "One Star", "Crown Rare"]
    );
    assert_eq!(available_stages(&cards), vec!["Basic", "Stage 2"]);
}
