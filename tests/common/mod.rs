//! Shared test fixtures for the TCG Pocket SDK integration tests.
//!
//! Provides a small two-set catalog (one multi-booster set, one mini-set),
//! matching collection/wishlist maps, and `spawn_server()` which serves an
//! axum router on a random local port from a background Tokio runtime so the
//! blocking clients under test can call it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::{Ipv4Addr, TcpListener};

use axum::Router;
use serde_json::json;
use tcgp_sdk::models::{Card, Collection, PocketSet, Wishlist};

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

pub fn card(
    id: &str,
    name: &str,
    set: (&str, &str),
    category: &str,
    rarity: &str,
    types: &[&str],
    stage: Option<&str>,
    boosters: &[&str],
) -> Card {
    let local_id = id.rsplit('-').next().unwrap_or(id);
    let hp = if category == "Pokemon" { Some(70) } else { None };
    serde_json::from_value(json!({
        "id": id,
        "localId": local_id,
        "name": name,
        "category": category,
        "rarity": rarity,
        "types": types,
        "stage": stage,
        "hp": hp,
        "set": { "id": set.0, "name": set.1 },
        "boosters": boosters
            .iter()
            .map(|b| json!({ "id": b, "name": b }))
            .collect::<Vec<_>>(),
    }))
    .unwrap()
}

/// Seven cards: five in Genetic Apex (A1) tagged per booster, two in the
/// Mythical Island mini-set (A1a) without booster tags.
pub fn sample_cards() -> Vec<Card> {
    let a1 = ("A1", "Genetic Apex");
    let a1a = ("A1a", "Mythical Island");
    vec![
        card(
            "A1-001",
            "Bulbasaur",
            a1,
            "Pokemon",
            "One Diamond",
            &["Grass"],
            Some("Basic"),
            &["boo_A1-mewtwo"],
        ),
        card(
            "A1-036",
            "Charizard ex",
            a1,
            "Pokemon",
            "Four Diamond",
            &["Fire"],
            Some("Stage 2"),
            &["boo_A1-charizard"],
        ),
        card(
            "A1-094",
            "Pikachu",
            a1,
            "Pokemon",
            "One Diamond",
            &["Lightning"],
            Some("Basic"),
            &["boo_A1-pikachu", "boo_A1-charizard"],
        ),
        card(
            "A1-225",
            "Professor's Research",
            a1,
            "Trainer",
            "Two Diamond",
            &[],
            None,
            &["boo_A1-charizard", "boo_A1-mewtwo", "boo_A1-pikachu"],
        ),
        card(
            "A1-286",
            "Mewtwo ex",
            a1,
            "Pokemon",
            "Crown Rare",
            &["Psychic"],
            Some("Basic"),
            &["boo_A1-mewtwo"],
        ),
        card(
            "A1a-032",
            "Mew ex",
            a1a,
            "Pokemon",
            "Four Diamond",
            &["Psychic"],
            Some("Basic"),
            &[],
        ),
        card(
            "A1a-005",
            "Celebi ex",
            a1a,
            "Pokemon",
            "One Star",
            &["Grass"],
            Some("Basic"),
            &[],
        ),
    ]
}

fn set_json(id: &str, name: &str, boosters: &[(&str, &str)], cards: &[&Card]) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "cardCount": { "total": cards.len(), "official": cards.len() },
        "cards": cards
            .iter()
            .map(|c| json!({ "id": c.id, "localId": c.local_id, "name": c.name }))
            .collect::<Vec<_>>(),
        "boosters": boosters
            .iter()
            .map(|(id, name)| json!({ "id": id, "name": name }))
            .collect::<Vec<_>>(),
    })
}

/// Catalog documents keyed by path, as the card API would serve them.
pub fn catalog_documents() -> HashMap<String, serde_json::Value> {
    let cards = sample_cards();
    let in_set = |set: &str| cards.iter().filter(|c| c.set.id == set).collect::<Vec<_>>();

    let a1 = set_json(
        "A1",
        "Genetic Apex",
        &[
            ("boo_A1-mewtwo", "Mewtwo"),
            ("boo_A1-charizard", "Charizard"),
            ("boo_A1-pikachu", "Pikachu"),
        ],
        &in_set("A1"),
    );
    let a1a = set_json(
        "A1a",
        "Mythical Island",
        &[("boo_A1a-mew", "Mew")],
        &in_set("A1a"),
    );

    let mut docs = HashMap::new();
    docs.insert(
        "series/tcgp".to_string(),
        json!({
            "id": "tcgp",
            "name": "Pokémon TCG Pocket",
            "sets": [
                { "id": "A1", "name": "Genetic Apex" },
                { "id": "A1a", "name": "Mythical Island" },
            ],
        }),
    );
    docs.insert("sets/A1".to_string(), a1);
    docs.insert("sets/A1a".to_string(), a1a);
    for card in &cards {
        docs.insert(format!("cards/{}", card.id), serde_json::to_value(card).unwrap());
    }
    docs
}

/// The two sample sets, fully loaded.
pub fn sample_sets() -> Vec<PocketSet> {
    let docs = catalog_documents();
    ["sets/A1", "sets/A1a"]
        .iter()
        .map(|k| serde_json::from_value(docs[*k].clone()).unwrap())
        .collect()
}

/// Owns Bulbasaur (2), Pikachu, Professor's Research and Mew ex.
pub fn sample_collection() -> Collection {
    HashMap::from([
        ("A1-001".to_string(), 2),
        ("A1-036".to_string(), 0),
        ("A1-094".to_string(), 1),
        ("A1-225".to_string(), 1),
        ("A1a-032".to_string(), 1),
    ])
}

/// Wants Charizard ex and Mewtwo ex; Bulbasaur is wishlisted while owned.
pub fn sample_wishlist() -> Wishlist {
    HashMap::from([
        ("A1-036".to_string(), true),
        ("A1-286".to_string(), true),
        ("A1-001".to_string(), true),
        ("A1a-005".to_string(), false),
    ])
}

// ---------------------------------------------------------------------------
// Mock HTTP server
// ---------------------------------------------------------------------------

/// Serve `app` on `127.0.0.1:<random>` from a background thread and return
/// its base URL (no trailing slash).
///
/// The server lives until the test process exits.
pub fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{}", addr)
}
