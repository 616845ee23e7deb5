//! Catalog queries through the cache, served by a local mock of the card API.

mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tcgp_sdk::{CacheManager, TcgpError, TcgpSdk};

#[derive(Clone)]
struct Catalog {
    docs: Arc<HashMap<String, Value>>,
    hits: Arc<AtomicUsize>,
}

async fn document(State(catalog): State<Catalog>, Path(path): Path<String>) -> Result<Json<Value>, StatusCode> {
    catalog.hits.fetch_add(1, Ordering::SeqCst);
    catalog
        .docs
        .get(&path)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Start the mock catalog; returns its base URL and a request counter.
fn start_catalog() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let catalog = Catalog {
        docs: Arc::new(common::catalog_documents()),
        hits: hits.clone(),
    };
    let app = Router::new()
        .route("/{*path}", get(document))
        .with_state(catalog);
    (common::spawn_server(app), hits)
}

fn online_sdk(base: &str, dir: &std::path::Path) -> TcgpSdk {
    TcgpSdk::builder()
        .cache_dir(dir)
        .catalog_base(base)
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Online
// ---------------------------------------------------------------------------

#[test]
fn loads_sets_and_cards() {
    let (base, _) = start_catalog();
    let tmp = tempfile::tempdir().unwrap();
    let sdk = online_sdk(&base, tmp.path());

    assert_eq!(sdk.sets().count().unwrap(), 2);
    let sets = sdk.sets().list().unwrap();
    assert_eq!(sets[0].id, "A1");
    assert_eq!(sets[0].boosters.len(), 3);

    let mut progress = Vec::new();
    let cards = sdk.cards().all(&sets, |done, total| progress.push((done, total))).unwrap();
    assert_eq!(cards.len(), 7);
    assert_eq!(progress, vec![(1, 2), (2, 2)]);

    let mew = sdk.cards().get("A1a-032").unwrap().unwrap();
    assert_eq!(mew.name, "Mew ex");
    assert_eq!(sdk.cards().from_set("A1a").unwrap().len(), 2);
}

#[test]
fn unknown_documents_are_none() {
    let (base, _) = start_catalog();
    let tmp = tempfile::tempdir().unwrap();
    let sdk = online_sdk(&base, tmp.path());

    assert!(sdk.sets().get("ZZ").unwrap().is_none());
    assert!(sdk.cards().get("ZZ-001").unwrap().is_none());
    assert!(sdk.cards().from_set("ZZ").unwrap().is_empty());
}

#[test]
fn memory_cache_avoids_refetch_until_refresh() {
    let (base, hits) = start_catalog();
    let tmp = tempfile::tempdir().unwrap();
    let sdk = online_sdk(&base, tmp.path());

    sdk.sets().series().unwrap();
    sdk.sets().series().unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    sdk.refresh();
    sdk.sets().series().unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn expired_memory_entries_are_refetched() {
    let (base, hits) = start_catalog();
    let tmp = tempfile::tempdir().unwrap();
    let mut cache = CacheManager::new(Some(tmp.path().to_path_buf()), false, Duration::from_secs(5))
        .unwrap()
        .with_base_url(base.as_str())
        .with_ttl(Duration::ZERO);

    cache.fetch_json("series/tcgp").unwrap();
    cache.fetch_json("series/tcgp").unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn batch_fetch_keeps_request_order() {
    let (base, hits) = start_catalog();
    let tmp = tempfile::tempdir().unwrap();
    let mut cache = CacheManager::new(Some(tmp.path().to_path_buf()), false, Duration::from_secs(5))
        .unwrap()
        .with_base_url(base.as_str());

    let paths: Vec<String> = ["cards/A1-094", "cards/ZZ-404", "cards/A1a-032", "cards/A1-001"]
        .iter()
        .map(|p| p.to_string())
        .collect();
    let results = cache.fetch_many_json(&paths);

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].as_ref().unwrap()["name"], "Pikachu");
    assert!(matches!(results[1], Err(TcgpError::NotFound(_))));
    assert_eq!(results[2].as_ref().unwrap()["name"], "Mew ex");
    assert_eq!(results[3].as_ref().unwrap()["name"], "Bulbasaur");
    assert_eq!(hits.load(Ordering::SeqCst), 4);

    // Found documents are now in memory; only the missing one is asked again.
    cache.fetch_many_json(&paths);
    assert_eq!(hits.load(Ordering::SeqCst), 5);
}

#[test]
fn set_cards_load_once_in_listing_order() {
    let (base, hits) = start_catalog();
    let tmp = tempfile::tempdir().unwrap();
    let sdk = online_sdk(&base, tmp.path());

    let first: Vec<String> = sdk
        .cards()
        .from_set("A1")
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    let after_first = hits.load(Ordering::SeqCst);
    assert_eq!(after_first, 1 + first.len());

    let listed: Vec<String> = sdk
        .sets()
        .get("A1")
        .unwrap()
        .unwrap()
        .cards
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(first, listed);

    let second: Vec<String> = sdk
        .cards()
        .from_set("A1")
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(first, second);
    assert_eq!(hits.load(Ordering::SeqCst), after_first);
}

#[test]
fn builder_ttl_applies_to_queries() {
    let (base, hits) = start_catalog();
    let tmp = tempfile::tempdir().unwrap();
    let sdk = TcgpSdk::builder()
        .cache_dir(tmp.path())
        .catalog_base(base.as_str())
        .catalog_ttl(Duration::ZERO)
        .build()
        .unwrap();

    sdk.sets().series().unwrap();
    sdk.sets().series().unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn booster_listing_from_fetched_catalog() {
    let (base, _) = start_catalog();
    let tmp = tempfile::tempdir().unwrap();
    let sdk = online_sdk(&base, tmp.path());

    let sets = sdk.sets().list().unwrap();
    let cards = sdk.cards().all(&sets, |_, _| {}).unwrap();
    let boosters = sdk.boosters().list(&sets, &cards);

    let ids: Vec<&str> = boosters.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["boo_A1-charizard", "boo_A1-mewtwo", "boo_A1-pikachu", "boo_A1a-mew"]
    );
    assert_eq!(boosters[0].image, "/boosters/genetic-apex-charizard.webp");
    assert_eq!(boosters[0].card_count, 3);
    assert_eq!(boosters[3].card_count, 2);
    assert_eq!(boosters[3].set_name, "Mythical Island");

    let pikachu: Vec<&str> = sdk
        .boosters()
        .cards(&cards, "boo_A1-pikachu")
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(pikachu, vec!["A1-094", "A1-225"]);
}

// ---------------------------------------------------------------------------
// Disk copies
// ---------------------------------------------------------------------------

#[test]
fn offline_serves_previous_downloads() {
    let (base, _) = start_catalog();
    let tmp = tempfile::tempdir().unwrap();
    {
        let sdk = online_sdk(&base, tmp.path());
        let sets = sdk.sets().list().unwrap();
        sdk.cards().all(&sets, |_, _| {}).unwrap();
    }

    let offline = TcgpSdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .build()
        .unwrap();
    let sets = offline.sets().list().unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(offline.cards().all(&sets, |_, _| {}).unwrap().len(), 7);
}

#[test]
fn offline_without_copy_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = TcgpSdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .build()
        .unwrap();
    assert!(matches!(sdk.sets().series(), Err(TcgpError::NotFound(_))));
    assert!(sdk.sets().get("A1").unwrap().is_none());
}

#[test]
fn unreachable_catalog_falls_back_to_disk() {
    let (base, _) = start_catalog();
    let tmp = tempfile::tempdir().unwrap();
    online_sdk(&base, tmp.path()).sets().series().unwrap();

    let sdk = online_sdk("http://127.0.0.1:1", tmp.path());
    assert_eq!(sdk.sets().series().unwrap().sets.len(), 2);
    assert!(sdk.sets().get("A1").is_err());
}

#[test]
fn clear_cache_removes_disk_copies() {
    let (base, _) = start_catalog();
    let tmp = tempfile::tempdir().unwrap();
    let sdk = online_sdk(&base, tmp.path());
    sdk.sets().series().unwrap();
    sdk.clear_cache().unwrap();

    let offline = TcgpSdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .build()
        .unwrap();
    assert!(offline.sets().series().is_err());
}
