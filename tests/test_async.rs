//! Async wrapper tests. Run with `--features async`.

#![cfg(feature = "async")]

mod common;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tcgp_sdk::models::ChatContextData;
use tcgp_sdk::{AsyncTcgpSdk, ChatSession, TcgpError};

async fn reply(Json(_): Json<Value>) -> Json<Value> {
    Json(json!({ "content": [{ "type": "text", "text": "Open Mewtwo next." }] }))
}

async fn slow_reply(Json(_): Json<Value>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(1500)).await;
    Json(json!({ "content": [{ "type": "text", "text": "Take your time." }] }))
}

async fn slow_sdk(tmp: &tempfile::TempDir) -> (AsyncTcgpSdk, ChatContextData) {
    let base = common::spawn_server(Router::new().route("/v1/messages", post(slow_reply)));
    let sdk = AsyncTcgpSdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .api_key("test-key")
        .messages_url(format!("{}/v1/messages", base))
        .build()
        .await
        .unwrap();
    let context = sdk
        .run(|s| {
            Ok(s.chat_context(
                &common::sample_cards(),
                &common::sample_sets(),
                &common::sample_collection(),
                &common::sample_wishlist(),
            ))
        })
        .await
        .unwrap();
    (sdk, context)
}

#[tokio::test]
async fn chat_turn_on_blocking_pool() {
    let base = common::spawn_server(Router::new().route("/v1/messages", post(reply)));
    let tmp = tempfile::tempdir().unwrap();
    let sdk = AsyncTcgpSdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .api_key("test-key")
        .messages_url(format!("{}/v1/messages", base))
        .build()
        .await
        .unwrap();

    let context = sdk
        .run(|s| {
            Ok(s.chat_context(
                &common::sample_cards(),
                &common::sample_sets(),
                &common::sample_collection(),
                &common::sample_wishlist(),
            ))
        })
        .await
        .unwrap();

    let session = Arc::new(Mutex::new(ChatSession::default()));
    let msg = sdk
        .submit(session.clone(), "What next?".into(), context)
        .await
        .unwrap();
    assert_eq!(msg.content, "Open Mewtwo next.");
    assert_eq!(session.lock().unwrap().messages().len(), 2);

    sdk.close().await.unwrap();
}

#[tokio::test]
async fn second_turn_in_flight_is_busy() {
    let tmp = tempfile::tempdir().unwrap();
    let (sdk, context) = slow_sdk(&tmp).await;
    let session = Arc::new(Mutex::new(ChatSession::default()));

    let (a, b) = tokio::join!(
        sdk.submit(session.clone(), "first".into(), context.clone()),
        async {
            tokio::time::sleep(Duration::from_millis(300)).await;
            sdk.submit(session.clone(), "second".into(), context.clone()).await
        }
    );

    assert_eq!(a.unwrap().content, "Take your time.");
    assert!(matches!(b, Err(TcgpError::Busy)));
    let session = session.lock().unwrap();
    assert_eq!(session.messages().len(), 2);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn sdk_is_usable_during_a_chat_turn() {
    let tmp = tempfile::tempdir().unwrap();
    let (sdk, context) = slow_sdk(&tmp).await;
    let session = Arc::new(Mutex::new(ChatSession::default()));

    let (turn, waited) = tokio::join!(
        sdk.submit(session.clone(), "hello".into(), context),
        async {
            tokio::time::sleep(Duration::from_millis(300)).await;
            let started = Instant::now();
            sdk.refresh().await.unwrap();
            started.elapsed()
        }
    );

    turn.unwrap();
    assert!(waited < Duration::from_millis(800), "refresh waited {waited:?}");
}

#[tokio::test]
async fn builder_history_limit_reaches_sessions() {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = AsyncTcgpSdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .history_limit(4)
        .model("test-model")
        .build()
        .await
        .unwrap();
    assert_eq!(sdk.new_chat_session().await.unwrap().history_limit(), 4);
    let model = sdk.run(|s| Ok(s.gateway_settings().model.clone())).await.unwrap();
    assert_eq!(model, "test-model");
}

#[tokio::test]
async fn offline_sets_without_cache_fail() {
    let tmp = tempfile::tempdir().unwrap();
    let sdk = AsyncTcgpSdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .build()
        .await
        .unwrap();
    assert!(sdk.sets().await.is_err());
}
