//! Async wrapper around [`TcgpSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! Catalog fetches and model calls use a blocking HTTP client, which is why
//! they must not run on the event loop directly.
//!
//! # Example
//!
//! ```no_run
//! use tcgp_sdk::AsyncTcgpSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncTcgpSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let sets = sdk.run(|s| s.sets().list()).await.unwrap();
//!     println!("{} sets", sets.len());
//! }
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::assistant::AssistantGateway;
use crate::chat::ChatSession;
use crate::config::BoosterTaxonomy;
use crate::error::{Result, TcgpError};
use crate::models::{Card, ChatContextData, ChatMessage, PocketSet};
use crate::{TcgpSdk, TcgpSdkBuilder};

// ---------------------------------------------------------------------------
// AsyncTcgpSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncTcgpSdk`] instance.
///
/// Offers the same options as [`TcgpSdkBuilder`].
#[derive(Default)]
pub struct AsyncTcgpSdkBuilder {
    inner: TcgpSdkBuilder,
}

impl AsyncTcgpSdkBuilder {
    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.inner = self.inner.cache_dir(path);
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.inner = self.inner.offline(offline);
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Catalog API root.
    pub fn catalog_base(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.catalog_base(url);
        self
    }

    /// How long a catalog response is served from memory.
    pub fn catalog_ttl(mut self, ttl: Duration) -> Self {
        self.inner = self.inner.catalog_ttl(ttl);
        self
    }

    /// Model API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.inner = self.inner.api_key(key);
        self
    }

    /// Messages endpoint URL.
    pub fn messages_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.messages_url(url);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.inner = self.inner.model(model);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.inner = self.inner.max_tokens(max_tokens);
        self
    }

    /// Earlier messages replayed with each chat turn.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.inner = self.inner.history_limit(limit);
        self
    }

    /// Replace the built-in booster taxonomy.
    pub fn taxonomy(mut self, taxonomy: BoosterTaxonomy) -> Self {
        self.inner = self.inner.taxonomy(taxonomy);
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncTcgpSdk> {
        tokio::task::spawn_blocking(move || {
            let sdk = self.inner.build()?;
            Ok(AsyncTcgpSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| TcgpError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncTcgpSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`TcgpSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`TcgpSdk`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally.
pub struct AsyncTcgpSdk {
    inner: Arc<Mutex<TcgpSdk>>,
}

impl AsyncTcgpSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncTcgpSdkBuilder {
        AsyncTcgpSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&TcgpSdk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&TcgpSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| TcgpError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| TcgpError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Every set in the series, fully loaded.
    pub async fn sets(&self) -> Result<Vec<PocketSet>> {
        self.run(|s| s.sets().list()).await
    }

    /// Every card of the given sets.
    pub async fn cards(&self, sets: Vec<PocketSet>) -> Result<Vec<Card>> {
        self.run(move |s| s.cards().all(&sets, |_, _| {})).await
    }

    /// An empty conversation using the configured history limit.
    pub async fn new_chat_session(&self) -> Result<ChatSession> {
        self.run(|s| Ok(s.new_chat_session())).await
    }

    /// Run one chat turn.
    ///
    /// The SDK lock is held only to copy the model settings and the session
    /// lock only to start and finish the turn; the model call itself holds
    /// neither. A second call on a session whose turn is still in flight
    /// fails with [`TcgpError::Busy`].
    pub async fn submit(
        &self,
        session: Arc<Mutex<ChatSession>>,
        text: String,
        context: ChatContextData,
    ) -> Result<ChatMessage> {
        let settings = self.run(|s| Ok(s.gateway_settings().clone())).await?;
        tokio::task::spawn_blocking(move || {
            let gateway = AssistantGateway::new(settings)?;
            let turn = lock_session(&session)?.begin_turn(&text, &context)?;
            let outcome = gateway.send(&turn.messages, &turn.system_prompt);
            let mut session = lock_session(&session)?;
            let reply = session.finish_turn(outcome)?.clone();
            Ok(reply)
        })
        .await
        .map_err(|e| TcgpError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Forget in-memory catalog responses.
    pub async fn refresh(&self) -> Result<()> {
        self.run(|s| {
            s.refresh();
            Ok(())
        })
        .await
    }

    /// Close the SDK, releasing all resources.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let sdk = self
                .inner
                .lock()
                .map_err(|_| TcgpError::InvalidArgument("SDK lock poisoned".into()))?;
            drop(sdk);
            Ok(())
        })
        .await
        .map_err(|e| TcgpError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

fn lock_session(session: &Mutex<ChatSession>) -> Result<MutexGuard<'_, ChatSession>> {
    session
        .lock()
        .map_err(|_| TcgpError::InvalidArgument("chat session lock poisoned".into()))
}
