//! Pokemon TCG Pocket collection SDK for Rust.
//!
//! Loads the TCG Pocket catalog from a public card API (cached in memory and
//! on disk), tracks a user's owned counts and wishlist, folds both into
//! completion statistics and talks to a hosted language model that can answer
//! questions about the collection and suggest card filters.
//!
//! # Quick start
//!
//! ```no_run
//! use tcgp_sdk::TcgpSdk;
//!
//! let sdk = TcgpSdk::builder().build().unwrap();
//!
//! let sets = sdk.sets().list().unwrap();
//! let cards = sdk.cards().all(&sets, |_, _| {}).unwrap();
//!
//! let collection = tcgp_sdk::models::Collection::new();
//! let wishlist = tcgp_sdk::models::Wishlist::new();
//! let context = sdk.chat_context(&cards, &sets, &collection, &wishlist);
//!
//! let gateway = sdk.gateway().unwrap();
//! let mut chat = sdk.new_chat_session();
//! let reply = chat
//!     .submit(&gateway, "Which booster should I open next?", &context)
//!     .unwrap();
//! println!("{}", reply.content);
//! ```

pub mod assistant;
#[cfg(feature = "async")]
pub mod async_client;
pub mod booster;
pub mod cache;
pub mod chat;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod prompt;
pub mod queries;
pub mod store;
pub mod summary;
pub mod tiers;
pub mod tracker;

pub use assistant::{extract_filter_action, interpret_response, AssistantGateway, GatewaySettings};
#[cfg(feature = "async")]
pub use async_client::AsyncTcgpSdk;
pub use cache::CacheManager;
pub use chat::ChatSession;
pub use config::BoosterTaxonomy;
pub use error::{Result, TcgpError};
pub use tracker::{CollectionTracker, WishlistTracker};

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use models::{BoosterSummary, Card, ChatContextData, Collection, CollectionSummary, PocketSet, Wishlist};

// ---------------------------------------------------------------------------
// TcgpSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`TcgpSdk`] instance.
///
/// Use [`TcgpSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](TcgpSdkBuilder::build) to create the SDK.
pub struct TcgpSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    catalog_base: Option<String>,
    catalog_ttl: Duration,
    gateway: GatewaySettings,
    history_limit: usize,
    taxonomy: Option<BoosterTaxonomy>,
}

impl Default for TcgpSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: Duration::from_secs(120),
            catalog_base: None,
            catalog_ttl: config::CATALOG_TTL,
            gateway: GatewaySettings::default(),
            history_limit: config::DEFAULT_HISTORY_LIMIT,
            taxonomy: None,
        }
    }
}

impl TcgpSdkBuilder {
    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/tcgp-sdk` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, catalog data is served only from the in-memory and
    /// on-disk caches. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for catalog and model calls.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.gateway.timeout = timeout;
        self
    }

    /// Catalog API root. Defaults to [`config::CATALOG_BASE`].
    pub fn catalog_base(mut self, url: impl Into<String>) -> Self {
        self.catalog_base = Some(url.into());
        self
    }

    /// How long a catalog response is served from memory. Defaults to
    /// [`config::CATALOG_TTL`].
    pub fn catalog_ttl(mut self, ttl: Duration) -> Self {
        self.catalog_ttl = ttl;
        self
    }

    /// Model API key. Falls back to `ANTHROPIC_API_KEY` when unset.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.gateway.api_key = Some(key.into());
        self
    }

    /// Messages endpoint URL.
    pub fn messages_url(mut self, url: impl Into<String>) -> Self {
        self.gateway.messages_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.gateway.model = model.into();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.gateway.max_tokens = max_tokens;
        self
    }

    /// Earlier messages replayed with each chat turn. Defaults to 10.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Replace the built-in booster taxonomy.
    pub fn taxonomy(mut self, taxonomy: BoosterTaxonomy) -> Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    /// Build the SDK, preparing the cache directory.
    ///
    /// Nothing is downloaded eagerly; catalog documents are fetched on first
    /// query.
    pub fn build(self) -> Result<TcgpSdk> {
        let mut cache = CacheManager::new(self.cache_dir, self.offline, self.timeout)?
            .with_ttl(self.catalog_ttl);
        if let Some(base) = self.catalog_base {
            cache = cache.with_base_url(base);
        }
        let mut gateway = self.gateway;
        if gateway.api_key.is_none() {
            gateway.api_key = config::api_key_from_env();
        }
        Ok(TcgpSdk {
            cache: RefCell::new(cache),
            taxonomy: self.taxonomy.unwrap_or_else(BoosterTaxonomy::pocket),
            gateway,
            history_limit: self.history_limit,
        })
    }
}

// ---------------------------------------------------------------------------
// TcgpSdk
// ---------------------------------------------------------------------------

/// The main entry point for the SDK.
///
/// Owns the [`CacheManager`], the booster taxonomy and the model settings,
/// and exposes catalog queries as lightweight borrowing wrappers.
///
/// Created via [`TcgpSdk::builder()`].
pub struct TcgpSdk {
    cache: RefCell<CacheManager>,
    taxonomy: BoosterTaxonomy,
    gateway: GatewaySettings,
    history_limit: usize,
}

impl TcgpSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> TcgpSdkBuilder {
        TcgpSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the set query interface.
    pub fn sets(&self) -> queries::SetQuery<'_> {
        queries::SetQuery::new(&self.cache)
    }

    /// Access the card query interface.
    pub fn cards(&self) -> queries::CardQuery<'_> {
        queries::CardQuery::new(&self.cache)
    }

    /// Access the booster query interface.
    pub fn boosters(&self) -> queries::BoosterQuery<'_> {
        queries::BoosterQuery::new(&self.taxonomy)
    }

    pub fn taxonomy(&self) -> &BoosterTaxonomy {
        &self.taxonomy
    }

    // -- Aggregation -------------------------------------------------------

    /// See [`summary::summarize`].
    pub fn summarize(
        &self,
        cards: &[Card],
        collection: &Collection,
        wishlist: &Wishlist,
    ) -> CollectionSummary {
        summary::summarize(cards, Some(collection), Some(wishlist))
    }

    /// See [`summary::summarize_boosters`]; uses this SDK's taxonomy.
    pub fn summarize_boosters(
        &self,
        cards: &[Card],
        sets: &[PocketSet],
        collection: &Collection,
    ) -> Vec<BoosterSummary> {
        summary::summarize_boosters(cards, sets, Some(collection), &self.taxonomy)
    }

    /// Both summaries, packaged for the prompt builder.
    pub fn chat_context(
        &self,
        cards: &[Card],
        sets: &[PocketSet],
        collection: &Collection,
        wishlist: &Wishlist,
    ) -> ChatContextData {
        ChatContextData {
            collection_summary: self.summarize(cards, collection, wishlist),
            booster_summaries: self.summarize_boosters(cards, sets, collection),
        }
    }

    // -- Assistant ---------------------------------------------------------

    /// A gateway for the configured model.
    ///
    /// Fails with [`TcgpError::Configuration`] when no API key was given and
    /// none is set in the environment.
    pub fn gateway(&self) -> Result<AssistantGateway> {
        AssistantGateway::new(self.gateway.clone())
    }

    /// Model connection settings, API key included.
    pub fn gateway_settings(&self) -> &GatewaySettings {
        &self.gateway
    }

    /// An empty conversation using the configured history limit.
    pub fn new_chat_session(&self) -> ChatSession {
        ChatSession::new(self.history_limit)
    }

    // -- Cache -------------------------------------------------------------

    /// Forget in-memory catalog responses so the next query re-fetches.
    pub fn refresh(&self) {
        self.cache.borrow_mut().invalidate();
        info!("catalog memory cache invalidated");
    }

    /// Remove every cached catalog document, in memory and on disk.
    pub fn clear_cache(&self) -> Result<()> {
        self.cache.borrow_mut().clear()
    }

    /// Consume the SDK and release all resources.
    pub fn close(self) {
        self.cache.borrow_mut().close();
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for TcgpSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.borrow();
        write!(
            f,
            "TcgpSdk(cache_dir={}, offline={}, model={})",
            cache.cache_dir.display(),
            cache.offline,
            self.gateway.model
        )
    }
}
