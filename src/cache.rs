//! Read-through cache for catalog API responses.
//!
//! Responses are kept in memory for a short TTL (the catalog changes rarely
//! and a browsing session re-requests the same sets constantly) and mirrored
//! to gzip-compressed files on disk so offline mode can serve anything that
//! was fetched before.

use crate::config;
use crate::error::{Result, TcgpError};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Downloads and caches catalog JSON documents.
///
/// Keys are catalog paths relative to the base URL (e.g. `"sets/A1"`).
pub struct CacheManager {
    /// Directory where cached files are stored.
    pub cache_dir: PathBuf,
    /// If true, never hit the network (serve memory or disk copies only).
    pub offline: bool,
    base_url: String,
    ttl: Duration,
    timeout: Duration,
    client: Option<Client>,
    memory: HashMap<String, (Instant, serde_json::Value)>,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool, timeout: Duration) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            base_url: config::CATALOG_BASE.to_string(),
            ttl: config::CATALOG_TTL,
            timeout,
            client: None,
            memory: HashMap::new(),
        })
    }

    /// Point the cache at a different catalog root (mirrors, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override how long an in-memory entry stays fresh.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            let client = Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?;
            self.client = Some(client);
        }
        self.client
            .as_ref()
            .ok_or_else(|| TcgpError::InvalidArgument("HTTP client unavailable".into()))
    }

    /// Fetch a catalog document and deserialize it.
    pub fn fetch<T: DeserializeOwned>(&mut self, path: &str) -> Result<T> {
        let value = self.fetch_json(path)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch a catalog document as raw JSON.
    ///
    /// Order of lookup: fresh memory entry, then the network (unless
    /// offline), then the disk copy. A network failure with a disk copy
    /// available degrades to the disk copy.
    pub fn fetch_json(&mut self, path: &str) -> Result<serde_json::Value> {
        let key = normalize_key(path)?;
        if let Some(value) = self.fresh(&key) {
            return Ok(value);
        }
        if self.offline {
            return self.from_disk_only(key);
        }
        let client = self.client().map(Client::clone);
        let downloaded = client.and_then(|client| download(&client, &self.base_url, &key));
        self.settle(key, downloaded)
    }

    /// Fetch several documents, downloading up to
    /// [`config::FETCH_WORKERS`] of them at a time.
    ///
    /// Results are in the order of `paths`, each with the same lookup rules
    /// as [`fetch_json`](Self::fetch_json).
    pub fn fetch_many_json(&mut self, paths: &[String]) -> Vec<Result<serde_json::Value>> {
        let mut results: Vec<Option<Result<serde_json::Value>>> =
            paths.iter().map(|_| None).collect();
        let mut wanted: Vec<(usize, String)> = Vec::new();

        for (i, path) in paths.iter().enumerate() {
            let key = match normalize_key(path) {
                Ok(key) => key,
                Err(e) => {
                    results[i] = Some(Err(e));
                    continue;
                }
            };
            if let Some(value) = self.fresh(&key) {
                results[i] = Some(Ok(value));
            } else if self.offline {
                results[i] = Some(self.from_disk_only(key));
            } else {
                wanted.push((i, key));
            }
        }

        if !wanted.is_empty() {
            let client = self.client().map(Client::clone);
            let downloaded = match client {
                Ok(client) => download_all(&client, &self.base_url, &wanted),
                Err(e) => {
                    let message = e.to_string();
                    wanted
                        .iter()
                        .map(|(i, key)| {
                            (*i, key.clone(), Err(TcgpError::InvalidArgument(message.clone())))
                        })
                        .collect()
                }
            };
            info!(count = downloaded.len(), "downloaded catalog documents");
            for (i, key, outcome) in downloaded {
                results[i] = Some(self.settle(key, outcome));
            }
        }

        results
            .into_iter()
            .map(|r| {
                r.unwrap_or_else(|| Err(TcgpError::InvalidArgument("download worker panicked".into())))
            })
            .collect()
    }

    /// Memory entry for `key` if it is still within the TTL.
    fn fresh(&self, key: &str) -> Option<serde_json::Value> {
        let (stored, value) = self.memory.get(key)?;
        if stored.elapsed() < self.ttl {
            debug!(path = %key, "catalog cache hit");
            return Some(value.clone());
        }
        None
    }

    fn from_disk_only(&mut self, key: String) -> Result<serde_json::Value> {
        let disk_path = self.disk_path(&key);
        if !disk_path.exists() {
            return Err(TcgpError::NotFound(format!(
                "Catalog document {} not cached and offline mode is enabled",
                key
            )));
        }
        let value = self.load_disk(&disk_path)?;
        self.memory.insert(key, (Instant::now(), value.clone()));
        Ok(value)
    }

    /// Record a download outcome: persist successes, fall back to the disk
    /// copy on failure.
    fn settle(
        &mut self,
        key: String,
        downloaded: Result<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let disk_path = self.disk_path(&key);
        match downloaded {
            Ok(value) => {
                if let Err(e) = store_disk(&disk_path, &value) {
                    warn!(path = %disk_path.display(), error = %e, "failed to write catalog cache file");
                }
                self.memory.insert(key, (Instant::now(), value.clone()));
                Ok(value)
            }
            Err(e) if disk_path.exists() => {
                warn!(path = %key, error = %e, "catalog download failed, serving disk copy");
                let value = self.load_disk(&disk_path)?;
                self.memory.insert(key, (Instant::now(), value.clone()));
                Ok(value)
            }
            Err(e) => Err(e),
        }
    }

    fn disk_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json.gz", key))
    }

    /// Read a gzip'd cache file.
    ///
    /// If the file is corrupt (truncated write, disk error) it is deleted so
    /// the next online call refetches a fresh copy.
    fn load_disk(&self, path: &Path) -> Result<serde_json::Value> {
        let parse_result = (|| -> Result<serde_json::Value> {
            let file = fs::File::open(path)?;
            let mut reader = BufReader::new(GzDecoder::new(BufReader::new(file)));
            let mut contents = String::new();
            reader.read_to_string(&mut contents)?;
            Ok(serde_json::from_str(&contents)?)
        })();

        match parse_result {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt catalog cache file, removing");
                let _ = fs::remove_file(path);
                Err(TcgpError::NotFound(format!(
                    "Cache file '{}' was corrupt and has been removed. \
                     Retry to re-download. Original error: {}",
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown"),
                    e
                )))
            }
        }
    }

    /// Drop all in-memory entries, keeping disk copies.
    pub fn invalidate(&mut self) {
        self.memory.clear();
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&mut self) -> Result<()> {
        self.memory.clear();
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}

fn download(client: &Client, base_url: &str, key: &str) -> Result<serde_json::Value> {
    let url = format!("{}/{}", base_url, key);
    debug!(%url, "downloading catalog document");
    let resp = client.get(&url).send()?;
    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(TcgpError::NotFound(format!("Catalog document {} not found", key)));
    }
    let resp = resp.error_for_status()?;
    Ok(resp.json()?)
}

/// Download `keys` on up to [`config::FETCH_WORKERS`] scoped threads, each
/// working through a contiguous slice.
fn download_all(
    client: &Client,
    base_url: &str,
    keys: &[(usize, String)],
) -> Vec<(usize, String, Result<serde_json::Value>)> {
    let per_worker = keys.len().div_ceil(config::FETCH_WORKERS).max(1);
    std::thread::scope(|scope| {
        let handles: Vec<_> = keys
            .chunks(per_worker)
            .map(|batch| {
                let client = client.clone();
                scope.spawn(move || {
                    batch
                        .iter()
                        .map(|(i, key)| (*i, key.clone(), download(&client, base_url, key)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_default())
            .collect()
    })
}

/// Write `value` gzip-compressed, replacing `dest` atomically.
fn store_disk(dest: &Path, value: &serde_json::Value) -> Result<()> {
    let parent = dest
        .parent()
        .ok_or_else(|| TcgpError::InvalidArgument(format!("Bad cache path {}", dest.display())))?;
    fs::create_dir_all(parent)?;

    let tmp = tempfile::NamedTempFile::new_in(parent)?;
    let mut encoder = GzEncoder::new(tmp, Compression::default());
    encoder.write_all(&serde_json::to_vec(value)?)?;
    let tmp = encoder.finish()?;
    tmp.persist(dest).map_err(|e| TcgpError::Io(e.error))?;
    Ok(())
}

/// Strip slashes and refuse keys that could escape the cache directory.
fn normalize_key(path: &str) -> Result<String> {
    let key = path.trim_matches('/');
    if key.is_empty() || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        return Err(TcgpError::InvalidArgument(format!(
            "Invalid catalog path: {:?}",
            path
        )));
    }
    Ok(key.to_string())
}
