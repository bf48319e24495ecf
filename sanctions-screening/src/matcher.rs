//! Sanctions list loading and name search

use crate::{
    cache::SnapshotCache,
    config::SanctionsConfig,
    freshness::{FreshnessPolicy, MaxAgePolicy},
    fuzzy::{partial_ratio, ratio},
    normalize::{name_variants, normalize},
    snapshot::{parse_snapshot, HttpSnapshotSource, SnapshotSource},
    types::SanctionsEntry,
    Error, Result,
};
use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default match threshold (0-100)
pub const DEFAULT_THRESHOLD: u8 = 85;

/// Default zero-based name column of the SECO export
const DEFAULT_NAME_COLUMN: usize = 4;

/// Default wait before retrying a failed refresh (seconds)
const DEFAULT_RETRY_BACKOFF_SECS: i64 = 300;

/// Precomputed comparison forms of one listed name
#[derive(Debug, Clone)]
struct IndexedName {
    name: String,
    normalized: String,
    token_count: usize,
    variants: BTreeSet<String>,
}

impl IndexedName {
    fn new(name: &str) -> Self {
        let normalized = normalize(name);
        Self {
            name: name.to_string(),
            token_count: normalized.split_whitespace().count(),
            variants: name_variants(name),
            normalized,
        }
    }
}

/// A loaded sanctions list, immutable for its cache window
#[derive(Debug)]
pub struct SanctionsList {
    fetched_at: DateTime<Utc>,
    entries: Vec<SanctionsEntry>,
    index: Vec<IndexedName>,
}

impl SanctionsList {
    /// Index entries fetched at `fetched_at`
    pub fn new(entries: Vec<SanctionsEntry>, fetched_at: DateTime<Utc>) -> Self {
        let index = entries.iter().map(|e| IndexedName::new(&e.name)).collect();
        Self {
            fetched_at,
            entries,
            index,
        }
    }

    /// When the underlying snapshot was fetched
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// All entries in snapshot order
    pub fn entries(&self) -> &[SanctionsEntry] {
        &self.entries
    }

    /// Listed names in snapshot order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of listed names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No names listed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Listed names matching `name`, sorted and deduplicated.
    ///
    /// An entry matches when a query variant equals one of its variants, or
    /// when a query variant scores at least `threshold` against the entry's
    /// normalized name, by `ratio` or, for entries of more than two tokens,
    /// by `partial_ratio`.
    pub fn search(&self, name: &str, threshold: u8) -> Vec<String> {
        let query: Vec<String> = name_variants(name)
            .into_iter()
            .filter(|v| !v.is_empty())
            .collect();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches = BTreeSet::new();
        for entry in &self.index {
            if query.iter().any(|v| entry.variants.contains(v)) {
                debug!("Exact variant match: {:?} ~ {:?}", name, entry.name);
                matches.insert(entry.name.clone());
                continue;
            }

            let use_partial = entry.token_count > 2;
            for variant in &query {
                let full = ratio(variant, &entry.normalized);
                if full >= threshold {
                    debug!("Fuzzy match ({}): {:?} ~ {:?}", full, name, entry.name);
                    matches.insert(entry.name.clone());
                    break;
                }

                if use_partial {
                    let partial = partial_ratio(variant, &entry.normalized);
                    if partial >= threshold {
                        debug!("Partial match ({}): {:?} ~ {:?}", partial, name, entry.name);
                        matches.insert(entry.name.clone());
                        break;
                    }
                }
            }
        }

        matches.into_iter().collect()
    }
}

/// Screens names against the sanctions list.
///
/// The list is loaded lazily and kept in memory until the freshness policy
/// declares it stale.
pub struct SanctionsMatcher {
    source: Arc<dyn SnapshotSource>,
    cache: SnapshotCache,
    policy: Arc<dyn FreshnessPolicy>,
    name_column: usize,
    threshold: u8,
    retry_backoff: Duration,
    list: RwLock<Option<Arc<SanctionsList>>>,
    retry_after: Mutex<Option<DateTime<Utc>>>,
}

impl SanctionsMatcher {
    /// Matcher over an explicit source, cache and freshness policy
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        cache: SnapshotCache,
        policy: Arc<dyn FreshnessPolicy>,
    ) -> Self {
        Self {
            source,
            cache,
            policy,
            name_column: DEFAULT_NAME_COLUMN,
            threshold: DEFAULT_THRESHOLD,
            retry_backoff: Duration::seconds(DEFAULT_RETRY_BACKOFF_SECS),
            list: RwLock::new(None),
            retry_after: Mutex::new(None),
        }
    }

    /// Matcher wired to the HTTP export and on-disk cache from config
    pub fn from_config(config: &SanctionsConfig) -> Result<Self> {
        config.validate()?;
        let source = HttpSnapshotSource::from_config(config)?;

        Ok(Self::new(
            Arc::new(source),
            SnapshotCache::new(config.cache_path()),
            Arc::new(MaxAgePolicy::hours(config.max_age_hours)),
        )
        .with_threshold(config.threshold)
        .with_name_column(config.name_column)
        .with_retry_backoff(Duration::seconds(config.retry_backoff_secs as i64)))
    }

    /// Override the default threshold
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold.min(100);
        self
    }

    /// Override the name column
    pub fn with_name_column(mut self, name_column: usize) -> Self {
        self.name_column = name_column;
        self
    }

    /// Override the wait after a failed refresh
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Threshold used by [`search`](Self::search)
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Current sanctions list, refetched when missing or stale.
    ///
    /// A download is cached only once it parses. If the download fails or
    /// does not parse, a stale list is kept and the next attempt waits for
    /// the retry back-off. Without any list to fall back to, the error is
    /// returned: [`Error::Fetch`] for a failed download, [`Error::Snapshot`]
    /// for an unusable one.
    pub async fn refresh_list(&self) -> Result<Arc<SanctionsList>> {
        let now = Utc::now();
        let current = self.list.read().clone();
        if let Some(list) = &current {
            if !self.policy.is_stale(Some(list.fetched_at()), now) {
                return Ok(list.clone());
            }
            let retry_after = *self.retry_after.lock();
            if retry_after.map_or(false, |at| now < at) {
                debug!("Sanctions refresh backing off, keeping list from {}", list.fetched_at());
                return Ok(list.clone());
            }
        }

        let cached = self.cached_list();
        if let Some(list) = &cached {
            if !self.policy.is_stale(Some(list.fetched_at()), now) {
                debug!("Using cached sanctions snapshot from {}", list.fetched_at());
                return Ok(self.install(list.clone()));
            }
        }

        let downloaded = match self.source.fetch().await {
            Ok(bytes) => parse_snapshot(&bytes, self.name_column).map(|entries| (bytes, entries)),
            Err(e) => Err(e),
        };

        match downloaded {
            Ok((bytes, entries)) => {
                if let Err(e) = self.cache.store(&bytes) {
                    warn!("Failed to cache sanctions snapshot: {}", e);
                }
                *self.retry_after.lock() = None;
                Ok(self.install(Arc::new(SanctionsList::new(entries, now))))
            }
            Err(e) => match cached.or(current) {
                Some(stale) => {
                    warn!(
                        "Sanctions snapshot refresh failed ({}), using stale copy from {}",
                        e,
                        stale.fetched_at()
                    );
                    *self.retry_after.lock() = Some(now + self.retry_backoff);
                    Ok(self.install(stale))
                }
                None => Err(match e {
                    Error::Fetch(_) | Error::Snapshot(_) => e,
                    other => Error::Fetch(other.to_string()),
                }),
            },
        }
    }

    /// Parsed on-disk snapshot, `None` when absent or unusable
    fn cached_list(&self) -> Option<Arc<SanctionsList>> {
        let snapshot = match self.cache.load() {
            Ok(snapshot) => snapshot?,
            Err(e) => {
                warn!("Ignoring unreadable sanctions cache {}: {}", self.cache.path().display(), e);
                return None;
            }
        };

        match parse_snapshot(&snapshot.bytes, self.name_column) {
            Ok(entries) => Some(Arc::new(SanctionsList::new(entries, snapshot.fetched_at))),
            Err(e) => {
                warn!("Ignoring unusable sanctions cache {}: {}", self.cache.path().display(), e);
                None
            }
        }
    }

    fn install(&self, list: Arc<SanctionsList>) -> Arc<SanctionsList> {
        let mut slot = self.list.write();
        let unchanged = slot.as_ref().map_or(false, |held| Arc::ptr_eq(held, &list));
        if !unchanged {
            info!(
                "Loaded sanctions list with {} names (fetched {})",
                list.len(),
                list.fetched_at()
            );
            *slot = Some(list.clone());
        }
        list
    }

    /// Listed names matching `name` at the configured threshold
    pub async fn search(&self, name: &str) -> Result<Vec<String>> {
        self.search_with_threshold(name, self.threshold).await
    }

    /// Listed names matching `name` at an explicit threshold
    pub async fn search_with_threshold(&self, name: &str, threshold: u8) -> Result<Vec<String>> {
        let list = self.refresh_list().await?;
        let matches = list.search(name, threshold);
        if !matches.is_empty() {
            warn!("Sanctions hit for {:?}: {} match(es)", name, matches.len());
        }
        Ok(matches)
    }

    /// Whether `name` matches any listed name
    pub async fn is_sanctioned(&self, name: &str) -> Result<bool> {
        Ok(!self.search(name).await?.is_empty())
    }

    /// A random listed name
    pub async fn random_sanctioned_name(&self) -> Result<String> {
        let list = self.refresh_list().await?;
        list.entries()
            .choose(&mut rand::thread_rng())
            .map(|e| e.name.clone())
            .ok_or_else(|| Error::Snapshot("sanctions list is empty".to_string()))
    }

    /// Number of listed names
    pub async fn entry_count(&self) -> Result<usize> {
        Ok(self.refresh_list().await?.len())
    }
}
