//! Local snapshot caching
//!
//! Caches chain snapshots locally to reduce API calls and let screens
//! be replayed offline against the rows a live run saw.

use std::fs;
use std::path::PathBuf;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::core::{ChainSnapshot, OptionKind, ScreenError, ScreenResult};

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cache directory
    pub cache_dir: PathBuf,
    /// Maximum age before refresh (in hours)
    pub max_age_hours: i64,
    /// Whether to use cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./data/cache"),
            max_age_hours: 24,
            enabled: true,
        }
    }
}

/// Snapshot cache manager
///
/// Snapshots are keyed by ticker and chain side; the DTE window they were
/// fetched for is stored in the payload, and a hit is served only when that
/// window covers the requested one.
pub struct SnapshotCache {
    config: CacheConfig,
}

impl SnapshotCache {
    pub fn new(config: CacheConfig) -> ScreenResult<Self> {
        // Create cache directory if needed
        if config.enabled && !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir)
                .map_err(ScreenError::IO)?;
        }

        Ok(Self { config })
    }

    /// Cache file for a ticker and chain side
    fn cache_key(&self, symbol: &str, kind: OptionKind) -> PathBuf {
        self.config.cache_dir.join(format!("{}_{}.json", symbol, kind.label()))
    }

    /// Check if cache is valid (exists and not expired)
    pub fn is_valid(&self, symbol: &str, kind: OptionKind) -> bool {
        if !self.config.enabled {
            return false;
        }

        let path = self.cache_key(symbol, kind);
        if !path.exists() {
            return false;
        }

        // Check modification time
        if let Ok(metadata) = fs::metadata(&path) {
            if let Ok(modified) = metadata.modified() {
                let modified: DateTime<Utc> = modified.into();
                let age = Utc::now() - modified;
                return age < Duration::hours(self.config.max_age_hours);
            }
        }

        false
    }

    /// Save a chain snapshot to cache
    pub fn save_snapshot(&self, snapshot: &ChainSnapshot) -> ScreenResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let path = self.cache_key(&snapshot.ticker, snapshot.kind);
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| ScreenError::Serialization(e.to_string()))?;

        fs::write(&path, json).map_err(ScreenError::IO)?;

        tracing::info!("Cached {} {} snapshot at {:?}", snapshot.ticker, snapshot.kind.label(), path);
        Ok(())
    }

    /// Load a chain snapshot from cache
    ///
    /// A snapshot fetched for a wider DTE window satisfies a narrower
    /// request (the filter stage trims the extra expirations); a request
    /// reaching outside the cached window is a miss.
    pub fn load_snapshot(
        &self,
        symbol: &str,
        kind: OptionKind,
        min_dte: i64,
        max_dte: i64,
    ) -> ScreenResult<Option<ChainSnapshot>> {
        if !self.config.enabled || !self.is_valid(symbol, kind) {
            return Ok(None);
        }

        let path = self.cache_key(symbol, kind);
        let json = fs::read_to_string(&path).map_err(ScreenError::IO)?;

        let snapshot: ChainSnapshot = serde_json::from_str(&json)
            .map_err(|e| ScreenError::Serialization(e.to_string()))?;

        if !snapshot.covers_window(min_dte, max_dte) {
            tracing::info!(
                "Cached {} {} snapshot covers DTE {}..{}, need {}..{}",
                symbol,
                kind.label(),
                snapshot.min_dte,
                snapshot.max_dte,
                min_dte,
                max_dte
            );
            return Ok(None);
        }

        tracing::info!("Loaded {} {} snapshot from cache", symbol, kind.label());
        Ok(Some(snapshot))
    }

    /// Clear cached snapshots for a symbol (both chain sides)
    pub fn clear(&self, symbol: &str) -> ScreenResult<()> {
        for entry in fs::read_dir(&self.config.cache_dir).map_err(ScreenError::IO)? {
            let entry = entry.map_err(ScreenError::IO)?;
            let file_name = entry.file_name().to_string_lossy().to_string();

            if file_name.starts_with(&format!("{}_", symbol)) {
                fs::remove_file(entry.path()).map_err(ScreenError::IO)?;
            }
        }

        Ok(())
    }
}

/// Cached data fetcher - combines cache with live fetching
pub struct CachedFetcher {
    cache: SnapshotCache,
}

impl CachedFetcher {
    pub fn new(config: CacheConfig) -> ScreenResult<Self> {
        Ok(Self {
            cache: SnapshotCache::new(config)?,
        })
    }

    /// Get a chain snapshot (from cache or fetch)
    pub fn get_snapshot(
        &self,
        symbol: &str,
        kind: OptionKind,
        evaluation_date: NaiveDate,
        min_dte: i64,
        max_dte: i64,
    ) -> ScreenResult<ChainSnapshot> {
        // Try cache first
        if let Some(snapshot) = self.cache.load_snapshot(symbol, kind, min_dte, max_dte)? {
            return Ok(snapshot);
        }

        // Fetch from Yahoo
        tracing::info!("Fetching fresh data for {}", symbol);
        let client = super::yahoo::YahooClient::new();
        let snapshot = client.get_snapshot(symbol, kind, evaluation_date, min_dte, max_dte)?;

        // Cache it
        self.cache.save_snapshot(&snapshot)?;

        Ok(snapshot)
    }

    /// Force refresh (bypass cache)
    pub fn refresh_snapshot(
        &self,
        symbol: &str,
        kind: OptionKind,
        evaluation_date: NaiveDate,
        min_dte: i64,
        max_dte: i64,
    ) -> ScreenResult<ChainSnapshot> {
        self.cache.clear(symbol)?;
        self.get_snapshot(symbol, kind, evaluation_date, min_dte, max_dte)
    }
}
