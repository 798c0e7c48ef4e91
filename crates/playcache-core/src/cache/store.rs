use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{CardPairRecord, ContentRecord, PhraseRecord, WheelItemRecord};

/// Consider cache stale after 1 hour.
/// Balances freshness with reducing unnecessary fetches for slowly-changing
/// content (settings edits are rare once a game is set up).
const CACHE_STALE_MINUTES: i64 = 60;

/// Envelope stored on disk for each collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers negative ages from clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            let remaining_mins = minutes % 60;
            if remaining_mins >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            let remaining_hours = (minutes % 1440) / 60;
            if remaining_hours >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > CACHE_STALE_MINUTES
    }
}

/// Per-collection store on the local filesystem.
///
/// Handles are cheap to clone and always passed explicitly; there is no
/// process-wide singleton.
#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    /// Open the store, creating its directory if missing.
    ///
    /// Idempotent: calling this repeatedly never disturbs existing
    /// collection files or their contents.
    pub fn open(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create content store at {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    /// Replace the full contents of a record type's collection.
    ///
    /// The new set is written to a sibling temp file and renamed over the
    /// old one; a concurrent reader observes either the old full set or the
    /// new full set, never a mix (within the filesystem's rename semantics).
    pub fn replace_all<T: ContentRecord>(&self, records: &[T]) -> Result<()> {
        self.save(T::COLLECTION, &records)
    }

    /// Read the full collection for a record type; empty if never cached.
    pub fn read_all<T: ContentRecord>(&self) -> Result<Vec<T>> {
        Ok(self
            .read_cached::<T>()?
            .map(|cached| cached.data)
            .unwrap_or_default())
    }

    /// Read the collection envelope, including when it was cached.
    pub fn read_cached<T: ContentRecord>(&self) -> Result<Option<CachedData<Vec<T>>>> {
        self.load(T::COLLECTION)
    }

    fn save<T: Serialize>(&self, collection: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let path = self.collection_path(collection);
        let tmp = self.dir.join(format!("{}.json.tmp", collection));

        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write cache file: {}", collection))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace cache file: {}", collection))?;
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, collection: &str) -> Result<Option<CachedData<T>>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", collection))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", collection))?;

        Ok(Some(cached))
    }

    // ===== Cache Age Information =====

    /// Age display for one collection, logging errors without failing.
    fn age_of<T: ContentRecord>(&self) -> Option<String> {
        match self.read_cached::<T>() {
            Ok(Some(cached)) => Some(cached.age_display()),
            Ok(None) => None,
            Err(e) => {
                debug!(collection = T::COLLECTION, error = %e, "Failed to read cache for age display");
                None
            }
        }
    }

    pub fn cache_ages(&self) -> CacheAges {
        CacheAges {
            pairs: self.age_of::<CardPairRecord>(),
            phrases: self.age_of::<PhraseRecord>(),
            wheel: self.age_of::<WheelItemRecord>(),
        }
    }

    /// Staleness for one collection, logging errors without failing.
    fn collection_stale<T: ContentRecord>(&self) -> bool {
        match self.read_cached::<T>() {
            Ok(Some(cached)) => cached.is_stale(),
            Ok(None) => true, // No cache = stale
            Err(e) => {
                debug!(collection = T::COLLECTION, error = %e, "Failed to read cache for staleness check");
                true // Error reading = treat as stale
            }
        }
    }

    /// Check if any of the game content collections is stale
    pub fn any_stale(&self) -> bool {
        self.collection_stale::<CardPairRecord>()
            || self.collection_stale::<PhraseRecord>()
            || self.collection_stale::<WheelItemRecord>()
    }
}

#[derive(Debug, Default)]
pub struct CacheAges {
    pub pairs: Option<String>,
    pub phrases: Option<String>,
    pub wheel: Option<String>,
}

impl CacheAges {
    /// Returns the most recent update time across all collections
    pub fn last_updated(&self) -> String {
        let ages = [&self.pairs, &self.phrases, &self.wheel];
        for age in ages.iter().copied().flatten() {
            return age.clone();
        }
        "never".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
