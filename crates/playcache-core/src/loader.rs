//! Fetch-with-fallback orchestration.
//!
//! Every game view loads its collection the same way: one remote attempt,
//! then the local store if the remote is unreachable. A successful fetch is
//! written back to the store in the background so the next offline session
//! has the latest content.

use std::future::Future;

use anyhow::Result;
use tracing::{debug, warn};

use crate::cache::ContentStore;
use crate::models::ContentRecord;

/// Outcome of loading one collection.
///
/// `Fresh(vec![])` is a legitimately empty collection and is not the same
/// as `Unavailable`, which means neither the remote service nor the local
/// store could produce the collection at all.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionData<T> {
    /// Records straight from the remote service.
    Fresh(Vec<T>),
    /// Last-known-good records from the local store.
    Cached(Vec<T>),
    /// Remote failed and nothing was ever cached.
    Unavailable,
}

impl<T> CollectionData<T> {
    pub fn records(&self) -> Option<&[T]> {
        match self {
            CollectionData::Fresh(records) | CollectionData::Cached(records) => Some(records),
            CollectionData::Unavailable => None,
        }
    }

    pub fn into_records(self) -> Option<Vec<T>> {
        match self {
            CollectionData::Fresh(records) | CollectionData::Cached(records) => Some(records),
            CollectionData::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, CollectionData::Unavailable)
    }

    pub fn source(&self) -> &'static str {
        match self {
            CollectionData::Fresh(_) => "online",
            CollectionData::Cached(_) => "local cache",
            CollectionData::Unavailable => "unavailable",
        }
    }
}

/// Load one collection, preferring freshness and degrading to staleness.
///
/// Exactly one remote attempt and, on failure, exactly one local read.
/// The write-back after a successful fetch runs as a detached task: it must
/// never delay or fail the already-successful result, so its errors are
/// logged and swallowed.
pub async fn load_collection<T, Fut>(store: &ContentStore, fetch: Fut) -> CollectionData<T>
where
    T: ContentRecord + Clone + Send + 'static,
    Fut: Future<Output = Result<Vec<T>>>,
{
    match fetch.await {
        Ok(records) => {
            debug!(
                collection = T::COLLECTION,
                count = records.len(),
                "Remote fetch succeeded"
            );
            let store = store.clone();
            let snapshot = records.clone();
            tokio::spawn(async move {
                if let Err(e) = store.replace_all(&snapshot) {
                    warn!(collection = T::COLLECTION, error = %e, "Failed to persist fetched records");
                }
            });
            CollectionData::Fresh(records)
        }
        Err(e) => {
            warn!(collection = T::COLLECTION, error = %e, "Remote fetch failed, trying local cache");
            match store.read_all::<T>() {
                Ok(records) if !records.is_empty() => {
                    debug!(
                        collection = T::COLLECTION,
                        count = records.len(),
                        "Serving records from local cache"
                    );
                    CollectionData::Cached(records)
                }
                Ok(_) => {
                    debug!(collection = T::COLLECTION, "No cached records");
                    CollectionData::Unavailable
                }
                Err(e) => {
                    warn!(collection = T::COLLECTION, error = %e, "Local cache unreadable");
                    CollectionData::Unavailable
                }
            }
        }
    }
}

/// Fetch one collection and persist it before returning.
///
/// This is the explicit, user-triggered refresh path: unlike
/// [`load_collection`] it surfaces both fetch and persistence errors, so
/// the user knows whether the cache now holds the latest content.
pub async fn refresh_collection<T, Fut>(store: &ContentStore, fetch: Fut) -> Result<Vec<T>>
where
    T: ContentRecord,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let records = fetch.await?;
    store.replace_all(&records)?;
    Ok(records)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CardPairRecord;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn temp_store(name: &str) -> (PathBuf, ContentStore) {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(1);
        let dir = std::env::temp_dir().join(format!("playcache-loader-test-{name}-{suffix}"));
        let store = ContentStore::open(dir.clone()).expect("open store");
        (dir, store)
    }

    fn sample_pairs() -> Vec<CardPairRecord> {
        vec![
            CardPairRecord {
                id: 1,
                text: "A".to_string(),
            },
            CardPairRecord {
                id: 2,
                text: "B".to_string(),
            },
        ]
    }

    /// The write-back is detached, so tests poll for it to land.
    async fn wait_for_persist(store: &ContentStore) -> Vec<CardPairRecord> {
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            if let Ok(records) = store.read_all::<CardPairRecord>() {
                if !records.is_empty() {
                    return records;
                }
            }
        }
        panic!("write-back never reached the store");
    }

    #[tokio::test]
    async fn test_successful_fetch_returns_fresh_records() {
        let (dir, store) = temp_store("fresh");
        let records = sample_pairs();

        let result = load_collection(&store, async { Ok(records.clone()) }).await;
        assert_eq!(result, CollectionData::Fresh(sample_pairs()));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_successful_fetch_is_persisted_in_background() {
        let (dir, store) = temp_store("persist");

        let result = load_collection(&store, async { Ok(sample_pairs()) }).await;
        assert!(!result.is_unavailable());

        let persisted = wait_for_persist(&store).await;
        assert_eq!(persisted, sample_pairs());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_cached_records() {
        let (dir, store) = temp_store("fallback");
        store.replace_all(&sample_pairs()).unwrap();

        let result: CollectionData<CardPairRecord> =
            load_collection(&store, async { Err(anyhow::anyhow!("connection refused")) }).await;
        assert_eq!(result, CollectionData::Cached(sample_pairs()));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_remote_failure_with_empty_cache_is_unavailable() {
        let (dir, store) = temp_store("unavailable");

        let result: CollectionData<CardPairRecord> =
            load_collection(&store, async { Err(anyhow::anyhow!("connection refused")) }).await;
        assert!(result.is_unavailable());
        assert_eq!(result.records(), None);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_empty_remote_collection_is_fresh_not_unavailable() {
        let (dir, store) = temp_store("empty-fresh");

        let result: CollectionData<CardPairRecord> =
            load_collection(&store, async { Ok(Vec::new()) }).await;
        assert_eq!(result, CollectionData::Fresh(Vec::new()));
        assert!(!result.is_unavailable());
        assert_eq!(result.records(), Some(&[][..]));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_persistence_failure_does_not_alter_result() {
        let (dir, store) = temp_store("persist-failure");
        // Remove the store directory so the background write-back fails
        std::fs::remove_dir_all(&dir).unwrap();

        let result = load_collection(&store, async { Ok(sample_pairs()) }).await;
        assert_eq!(result, CollectionData::Fresh(sample_pairs()));

        // Give the detached write-back a chance to run (and fail quietly)
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(result.records().map(|r| r.len()), Some(2));
    }

    #[tokio::test]
    async fn test_refresh_persists_before_returning() {
        let (dir, store) = temp_store("refresh");

        let records = refresh_collection(&store, async { Ok(sample_pairs()) })
            .await
            .expect("refresh");
        assert_eq!(records, sample_pairs());
        assert_eq!(store.read_all::<CardPairRecord>().unwrap(), sample_pairs());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_refresh_surfaces_fetch_errors() {
        let (dir, store) = temp_store("refresh-error");

        let result: Result<Vec<CardPairRecord>> =
            refresh_collection(&store, async { Err(anyhow::anyhow!("offline")) }).await;
        assert!(result.is_err());

        let _ = std::fs::remove_dir_all(dir);
    }
}
