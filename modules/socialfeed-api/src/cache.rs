use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use socialfeed_common::{FeedError, FeedPage, Platform};

use crate::feed::FeedSource;

const CACHE_TTL: Duration = Duration::from_secs(300);
const MAX_CACHE_ENTRIES: usize = 500;

#[derive(Debug, Clone)]
struct CacheEntry {
    page: FeedPage,
    inserted_at: Instant,
}

/// Process-wide response cache. Entries expire a fixed TTL after insertion
/// (not access) and are evicted opportunistically once the map hits its cap.
pub struct FeedCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl FeedCache {
    pub fn new() -> Self {
        Self::with_ttl(CACHE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn get(&self, key: &str) -> Option<FeedPage> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.inserted_at.elapsed() < self.ttl {
            Some(entry.page.clone())
        } else {
            None
        }
    }

    pub async fn insert(&self, key: String, page: FeedPage) {
        let mut entries = self.entries.write().await;
        // Opportunistic eviction when we hit the limit
        if entries.len() >= MAX_CACHE_ENTRIES {
            let now = Instant::now();
            entries.retain(|_, v| now.duration_since(v.inserted_at) < self.ttl);
        }
        entries.insert(
            key,
            CacheEntry {
                page,
                inserted_at: Instant::now(),
            },
        );
    }
}

impl Default for FeedCache {
    fn default() -> Self {
        Self::new()
    }
}

/// The canonical cache key for a request: platform plus cursor, in query
/// form, so distinct cursors cache independently.
pub fn cache_key(platform: Platform, cursor: &str) -> String {
    format!("platform={}&page={}", platform, cursor)
}

/// Read-through wrapper around any `FeedSource`. A hit returns the stored
/// page unchanged; a miss calls through and stores the result.
///
/// No single-flight: the lock is not held across the upstream call, so
/// concurrent misses on one key may each call upstream and both write
/// (last write wins).
pub struct CachedFeed<S> {
    cache: FeedCache,
    source: S,
}

impl<S: FeedSource> CachedFeed<S> {
    pub fn new(cache: FeedCache, source: S) -> Self {
        Self { cache, source }
    }
}

#[async_trait]
impl<S: FeedSource> FeedSource for CachedFeed<S> {
    async fn fetch(&self, platform: Platform, cursor: &str) -> Result<FeedPage, FeedError> {
        let key = cache_key(platform, cursor);
        if let Some(page) = self.cache.get(&key).await {
            debug!(%platform, key, "Feed cache hit");
            return Ok(page);
        }

        let page = self.source.fetch(platform, cursor).await?;
        self.cache.insert(key, page.clone()).await;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use socialfeed_common::Post;

    // --- Mocks ---

    /// Counts fetches and returns a fixed page.
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FeedSource for &CountingSource {
        async fn fetch(&self, _platform: Platform, cursor: &str) -> Result<FeedPage, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(FeedPage {
                posts: vec![Post::new(format!("https://example.com/{cursor}"))],
                next_page_token: Some("next".to_string()),
            })
        }
    }

    /// Always fails; used to prove errors are not cached.
    struct FailingSource;

    #[async_trait]
    impl FeedSource for FailingSource {
        async fn fetch(&self, _platform: Platform, _cursor: &str) -> Result<FeedPage, FeedError> {
            Err(FeedError::Upstream("boom".to_string()))
        }
    }

    // --- Tests ---

    #[test]
    fn cache_key_is_canonical_per_platform_and_cursor() {
        assert_eq!(cache_key(Platform::Twitter, ""), "platform=twitter&page=");
        assert_eq!(
            cache_key(Platform::Youtube, "tok"),
            "platform=youtube&page=tok"
        );
        assert_ne!(
            cache_key(Platform::Twitter, "tok"),
            cache_key(Platform::Instagram, "tok")
        );
    }

    #[tokio::test]
    async fn second_fetch_within_ttl_hits_cache() {
        let source = CountingSource::new();
        let cached = CachedFeed::new(FeedCache::new(), &source);

        let first = cached.fetch(Platform::Twitter, "abc").await.unwrap();
        let second = cached.fetch(Platform::Twitter, "abc").await.unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn distinct_cursors_cache_independently() {
        let source = CountingSource::new();
        let cached = CachedFeed::new(FeedCache::new(), &source);

        cached.fetch(Platform::Twitter, "").await.unwrap();
        cached.fetch(Platform::Twitter, "abc").await.unwrap();
        cached.fetch(Platform::Youtube, "abc").await.unwrap();

        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn expired_entry_triggers_exactly_one_new_call() {
        let source = CountingSource::new();
        let cached = CachedFeed::new(FeedCache::with_ttl(Duration::from_millis(20)), &source);

        cached.fetch(Platform::Twitter, "").await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        cached.fetch(Platform::Twitter, "").await.unwrap();
        cached.fetch(Platform::Twitter, "").await.unwrap();

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cached = CachedFeed::new(FeedCache::new(), FailingSource);

        assert!(cached.fetch(Platform::Twitter, "").await.is_err());
        assert!(cached.fetch(Platform::Twitter, "").await.is_err());

        let key = cache_key(Platform::Twitter, "");
        assert!(cached.cache.get(&key).await.is_none());
    }
}
