use crate::types::Article;
use chrono::{DateTime, Duration, Utc};
use std::future::Future;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub articles: Vec<Article>,
    pub produced_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            produced_at: Utc::now(),
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.produced_at
    }

    pub fn is_fresh(&self, freshness: Duration, now: DateTime<Utc>) -> bool {
        self.age(now) < freshness
    }
}

/// Single-slot, time-boxed store for the last assembled article list.
///
/// The slot is replaced wholesale. Refreshes run under the lock, so at most one
/// refresh is in flight and concurrent readers wait for its result.
pub struct ArticleCache {
    freshness: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl ArticleCache {
    pub fn new(freshness: Duration) -> Self {
        Self {
            freshness,
            entry: Mutex::new(None),
        }
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// The current entry if it is still fresh. Expired entries are dropped.
    pub async fn snapshot(&self) -> Option<Vec<Article>> {
        let mut slot = self.entry.lock().await;
        Self::fresh_articles(&mut slot, self.freshness)
    }

    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }

    /// Serve the fresh entry, or run `refresh` and store its output.
    ///
    /// Returns the articles and whether they came from the cache.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> (Vec<Article>, bool)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<Article>>,
    {
        let mut slot = self.entry.lock().await;
        if let Some(articles) = Self::fresh_articles(&mut slot, self.freshness) {
            return (articles, true);
        }

        let articles = refresh().await;
        *slot = Some(CacheEntry::new(articles.clone()));
        debug!("Cache replaced with {} articles", articles.len());
        (articles, false)
    }

    fn fresh_articles(slot: &mut Option<CacheEntry>, freshness: Duration) -> Option<Vec<Article>> {
        match slot {
            Some(entry) if entry.is_fresh(freshness, Utc::now()) => Some(entry.articles.clone()),
            Some(entry) => {
                debug!("Discarding cache entry produced at {}", entry.produced_at);
                *slot = None;
                None
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn article(url: &str) -> Article {
        Article::new("t", "c", "s", Utc::now(), url)
    }

    #[tokio::test]
    async fn test_fresh_entry_is_served() {
        let cache = ArticleCache::new(Duration::minutes(30));
        let (first, cached) = cache.get_or_refresh(|| async { vec![article("https://a")] }).await;
        assert!(!cached);

        let (second, cached) = cache.get_or_refresh(|| async { vec![article("https://b")] }).await;
        assert!(cached);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_expired_entry_is_discarded() {
        let cache = ArticleCache::new(Duration::zero());
        cache.get_or_refresh(|| async { vec![article("https://a")] }).await;

        assert!(cache.snapshot().await.is_none());
        let (articles, cached) = cache.get_or_refresh(|| async { vec![article("https://b")] }).await;
        assert!(!cached);
        assert_eq!(articles[0].url, "https://b");
    }

    #[tokio::test]
    async fn test_invalidate() {
        let cache = ArticleCache::new(Duration::minutes(30));
        cache.get_or_refresh(|| async { vec![article("https://a")] }).await;
        cache.invalidate().await;
        assert!(cache.snapshot().await.is_none());
    }

    #[test]
    fn test_entry_freshness_boundary() {
        let entry = CacheEntry::new(Vec::new());
        let later = entry.produced_at + Duration::minutes(30);
        assert!(entry.is_fresh(Duration::minutes(30), entry.produced_at));
        assert!(!entry.is_fresh(Duration::minutes(30), later));
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_refresh() {
        let cache = Arc::new(ArticleCache::new(Duration::minutes(30)));
        let refreshes = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let refreshes = refreshes.clone();
                tokio::spawn(async move {
                    cache
                        .get_or_refresh(|| async move {
                            refreshes.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                            vec![article("https://a")]
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            let (articles, _) = task.await.unwrap();
            assert_eq!(articles.len(), 1);
        }
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }
}
