use crate::cache::ArticleCache;
use crate::classifier::Classifier;
use crate::dedup::dedupe;
use crate::fetcher::HttpFetcher;
use crate::filter::{filter, FilterOptions};
use crate::placeholder::placeholder_articles;
use crate::sources::{HtmlPageSource, StructuredSearchSource, SyndicationFeedSource};
use crate::topic::Topic;
use crate::traits::{Fetch, SourceAdapter};
use crate::types::{AggregatorConfig, Article, ClassifiedArticles, Result};
use chrono::{Duration, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Where an aggregation run is, or where its result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationState {
    Cached,
    Fetching,
    /// Trying the n-th source in the chain, counting from 1
    Fallback(usize),
    Mock,
    Ready,
}

impl fmt::Display for AggregationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationState::Cached => f.write_str("CACHED"),
            AggregationState::Fetching => f.write_str("FETCHING"),
            AggregationState::Fallback(n) => write!(f, "FALLBACK_{}", n),
            AggregationState::Mock => f.write_str("MOCK"),
            AggregationState::Ready => f.write_str("READY"),
        }
    }
}

/// Drives the sources in priority order behind a time-boxed cache.
pub struct NewsAggregator {
    adapters: Vec<Box<dyn SourceAdapter>>,
    topic: Topic,
    cache: ArticleCache,
    classifier: Classifier,
}

impl NewsAggregator {
    /// `adapters` are tried in the given order.
    pub fn new(adapters: Vec<Box<dyn SourceAdapter>>, topic: Topic, cache_freshness: Duration) -> Self {
        Self {
            adapters,
            classifier: Classifier::new(topic.clone()),
            topic,
            cache: ArticleCache::new(cache_freshness),
        }
    }

    /// Search, then outlet feeds, then outlet pages, all over one HTTP client.
    pub fn with_defaults(config: AggregatorConfig) -> Result<Self> {
        let fetcher: Arc<dyn Fetch> = Arc::new(HttpFetcher::new(config.fetch.clone())?);

        let adapters: Vec<Box<dyn SourceAdapter>> = vec![
            Box::new(StructuredSearchSource::new(fetcher.clone(), &config)),
            Box::new(SyndicationFeedSource::new(fetcher.clone(), &config)),
            Box::new(HtmlPageSource::new(fetcher, &config)),
        ];

        Ok(Self::new(adapters, Topic::hong_kong_drones(), config.cache_freshness))
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Current article list, numbered from 1. Never fails: with every source empty the
    /// built-in placeholders are served instead.
    pub async fn get_articles(&self) -> Vec<Article> {
        self.aggregate().await.0
    }

    /// Like [`get_articles`](Self::get_articles), also reporting where the list came from:
    /// `Cached`, `Fallback(n)` for the n-th source, or `Mock`.
    pub async fn aggregate(&self) -> (Vec<Article>, AggregationState) {
        let mut origin = AggregationState::Cached;
        let origin_slot = &mut origin;

        let (articles, cached) = self
            .cache
            .get_or_refresh(move || async move {
                let (articles, state) = self.run_chain().await;
                *origin_slot = state;
                assign_ids(dedupe(articles))
            })
            .await;

        if cached {
            info!(state = %AggregationState::Cached, count = articles.len(), "Serving cached articles");
        } else {
            info!(state = %AggregationState::Ready, origin = %origin, count = articles.len(), "Articles refreshed");
        }

        (articles, origin)
    }

    /// The current article list grouped by category. Reuses the cached list when fresh.
    pub async fn get_classified_articles(&self) -> ClassifiedArticles {
        self.classifier.classify_all(self.get_articles().await)
    }

    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }

    /// First non-empty relevant result wins; later sources are never called.
    async fn run_chain(&self) -> (Vec<Article>, AggregationState) {
        info!(state = %AggregationState::Fetching, sources = self.adapters.len(), "Refreshing articles");

        for (index, adapter) in self.adapters.iter().enumerate() {
            let state = AggregationState::Fallback(index + 1);
            info!(state = %state, source = %adapter.source_id(), "Trying {}", adapter.source_name());

            let pulled = match adapter.pull(&self.topic).await {
                Ok(articles) => articles,
                Err(e) => {
                    warn!(source = %adapter.source_id(), error = %e, "Source failed");
                    Vec::new()
                }
            };

            let report = filter(pulled, &self.topic, FilterOptions::relevance_only());
            if !report.kept.is_empty() {
                info!(source = %adapter.source_id(), count = report.kept.len(), "Source produced articles");
                return (report.kept, state);
            }
        }

        warn!(state = %AggregationState::Mock, "Every source came back empty, serving placeholders");
        (placeholder_articles(Utc::now()), AggregationState::Mock)
    }
}

fn assign_ids(articles: Vec<Article>) -> Vec<Article> {
    articles
        .into_iter()
        .zip(1..)
        .map(|(article, id)| article.with_id(id))
        .collect()
}
