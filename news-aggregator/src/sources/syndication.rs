use crate::filter::{filter, FilterOptions};
use crate::parser::FeedParser;
use crate::sources::fetch_bounded;
use crate::topic::Topic;
use crate::traits::{DocumentParser, Fetch, SourceAdapter};
use crate::types::{AggregatorConfig, Article, Result};
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// An outlet's syndication feed.
#[derive(Debug, Clone)]
pub struct FeedSpec {
    pub name: String,
    pub url: String,
}

impl FeedSpec {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Hong Kong outlets with public RSS.
    pub fn hong_kong_defaults() -> Vec<FeedSpec> {
        vec![
            FeedSpec::new("HK01", "https://www.hk01.com/rss/hongkong/latest"),
            FeedSpec::new("明報", "https://news.mingpao.com/rss/pns/s00010"),
            FeedSpec::new("SCMP", "https://www.scmp.com/rss/91/feed"),
            FeedSpec::new("RTHK", "https://news.rthk.hk/rthk/ch/rss/news_ch.xml"),
        ]
    }
}

/// Second source in the chain: a fixed list of outlet RSS feeds.
pub struct SyndicationFeedSource {
    fetcher: Arc<dyn Fetch>,
    parser: FeedParser,
    feeds: Vec<FeedSpec>,
    entry_cap: usize,
    window_days: i64,
    call_timeout: Duration,
}

impl SyndicationFeedSource {
    pub fn new(fetcher: Arc<dyn Fetch>, config: &AggregatorConfig) -> Self {
        Self::with_feeds(fetcher, FeedSpec::hong_kong_defaults(), config)
    }

    pub fn with_feeds(fetcher: Arc<dyn Fetch>, feeds: Vec<FeedSpec>, config: &AggregatorConfig) -> Self {
        Self {
            fetcher,
            parser: FeedParser::new(),
            feeds,
            entry_cap: config.feed_entry_cap,
            window_days: config.feed_window_days,
            call_timeout: config.fetch.call_timeout(),
        }
    }

    pub fn feeds(&self) -> &[FeedSpec] {
        &self.feeds
    }

    /// The first `entry_cap` entries of one feed as articles, unfiltered.
    pub async fn fetch_feed(&self, feed: &FeedSpec) -> Result<Vec<Article>> {
        let fetched_at = Utc::now();
        let raw = fetch_bounded(self.fetcher.as_ref(), &feed.url, self.call_timeout).await?;
        let parsed = self.parser.parse(&raw)?;

        Ok(parsed
            .entries
            .into_iter()
            .take(self.entry_cap)
            .filter(|entry| !entry.title.is_empty())
            .map(|entry| {
                let content = entry.body();
                Article::new(
                    entry.title,
                    content,
                    feed.name.clone(),
                    entry.published_at.unwrap_or(fetched_at),
                    entry.url,
                )
            })
            .collect())
    }

    async fn feed_articles(&self, feed: &FeedSpec) -> Vec<Article> {
        match self.fetch_feed(feed).await {
            Ok(articles) => {
                info!("Fetched {} entries from {} RSS feed", articles.len(), feed.name);
                articles
            }
            Err(e) => {
                error!("Failed to fetch {} RSS feed ({}): {}", feed.name, feed.url, e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl SourceAdapter for SyndicationFeedSource {
    fn source_id(&self) -> String {
        "rss".to_string()
    }

    fn source_name(&self) -> String {
        "RSS feeds".to_string()
    }

    async fn pull(&self, topic: &Topic) -> Result<Vec<Article>> {
        info!("Pulling {} RSS feeds", self.feeds.len());

        let per_feed = join_all(self.feeds.iter().map(|feed| self.feed_articles(feed))).await;
        let candidates: Vec<Article> = per_feed.into_iter().flatten().collect();

        let report = filter(candidates, topic, FilterOptions::recent_within(self.window_days));
        info!(
            kept = report.kept.len(),
            stale = report.dropped_stale,
            irrelevant = report.dropped_irrelevant,
            "RSS entries filtered"
        );

        Ok(report.kept)
    }
}
