use crate::filter::{filter, FilterOptions};
use crate::parser::FeedParser;
use crate::sources::fetch_bounded;
use crate::topic::Topic;
use crate::traits::{DocumentParser, Fetch, SourceAdapter};
use crate::types::{AggregatorConfig, Article, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};
use url::Url;

pub const GOOGLE_NEWS_SEARCH: &str = "https://news.google.com/rss/search";
const DEFAULT_SOURCE_NAME: &str = "Google News";
/// Site restriction used by keyword searches unless the caller picks another.
pub const DEFAULT_SITE: &str = "hk";

/// Commercial and non-news terms; a hit whose title or link contains one is dropped.
const EXCLUDE_KEYWORDS: &[&str] = &[
    "buy", "purchase", "shop", "price", "sale", "product", "course", "training",
    "insurance", "testimonial", "corporation limited", "poi corporation", "dji avata 2",
    "esua -", "course -", "購買", "課程", "保險", "價格",
];

/// Tokens of known outlets and generic news words; a hit must mention one.
const NEWS_KEYWORDS: &[&str] = &[
    "news", "hk01", "mingpao", "scmp", "rthk", "tvb", "singtao", "oriental", "bastille",
    "inmedia", "新聞", "報", "傳媒", "post", "times", "gazette",
];

/// One result from the search endpoint.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Full title as served, outlet suffix included
    pub raw_title: String,
    pub title: String,
    pub link: String,
    pub description: String,
    pub source_name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl SearchHit {
    /// Google News titles read "Headline - Outlet".
    fn from_title(raw_title: String, link: String, description: String, published_at: Option<DateTime<Utc>>) -> Self {
        let (title, source_name) = match raw_title.rsplit_once(" - ") {
            Some((headline, outlet)) if !headline.trim().is_empty() && !outlet.trim().is_empty() => {
                (headline.trim().to_string(), Some(outlet.trim().to_string()))
            }
            _ => (raw_title.clone(), None),
        };

        Self {
            raw_title,
            title,
            link,
            description,
            source_name,
            published_at,
        }
    }

    /// Exclusion list first, then the news-outlet heuristic.
    pub fn looks_like_news(&self) -> bool {
        let title = self.raw_title.to_lowercase();
        let link = self.link.to_lowercase();

        let excluded = EXCLUDE_KEYWORDS
            .iter()
            .any(|keyword| title.contains(keyword) || link.contains(keyword));
        if excluded {
            return false;
        }

        let from_news_outlet = NEWS_KEYWORDS
            .iter()
            .any(|keyword| link.contains(keyword) || title.contains(keyword));
        let declared_news = self
            .source_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains("news"));

        from_news_outlet || declared_news
    }

    pub fn into_article(self, fetched_at: DateTime<Utc>) -> Article {
        Article::new(
            self.title,
            self.description,
            self.source_name.unwrap_or_else(|| DEFAULT_SOURCE_NAME.to_string()),
            self.published_at.unwrap_or(fetched_at),
            self.link,
        )
    }
}

/// Highest-priority source: query variants against a news search feed.
pub struct StructuredSearchSource {
    fetcher: Arc<dyn Fetch>,
    parser: FeedParser,
    endpoint: String,
    result_limit: usize,
    window_days: i64,
    call_timeout: Duration,
}

impl StructuredSearchSource {
    pub fn new(fetcher: Arc<dyn Fetch>, config: &AggregatorConfig) -> Self {
        Self {
            fetcher,
            parser: FeedParser::new(),
            endpoint: GOOGLE_NEWS_SEARCH.to_string(),
            result_limit: config.search_result_limit,
            window_days: config.search_window_days,
            call_timeout: config.fetch.call_timeout(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn query_url(&self, query: &str) -> Result<Url> {
        Ok(Url::parse_with_params(
            &self.endpoint,
            &[("q", query), ("hl", "zh-HK"), ("gl", "HK"), ("ceid", "HK:zh-Hant")],
        )?)
    }

    /// Raw hits for one query, at most `limit` of them. Untitled entries are dropped.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let url = self.query_url(query)?;
        let raw = fetch_bounded(self.fetcher.as_ref(), url.as_str(), self.call_timeout).await?;
        let feed = self.parser.parse(&raw)?;

        Ok(feed
            .entries
            .into_iter()
            .take(limit)
            .map(|entry| {
                let description = entry.body();
                SearchHit::from_title(entry.title, entry.url, description, entry.published_at)
            })
            .filter(|hit| !hit.title.trim().is_empty())
            .collect())
    }

    /// News-looking hits for one query variant. Failures are logged and yield nothing.
    #[instrument(level = "debug", skip(self))]
    async fn query_articles(&self, query: &str) -> Vec<Article> {
        let fetched_at = Utc::now();
        match self.search(query, self.result_limit).await {
            Ok(hits) => {
                let total = hits.len();
                let articles: Vec<Article> = hits
                    .into_iter()
                    .filter(SearchHit::looks_like_news)
                    .map(|hit| hit.into_article(fetched_at))
                    .collect();
                info!(query, total, kept = articles.len(), "Search query finished");
                articles
            }
            Err(e) => {
                error!(query, error = %e, "Search query failed");
                Vec::new()
            }
        }
    }

    /// Site-restricted keyword search tried when every query variant came back empty.
    async fn retry_articles(&self, keyword: &str) -> Vec<Article> {
        let query = site_query(keyword, Some(DEFAULT_SITE));
        let fetched_at = Utc::now();
        match self.search(&query, self.result_limit).await {
            Ok(hits) => {
                info!(query = %query, total = hits.len(), "Retry search finished");
                hits.into_iter().map(|hit| hit.into_article(fetched_at)).collect()
            }
            Err(e) => {
                error!(query = %query, error = %e, "Retry search failed");
                Vec::new()
            }
        }
    }

    /// Unfiltered keyword search, optionally restricted to one site, numbered from 1.
    pub async fn search_news(&self, keyword: &str, site: Option<&str>, limit: usize) -> Vec<Article> {
        let query = site_query(keyword, site);

        let fetched_at = Utc::now();
        match self.search(&query, limit).await {
            Ok(hits) => hits
                .into_iter()
                .zip(1..)
                .map(|(hit, id)| hit.into_article(fetched_at).with_id(id))
                .collect(),
            Err(e) => {
                error!(query = %query, error = %e, "Keyword search failed");
                Vec::new()
            }
        }
    }
}

fn site_query(keyword: &str, site: Option<&str>) -> String {
    match site {
        Some(site) if !site.is_empty() => format!("{} site:{}", keyword, site),
        _ => keyword.to_string(),
    }
}

#[async_trait]
impl SourceAdapter for StructuredSearchSource {
    fn source_id(&self) -> String {
        "search".to_string()
    }

    fn source_name(&self) -> String {
        DEFAULT_SOURCE_NAME.to_string()
    }

    async fn pull(&self, topic: &Topic) -> Result<Vec<Article>> {
        info!("Searching {} query variants for {}", topic.search_queries.len(), topic.name);

        // join_all keeps declaration order regardless of completion order
        let per_query = join_all(topic.search_queries.iter().map(|q| self.query_articles(q))).await;
        let candidates: Vec<Article> = per_query.into_iter().flatten().collect();

        let mut report = filter(candidates, topic, FilterOptions::recent_within(self.window_days));
        if report.kept.is_empty() {
            if let Some(keyword) = &topic.retry_query {
                let retried = self.retry_articles(keyword).await;
                report = filter(retried, topic, FilterOptions::recent_within(self.window_days));
            }
        }
        info!(
            kept = report.kept.len(),
            stale = report.dropped_stale,
            irrelevant = report.dropped_irrelevant,
            "Search results filtered"
        );

        Ok(report.kept)
    }
}
