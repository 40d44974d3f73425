use crate::html::PageParser;
use crate::sources::fetch_bounded;
use crate::topic::Topic;
use crate::traits::{DocumentParser, Fetch, SourceAdapter};
use crate::types::{AggregatorConfig, Article, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// An outlet's search listing page.
#[derive(Debug, Clone)]
pub struct Outlet {
    pub name: String,
    pub url: String,
}

impl Outlet {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn hong_kong_defaults() -> Vec<Outlet> {
        vec![
            Outlet::new("HK01", "https://www.hk01.com/search/%E7%84%A1%E4%BA%BA%E6%A9%9F"),
            Outlet::new("明報", "https://news.mingpao.com/search/%E7%84%A1%E4%BA%BA%E6%A9%9F"),
            Outlet::new("文匯報", "https://www.wenweipo.com/s/%E7%84%A1%E4%BA%BA%E6%A9%9F"),
        ]
    }
}

/// Last source in the chain: scrapes outlet search pages.
///
/// Pages rarely carry a usable timestamp, so every hit is stamped with the fetch time.
/// No relevance filtering happens here.
pub struct HtmlPageSource {
    fetcher: Arc<dyn Fetch>,
    outlets: Vec<Outlet>,
    call_timeout: Duration,
}

impl HtmlPageSource {
    pub fn new(fetcher: Arc<dyn Fetch>, config: &AggregatorConfig) -> Self {
        Self::with_outlets(fetcher, Outlet::hong_kong_defaults(), config)
    }

    pub fn with_outlets(fetcher: Arc<dyn Fetch>, outlets: Vec<Outlet>, config: &AggregatorConfig) -> Self {
        Self {
            fetcher,
            outlets,
            call_timeout: config.fetch.call_timeout(),
        }
    }

    pub fn outlets(&self) -> &[Outlet] {
        &self.outlets
    }

    pub async fn scrape_page(&self, outlet: &Outlet) -> Result<Vec<Article>> {
        let parser = PageParser::for_page(&outlet.url)?;
        let fetched_at = Utc::now();
        let raw = fetch_bounded(self.fetcher.as_ref(), &outlet.url, self.call_timeout).await?;
        let hits = parser.parse(&raw)?;

        Ok(hits
            .into_iter()
            .map(|hit| Article::new(hit.title, hit.content, outlet.name.clone(), fetched_at, hit.link))
            .collect())
    }
}

#[async_trait]
impl SourceAdapter for HtmlPageSource {
    fn source_id(&self) -> String {
        "html".to_string()
    }

    fn source_name(&self) -> String {
        "Outlet pages".to_string()
    }

    async fn pull(&self, _topic: &Topic) -> Result<Vec<Article>> {
        let mut articles = Vec::new();

        for outlet in &self.outlets {
            match self.scrape_page(outlet).await {
                Ok(found) if found.is_empty() => {
                    warn!("No items matched on {} ({})", outlet.name, outlet.url);
                }
                Ok(found) => {
                    info!("Scraped {} items from {}", found.len(), outlet.name);
                    articles.extend(found);
                }
                Err(e) => error!("Failed to scrape {} ({}): {}", outlet.name, outlet.url, e),
            }
        }

        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testing::StaticFetch;

    const LISTING: &str = r#"
        <html><body>
          <article>
            <h2>無人機表演</h2>
            <p>維港夜空</p>
            <a href="/article/1">read</a>
          </article>
          <article>
            <h2>Stock market</h2>
            <p>Not about the topic</p>
            <a href="/article/2">read</a>
          </article>
        </body></html>
    "#;

    #[tokio::test]
    async fn test_scrape_page_resolves_links_and_stamps_fetch_time() {
        let before = Utc::now();
        let fetcher = Arc::new(StaticFetch::default().route("news.example.com", LISTING));
        let outlet = Outlet::new("Example", "https://news.example.com/search/drone");
        let source = HtmlPageSource::with_outlets(fetcher, vec![outlet.clone()], &AggregatorConfig::default());

        let articles = source.scrape_page(&outlet).await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].url, "https://news.example.com/article/1");
        assert_eq!(articles[0].source, "Example");
        assert!(articles.iter().all(|a| a.published_at >= before));
    }

    #[tokio::test]
    async fn test_pull_keeps_irrelevant_hits_and_skips_failures() {
        let fetcher = Arc::new(StaticFetch::default().route("good.example.com", LISTING));
        let outlets = vec![
            Outlet::new("Down", "https://down.example.com/search"),
            Outlet::new("Good", "https://good.example.com/search"),
        ];
        let source = HtmlPageSource::with_outlets(fetcher.clone(), outlets, &AggregatorConfig::default());

        let articles = source.pull(&Topic::hong_kong_drones()).await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].title, "Stock market");
        assert_eq!(fetcher.requested().len(), 2);
    }

    #[test]
    fn test_default_outlets() {
        let outlets = Outlet::hong_kong_defaults();
        assert_eq!(outlets.len(), 3);
        assert_eq!(outlets[2].name, "文匯報");
    }
}
