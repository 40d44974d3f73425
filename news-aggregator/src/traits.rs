use crate::topic::Topic;
use crate::types::{Article, Result};
use async_trait::async_trait;

/// A source of articles in the fallback chain (search, syndication feeds, HTML pages).
///
/// Implementations absorb their own transport and parse failures and return whatever
/// survived; an `Err` is still tolerated by the aggregator and treated as empty.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Stable identifier used in logs
    fn source_id(&self) -> String;

    /// Human-readable name for this source
    fn source_name(&self) -> String;

    /// Fetch relevant, recent articles for the topic
    async fn pull(&self, topic: &Topic) -> Result<Vec<Article>>;
}

/// Raw transport: url in, bytes out.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Turns raw bytes from one kind of source into a structured document.
pub trait DocumentParser: Send + Sync {
    type Document;

    fn parse(&self, raw: &[u8]) -> Result<Self::Document>;
}
