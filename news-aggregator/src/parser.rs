use crate::traits::DocumentParser;
use crate::types::{AggregatorError, ParsedEntry, ParsedFeed, Result};
use crate::utils::text::{collapse_whitespace, extract_text_from_html};
use chrono::Utc;
use feed_rs::parser;
use tracing::debug;

/// RSS/Atom parser backed by feed-rs.
#[derive(Debug, Clone, Default)]
pub struct FeedParser;

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_feed(&self, raw: &[u8]) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", raw.len());

        let feed = parser::parse(raw)
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let entries: Vec<ParsedEntry> = feed
            .entries
            .into_iter()
            .filter_map(Self::parse_entry)
            .collect();

        debug!("Parsed feed with {} entries", entries.len());

        Ok(ParsedFeed { title, entries })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> Option<ParsedEntry> {
        let url = entry.links.first()?.href.clone();
        let title = entry
            .title
            .map(|t| collapse_whitespace(&extract_text_from_html(&t.content)))
            .unwrap_or_default();

        let summary = entry
            .summary
            .map(|s| extract_text_from_html(&s.content))
            .filter(|s| !s.is_empty());

        let content = entry
            .content
            .and_then(|c| c.body)
            .map(|body| extract_text_from_html(&body))
            .filter(|s| !s.is_empty());

        // the declared publish time, falling back to the last update
        let published_at = entry
            .published
            .or(entry.updated)
            .map(|dt| dt.with_timezone(&Utc));

        Some(ParsedEntry {
            url,
            title,
            summary,
            content,
            published_at,
        })
    }
}

impl DocumentParser for FeedParser {
    type Document = ParsedFeed;

    fn parse(&self, raw: &[u8]) -> Result<ParsedFeed> {
        self.parse_feed(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <link>https://news.example.com</link>
    <description>Test</description>
    <item>
      <title>無人機 新法規</title>
      <link>https://news.example.com/1</link>
      <description>&lt;p&gt;民航處公布&lt;b&gt;新規定&lt;/b&gt;&lt;/p&gt;</description>
      <pubDate>Mon, 06 Jan 2025 08:00:00 GMT</pubDate>
    </item>
    <item>
      <title>No date</title>
      <link>https://news.example.com/2</link>
    </item>
    <item>
      <title>No link</title>
      <description>dropped</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_rss_entries() {
        let feed = FeedParser::new().parse(RSS.as_bytes()).unwrap();

        assert_eq!(feed.title.as_deref(), Some("Test Feed"));
        assert_eq!(feed.entries.len(), 2);

        let first = &feed.entries[0];
        assert_eq!(first.title, "無人機 新法規");
        assert_eq!(first.url, "https://news.example.com/1");
        assert_eq!(first.body(), "民航處公布新規定");
        assert!(first.published_at.is_some());

        assert!(feed.entries[1].published_at.is_none());
        assert_eq!(feed.entries[1].body(), "");
    }

    #[test]
    fn test_malformed_feed_is_parse_error() {
        let result = FeedParser::new().parse(b"<html><body>not a feed</body></html>");
        assert!(matches!(result, Err(AggregatorError::Parse(_))));
    }
}
