pub mod html_page;
pub mod search;
pub mod syndication;

pub use html_page::{HtmlPageSource, Outlet};
pub use search::{SearchHit, StructuredSearchSource};
pub use syndication::{FeedSpec, SyndicationFeedSource};

use crate::traits::Fetch;
use crate::types::{AggregatorError, Result};
use std::time::Duration;

/// Fetch through the capability, giving up after `limit`.
pub(crate) async fn fetch_bounded(fetcher: &dyn Fetch, url: &str, limit: Duration) -> Result<Vec<u8>> {
    match tokio::time::timeout(limit, fetcher.fetch(url)).await {
        Ok(result) => result,
        Err(_) => Err(AggregatorError::Timeout {
            url: url.to_string(),
            seconds: limit.as_secs(),
        }),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::traits::Fetch;
    use crate::types::{AggregatorError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves canned bodies by url substring; anything else is a 404.
    /// The first matching route wins, and a route may answer after a delay.
    #[derive(Default)]
    pub struct StaticFetch {
        routes: Vec<(String, Vec<u8>, Duration)>,
        pub requested: Mutex<Vec<String>>,
    }

    impl StaticFetch {
        pub fn route(self, fragment: &str, body: &str) -> Self {
            self.slow_route(fragment, body, Duration::ZERO)
        }

        pub fn slow_route(mut self, fragment: &str, body: &str, delay: Duration) -> Self {
            self.routes.push((fragment.to_string(), body.as_bytes().to_vec(), delay));
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetch for StaticFetch {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.requested.lock().unwrap().push(url.to_string());
            for (fragment, body, delay) in &self.routes {
                if url.contains(fragment.as_str()) {
                    if !delay.is_zero() {
                        tokio::time::sleep(*delay).await;
                    }
                    return Ok(body.clone());
                }
            }
            Err(AggregatorError::Status { url: url.to_string(), status: 404 })
        }
    }

    /// Never answers; exercises the call timeout.
    pub struct HangingFetch;

    #[async_trait]
    impl Fetch for HangingFetch {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            std::future::pending::<Result<Vec<u8>>>().await
        }
    }

    /// Minimal RSS 2.0 document; items are (title, link, description, pubDate).
    pub fn rss(items: &[(&str, &str, &str, Option<String>)]) -> String {
        let mut body = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Fixture</title><link>https://fixture.example.com</link><description>fixture</description>"#,
        );
        for (title, link, description, pub_date) in items {
            body.push_str("<item>");
            body.push_str(&format!("<title>{}</title><link>{}</link>", title, link));
            body.push_str(&format!("<description>{}</description>", description));
            if let Some(pub_date) = pub_date {
                body.push_str(&format!("<pubDate>{}</pubDate>", pub_date));
            }
            body.push_str("</item>");
        }
        body.push_str("</channel></rss>");
        body
    }
}
