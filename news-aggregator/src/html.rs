//! Listing-page extraction for outlets that only publish HTML search pages.
//!
//! Each outlet gets a [`SelectorProfile`]: a container selector matching one teaser per
//! story, plus title, summary and link selectors evaluated inside that container. Outlets
//! without a known layout use [`SelectorProfile::generic`].

use crate::traits::DocumentParser;
use crate::types::{AggregatorError, PageHit, Result};
use crate::utils::text::collapse_whitespace;
use crate::utils::url::resolve;
use scraper::{ElementRef, Html, Selector};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorProfile {
    pub container: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub link: &'static str,
}

impl SelectorProfile {
    /// Common article/heading/summary tags.
    pub fn generic() -> Self {
        Self {
            container: "article, .news-item, .story",
            title: "h1, h2, h3, h4, .title",
            summary: "p, .summary, .description",
            link: "a[href]",
        }
    }

    pub fn hk01() -> Self {
        Self {
            container: ".search-result-item, .article-card",
            title: "h3, h4, .title",
            summary: ".description, .summary",
            link: "a[href]",
        }
    }

    pub fn wenweipo() -> Self {
        Self {
            container: ".news-item, .article-item, article",
            title: "h3, h4, .title",
            summary: ".summary, .content, p",
            link: "a[href]",
        }
    }

    /// Outlet-specific profile when the host is known, generic otherwise.
    pub fn for_url(url: &str) -> Self {
        if url.contains("hk01.com") {
            Self::hk01()
        } else if url.contains("wenweipo.com") {
            Self::wenweipo()
        } else {
            Self::generic()
        }
    }
}

struct CompiledProfile {
    container: Selector,
    title: Selector,
    summary: Selector,
    link: Selector,
}

impl CompiledProfile {
    fn compile(profile: &SelectorProfile) -> Result<Self> {
        Ok(Self {
            container: compile(profile.container)?,
            title: compile(profile.title)?,
            summary: compile(profile.summary)?,
            link: compile(profile.link)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| AggregatorError::Parse(format!("Invalid selector {:?}: {}", selector, e)))
}

fn first_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// Parses one outlet's listing page into [`PageHit`]s with absolute links.
pub struct PageParser {
    base: Url,
    profile: SelectorProfile,
}

impl PageParser {
    pub fn new(base: Url, profile: SelectorProfile) -> Self {
        Self { base, profile }
    }

    /// Parser for a page URL, resolving links against its scheme://host.
    pub fn for_page(page_url: &str) -> Result<Self> {
        let mut base = Url::parse(page_url)?;
        base.set_path("/");
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self::new(base, SelectorProfile::for_url(page_url)))
    }

    pub fn profile(&self) -> &SelectorProfile {
        &self.profile
    }

    /// Hits missing a title, a summary or a link are skipped.
    pub fn parse_page(&self, html: &str) -> Result<Vec<PageHit>> {
        let selectors = CompiledProfile::compile(&self.profile)?;
        let document = Html::parse_document(html);

        let hits = document
            .select(&selectors.container)
            .filter_map(|item| {
                let title = first_text(&item, &selectors.title);
                let content = first_text(&item, &selectors.summary);
                let link = item
                    .select(&selectors.link)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .and_then(|href| resolve(&self.base, href))?;

                if title.is_empty() || content.is_empty() {
                    return None;
                }

                Some(PageHit { title, content, link })
            })
            .collect();

        Ok(hits)
    }
}

impl DocumentParser for PageParser {
    type Document = Vec<PageHit>;

    fn parse(&self, raw: &[u8]) -> Result<Vec<PageHit>> {
        self.parse_page(&String::from_utf8_lossy(raw))
    }
}
