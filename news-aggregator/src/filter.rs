use crate::topic::Topic;
use crate::types::Article;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Which tests an article must pass.
#[derive(Debug, Clone, Copy)]
pub struct FilterOptions {
    /// Maximum article age in days; `None` skips the recency test.
    pub window_days: Option<i64>,
    pub now: DateTime<Utc>,
}

impl FilterOptions {
    pub fn recent_within(window_days: i64) -> Self {
        Self {
            window_days: Some(window_days),
            now: Utc::now(),
        }
    }

    /// Relevance only, as the aggregator applies it over every adapter's output.
    pub fn relevance_only() -> Self {
        Self {
            window_days: None,
            now: Utc::now(),
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    fn cutoff(&self) -> Option<DateTime<Utc>> {
        self.window_days.map(|days| self.now - Duration::days(days))
    }
}

/// Articles kept by a filter pass plus counts of what was dropped and why.
#[derive(Debug, Default)]
pub struct FilterReport {
    pub kept: Vec<Article>,
    pub dropped_irrelevant: usize,
    pub dropped_stale: usize,
}

/// Keep articles that mention the topic and are not older than the window.
/// Input order is preserved.
pub fn filter(articles: Vec<Article>, topic: &Topic, options: FilterOptions) -> FilterReport {
    let cutoff = options.cutoff();
    let mut report = FilterReport::default();

    for article in articles {
        if !topic.is_relevant(&article.full_text()) {
            report.dropped_irrelevant += 1;
            continue;
        }

        if let Some(cutoff) = cutoff {
            if article.published_at < cutoff {
                debug!(
                    title = %article.title,
                    published_at = %article.published_at,
                    %cutoff,
                    "Dropping stale article"
                );
                report.dropped_stale += 1;
                continue;
            }
        }

        report.kept.push(article);
    }

    if report.dropped_irrelevant > 0 || report.dropped_stale > 0 {
        debug!(
            kept = report.kept.len(),
            irrelevant = report.dropped_irrelevant,
            stale = report.dropped_stale,
            "Filter pass finished"
        );
    }

    report
}
