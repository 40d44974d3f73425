use crate::types::Article;
use std::collections::HashSet;
use tracing::{debug, info};

/// Drop articles whose url was already seen. The first occurrence wins, even if a later
/// duplicate carries more content, and the survivors keep their input order.
pub fn dedupe(articles: Vec<Article>) -> Vec<Article> {
    let total = articles.len();
    let mut seen_urls = HashSet::new();
    let mut unique = Vec::with_capacity(total);

    for article in articles {
        if seen_urls.insert(article.url.clone()) {
            unique.push(article);
        } else {
            debug!("Removing duplicate article: {} ({})", article.title, article.url);
        }
    }

    let removed = total - unique.len();
    if removed > 0 {
        info!("Removed {} duplicate articles", removed);
    }

    unique
}
