//! Command-line arguments. Tuning flags can also come from the environment.

use clap::{Parser, Subcommand};
use chrono::Duration;
use news_aggregator::sources::search::DEFAULT_SITE;
use news_aggregator::AggregatorConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hong Kong drone news aggregator")]
pub struct Cli {
    /// Minutes an assembled article list stays fresh
    #[arg(long, env = "NEWS_CACHE_MINUTES", default_value_t = 30)]
    pub cache_minutes: i64,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "NEWS_TIMEOUT_SECONDS", default_value_t = 10)]
    pub timeout_seconds: u64,

    /// Maximum age in days of search results
    #[arg(long, env = "NEWS_SEARCH_WINDOW_DAYS", default_value_t = 3)]
    pub search_window_days: i64,

    /// Maximum age in days of RSS entries
    #[arg(long, env = "NEWS_FEED_WINDOW_DAYS", default_value_t = 7)]
    pub feed_window_days: i64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the aggregated article list as JSON
    Articles,
    /// Print the articles grouped by category as JSON
    Classified,
    /// Unfiltered keyword search
    Search {
        keyword: String,
        /// Restrict results to one site; pass an empty value to search everywhere
        #[arg(long, default_value = DEFAULT_SITE)]
        site: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

impl Cli {
    pub fn config(&self) -> AggregatorConfig {
        let mut config = AggregatorConfig {
            cache_freshness: Duration::minutes(self.cache_minutes),
            search_window_days: self.search_window_days,
            feed_window_days: self.feed_window_days,
            ..AggregatorConfig::default()
        };
        config.fetch.timeout_seconds = self.timeout_seconds;
        config
    }
}
