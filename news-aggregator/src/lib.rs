pub mod types;
pub mod traits;
pub mod topic;
pub mod fetcher;
pub mod parser;
pub mod html;
pub mod filter;
pub mod dedup;
pub mod classifier;
pub mod cache;
pub mod placeholder;
pub mod sources;
pub mod aggregator;
pub mod utils;

pub use types::*;
pub use traits::{DocumentParser, Fetch, SourceAdapter};
pub use topic::Topic;
pub use fetcher::HttpFetcher;
pub use parser::FeedParser;
pub use html::{PageParser, SelectorProfile};
pub use filter::{filter, FilterOptions, FilterReport};
pub use dedup::dedupe;
pub use classifier::Classifier;
pub use cache::ArticleCache;
pub use placeholder::placeholder_articles;
pub use aggregator::{AggregationState, NewsAggregator};
