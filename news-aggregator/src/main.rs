mod cli;

use clap::Parser;
use cli::{Cli, Command};
use news_aggregator::sources::StructuredSearchSource;
use news_aggregator::{HttpFetcher, NewsAggregator};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the JSON, logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    info!("Starting news aggregator ({:?})", cli.command);

    let output = match &cli.command {
        Command::Articles => {
            let aggregator = NewsAggregator::with_defaults(config)?;
            serde_json::to_string_pretty(&aggregator.get_articles().await)?
        }
        Command::Classified => {
            let aggregator = NewsAggregator::with_defaults(config)?;
            serde_json::to_string_pretty(&aggregator.get_classified_articles().await)?
        }
        Command::Search { keyword, site, limit } => {
            let fetcher = Arc::new(HttpFetcher::new(config.fetch.clone())?);
            let search = StructuredSearchSource::new(fetcher, &config);
            let articles = search.search_news(keyword, Some(site.as_str()), *limit).await;
            serde_json::to_string_pretty(&articles)?
        }
    };

    println!("{}", output);
    Ok(())
}
