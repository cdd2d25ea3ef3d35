use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nda_search::{fetcher, EngineConfig, NishithDesaiEngine, SearchResponse};

/// Run one search against the Nishith Desai Associates site and print the
/// parsed results as JSON.
#[derive(Parser)]
#[command(name = "nda-search", version)]
struct Args {
    /// Search query
    query: String,

    /// 1-based results page
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Override the site base URL (e.g. a local mirror)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = EngineConfig::default();
    if let Some(base_url) = args
        .base_url
        .or_else(|| std::env::var("NDA_BASE_URL").ok())
    {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }

    let engine = NishithDesaiEngine::with_config(config);
    let spec = engine.build_request(&args.query, args.page);
    let body = fetcher::execute(&spec).await?;
    let results = engine.parse_response(&body);

    tracing::info!("{} results for \"{}\"", results.len(), args.query);

    let response = SearchResponse {
        query: args.query,
        count: results.len(),
        results,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
