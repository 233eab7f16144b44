use std::sync::Arc;

use anyhow::Result;
use bukascout::{
    config::Config,
    dedup::DedupStore,
    fetcher::{self, RawPage},
    pipeline::Pipeline,
    publisher::HttpPublisher,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bukascout")]
#[command(about = "Fetch a web page, score it as a venue lead and publish it")]
#[command(version)]
struct Cli {
    /// Page URL to fetch and process
    url: String,

    /// Identifier of the source that surfaced this URL
    #[arg(long, default_value = "SRC-MANUAL")]
    source_id: String,

    /// How the URL was discovered
    #[arg(long, default_value = "manual")]
    discovery_type: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A local .env is honored before configuration is read
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Fetch and decode the page
    let response = fetcher::fetch(&cli.url).await?;
    let page = RawPage::from_response(&cli.url, response, cli.source_id, cli.discovery_type);

    // Wire up the pipeline and run the page through it
    let store = DedupStore::open(config.dedup_db_path())?;
    let sink = Arc::new(HttpPublisher::new(config.api_base_url(), config.api_token()));
    let pipeline = Pipeline::new(config, store, sink);

    let report = pipeline.process(&page).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
