use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

mod cli;

use matchday_core::{
    ApiCredential, GenerationClientConfig, HttpGenerationClient, RelayEngine, default_candidates,
};
use matchday_router::relay_router;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("matchday failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let credential = cli
        .api_key
        .as_deref()
        .and_then(ApiCredential::new)
        .or_else(ApiCredential::from_env);
    if credential.is_none() {
        warn!("no API credential configured, analyze requests will fail with 500");
    }

    let client = HttpGenerationClient::new(GenerationClientConfig {
        base_url: cli.base_url.clone(),
        connect_timeout: Duration::from_secs(cli.connect_timeout_secs),
        request_timeout: Duration::from_secs(cli.request_timeout_secs),
    })?;

    let candidates = default_candidates();
    info!(
        candidates = candidates.len(),
        has_key = credential.is_some(),
        base_url = %cli.base_url,
        "engine ready"
    );
    let engine = Arc::new(RelayEngine::new(credential, candidates, Arc::new(client)));

    let app = relay_router(engine);
    let bind = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(addr = %bind, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("matchday=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
