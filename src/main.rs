use std::env;
use std::error::Error;

use mediarec::{EmbedConfig, RecommendConfig, Recommender};

/// Demo entry point: answer one free-text query against the bundled catalog.
///
/// Runs fully offline with the deterministic stub provider by default; set
/// `MEDIAREC_API_URL` (and optionally `MEDIAREC_API_TOKEN` /
/// `MEDIAREC_API_PROVIDER`) to rank with a real embedding model.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let query = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        eprintln!("usage: mediarec <free-text query>");
        std::process::exit(2);
    }

    let mut embed = EmbedConfig::default();
    if let Ok(url) = env::var("MEDIAREC_API_URL") {
        embed.mode = "api".into();
        embed.api_url = Some(url);
        embed.api_provider = env::var("MEDIAREC_API_PROVIDER").ok();
        embed.api_auth_header = env::var("MEDIAREC_API_TOKEN")
            .ok()
            .map(|token| format!("Bearer {token}"));
    }

    let service = Recommender::new(RecommendConfig {
        embed,
        ..Default::default()
    })?;
    tracing::info!(
        provider = %service.config().embed.mode,
        query = %query,
        "mediarec_query"
    );

    for line in service.recommend(&query).await? {
        println!("{line}");
    }

    Ok(())
}
