//! Health advisor server binary
//!
//! Run with: cargo run -p health-advisor --bin health-advisor-server

use health_advisor::{config::AdvisorConfig, server::AdvisorServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; credentials may come from the real environment
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "health_advisor=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                  HealthCare Assistant API                 ║
║        Health Advice with Medical Report Ingestion        ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration
    let config = AdvisorConfig::load(None)?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Model: {}", config.llm.model);
    tracing::info!("  - Archive backend: {:?}", config.archive.backend);
    tracing::info!("  - Archive folder: {}", config.archive.folder);
    tracing::info!(
        "  - Forward extraction errors: {}",
        config.processing.forward_extraction_errors
    );
    tracing::debug!("Full configuration: {:?}", config);

    // Create and start server
    let server = AdvisorServer::new(config).await?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/health-advice - Ask a health question (multipart: query, file)");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
