mod cli;

use backend::dbs::{self, DatabaseConfig};
use backend::gemini::GeminiClient;
use backend::{AppState, init};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();
    let cli = cli::Cli::parse();

    let config = match cli
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
    {
        Some(url) => DatabaseConfig::Postgres { url },
        None => DatabaseConfig::Local {
            path: cli.local_db_path,
        },
    };
    let db = dbs::connect(config).await?;
    let generator = Arc::new(GeminiClient::from_env()?);

    let router = init(AppState { db, generator });
    let addr = SocketAddr::from(([127, 0, 0, 1], cli.port));
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
