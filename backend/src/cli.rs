use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
pub struct Cli {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Postgres connection string; falls back to DATABASE_URL, then to the
    /// local JSON-file store.
    #[arg(long)]
    pub database_url: Option<String>,
    #[arg(long)]
    pub local_db_path: Option<PathBuf>,
}
