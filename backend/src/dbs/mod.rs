use async_trait::async_trait;
use shared::models::{Character, CreateCharacterRequest, Greeting};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub mod local;
pub mod postgres;

pub use local::LocalDatabase;
pub use postgres::PostgresDatabase;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Clone, Debug)]
pub enum DatabaseConfig {
    Local { path: Option<PathBuf> },
    Postgres { url: String },
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

#[async_trait]
pub trait Database: Send + Sync {
    async fn get_characters(&self) -> DbResult<Vec<Character>>;
    async fn get_character(&self, character_id: i64) -> DbResult<Character>;
    async fn create_character(&self, character: CreateCharacterRequest) -> DbResult<Character>;
    async fn get_greetings(&self, character_id: i64) -> DbResult<Vec<Greeting>>;
    /// Batch insert of a character's greeting set. Fails with
    /// [`DbError::Conflict`] if the character already owns any greetings;
    /// the check and the insert happen atomically so concurrent duplicate
    /// generation requests cannot both write.
    async fn add_greetings(&self, character_id: i64, texts: Vec<String>) -> DbResult<Vec<Greeting>>;
}

pub async fn connect(config: DatabaseConfig) -> DbResult<Arc<dyn Database>> {
    match config {
        DatabaseConfig::Local { path } => Ok(Arc::new(LocalDatabase::load(path))),
        DatabaseConfig::Postgres { url } => Ok(Arc::new(PostgresDatabase::new(&url).await?)),
    }
}
