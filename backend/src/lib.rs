pub mod dbs;
pub mod error;
pub mod gemini;
pub mod handlers;

#[cfg(test)]
mod test_support;

use crate::dbs::Database;
use crate::gemini::GreetingGenerator;
use crate::handlers::{create_character, generate_greetings, get_greetings, list_characters};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub generator: Arc<dyn GreetingGenerator>,
}

pub fn init(state: AppState) -> Router<()> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/characters", get(list_characters).post(create_character))
        .route("/characters/{char_id}/greetings", get(get_greetings))
        .route("/characters/{char_id}/generate", post(generate_greetings))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
