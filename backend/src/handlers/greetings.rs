use crate::AppState;
use crate::dbs::DbError;
use crate::error::ApiError;
use crate::gemini::strip_quotes;
use crate::handlers::resolve_character;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::models::{GreetingsResponse, MessageResponse};

pub async fn get_greetings(
    State(state): State<AppState>,
    Path(char_id): Path<String>,
) -> Result<Response, ApiError> {
    let character = resolve_character(state.db.as_ref(), &char_id).await?;
    let greetings = state.db.get_greetings(character.id).await?;

    if greetings.is_empty() {
        let message = format!("No greetings found for {}", character.name);
        return Ok(Json(MessageResponse { message }).into_response());
    }

    Ok(Json(GreetingsResponse {
        character_name: character.name,
        greetings: greetings.into_iter().map(|g| g.greeting_text).collect(),
    })
    .into_response())
}

pub async fn generate_greetings(
    State(state): State<AppState>,
    Path(char_id): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let character = resolve_character(state.db.as_ref(), &char_id).await?;

    // Check before invoking the model; a duplicate request must not spend
    // an external API call on a result that would be discarded.
    let existing = state.db.get_greetings(character.id).await?;
    if !existing.is_empty() {
        return Ok(already_generated(&character.name));
    }

    let phrases = state.generator.generate_greetings(&character).await?;
    let texts: Vec<String> = phrases
        .iter()
        .map(|phrase| strip_quotes(phrase).to_string())
        .collect();

    match state.db.add_greetings(character.id, texts).await {
        Ok(_) => {
            let message = format!("Greetings successfully added to {}", character.name);
            Ok((StatusCode::CREATED, Json(MessageResponse { message })))
        }
        // Lost a race with a concurrent generation request; the stored set
        // wins and this request reports the same no-op outcome.
        Err(DbError::Conflict(_)) => Ok(already_generated(&character.name)),
        Err(e) => Err(e.into()),
    }
}

fn already_generated(name: &str) -> (StatusCode, Json<MessageResponse>) {
    let message = format!("Greetings already generated for {name}");
    (StatusCode::OK, Json(MessageResponse { message }))
}
