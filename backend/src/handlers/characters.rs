use crate::AppState;
use crate::error::ApiError;
use axum::{Json, extract::State, http::StatusCode};
use serde_json::Value;
use shared::models::{Character, CreateCharacterRequest};

pub async fn list_characters(
    State(state): State<AppState>,
) -> Result<Json<Vec<Character>>, ApiError> {
    let characters = state.db.get_characters().await?;
    Ok(Json(characters))
}

pub async fn create_character(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Character>), ApiError> {
    let payload = parse_create_request(body)?;
    let character = state.db.create_character(payload).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

/// Deserializes the creation payload so a missing key is reported by name
/// and unknown keys are rejected, rather than surfacing a framework error.
fn parse_create_request(body: Value) -> Result<CreateCharacterRequest, ApiError> {
    serde_json::from_value(body).map_err(|e| {
        let msg = e.to_string();
        if let Some(field) = msg
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            ApiError::MissingField(field.to_string())
        } else {
            ApiError::InvalidBody(msg)
        }
    })
}
