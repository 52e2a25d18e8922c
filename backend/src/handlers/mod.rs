use crate::dbs::{Database, DbError};
use crate::error::ApiError;
use shared::models::Character;

pub mod characters;
pub mod greetings;

pub use characters::*;
pub use greetings::*;

/// Resolves a raw path identifier to a stored character, or fails with the
/// structured client error the caller returns as-is.
pub(crate) async fn resolve_character(
    db: &dyn Database,
    raw_id: &str,
) -> Result<Character, ApiError> {
    let id: i64 = raw_id.parse().map_err(|_| ApiError::InvalidId {
        kind: "character",
        value: raw_id.to_string(),
    })?;

    match db.get_character(id).await {
        Ok(character) => Ok(character),
        Err(DbError::NotFound(_)) => Err(ApiError::NotFound {
            kind: "character",
            id,
        }),
        Err(e) => Err(ApiError::Db(e)),
    }
}
