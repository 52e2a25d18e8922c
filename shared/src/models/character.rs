use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub personality: String,
    pub occupation: String,
    pub age: i32,
}

/// Creation payload: all four descriptive attributes are required and no
/// other keys are accepted. The id is assigned by the store.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub personality: String,
    pub occupation: String,
    pub age: i32,
}
