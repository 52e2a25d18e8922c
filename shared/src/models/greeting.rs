use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Greeting {
    pub id: i64,
    pub greeting_text: String,
    pub character_id: i64,
}

/// Greeting list for one character, in storage order.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GreetingsResponse {
    pub character_name: String,
    pub greetings: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub message: String,
}
