use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use shared::models::Character;
use thiserror::Error;

/// Gemini's OpenAI-compatibility endpoint, so the same chat-completion
/// client works against it.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const GEMINI_MODEL: &str = "gemini-1.5-flash";
const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("{API_KEY_VAR} is not set")]
    MissingCredential,
    #[error("Completion request failed: {0}")]
    Api(#[from] OpenAIError),
    #[error("Completion response contained no text")]
    EmptyCompletion,
}

/// Turns a character into a prompt and the model's completion into phrases.
/// Injected into the handlers so tests can substitute a stub.
#[async_trait]
pub trait GreetingGenerator: Send + Sync {
    async fn generate_greetings(&self, character: &Character)
    -> Result<Vec<String>, GenerateError>;
}

pub struct GeminiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(GEMINI_API_BASE);
        Self {
            client: Client::with_config(config),
            model: GEMINI_MODEL.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, GenerateError> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| GenerateError::MissingCredential)?;
        Ok(Self::new(api_key))
    }
}

#[async_trait]
impl GreetingGenerator for GeminiClient {
    async fn generate_greetings(
        &self,
        character: &Character,
    ) -> Result<Vec<String>, GenerateError> {
        let prompt = build_prompt(character);

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .build()?;

        let response = self.client.chat().create(request).await?;
        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(GenerateError::EmptyCompletion)?;

        Ok(split_phrases(&text))
    }
}

fn build_prompt(character: &Character) -> String {
    format!(
        "I am writing a fantasy RPG video game. I have an npc named {} who is {} years old. \
         They are a {} who has a {} personality. Please generate a list of 10 short stock \
         phrases they might use when the main character talks to them, one phrase per line. \
         Please return just the phrases without a variable name, numbering, or square brackets.",
        character.name, character.age, character.occupation, character.personality
    )
}

/// Splits a raw completion into phrases. The model terminates its output
/// with a newline, so the final element of the split is an empty string
/// and is discarded.
pub fn split_phrases(raw: &str) -> Vec<String> {
    let mut phrases: Vec<String> = raw.split('\n').map(str::to_string).collect();
    phrases.pop();
    phrases
}

/// Removes one layer of surrounding double quotes, if present.
pub fn strip_quotes(phrase: &str) -> &str {
    let phrase = phrase.strip_prefix('"').unwrap_or(phrase);
    phrase.strip_suffix('"').unwrap_or(phrase)
}
