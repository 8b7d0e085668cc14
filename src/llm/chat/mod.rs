pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use super::LlmConfig;
use self::openai::OpenAIChatClient;

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Chat client configuration error: {0}")]
    Config(String),

    #[error("Completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends `system_prompt` followed by `user_message` and returns the first
    /// choice's text with surrounding whitespace removed.
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str
    ) -> Result<CompletionResponse, GatewayError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, GatewayError> {
    let client: Arc<dyn ChatClient> = Arc::new(OpenAIChatClient::from_config(config)?);
    Ok(client)
}
