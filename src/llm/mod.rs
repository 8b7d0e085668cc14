pub mod chat;

use std::time::Duration;
use crate::cli::Args;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub completion_model: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            completion_model: None,
            base_url: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(60),
        }
    }
}

impl LlmConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            api_key: Some(args.chat_api_key.clone()).filter(|k| !k.trim().is_empty()),
            completion_model: Some(args.chat_model.clone()).filter(|m| !m.is_empty()),
            base_url: Some(args.chat_base_url.clone()).filter(|u| !u.is_empty()),
            max_tokens: args.chat_max_tokens,
            temperature: args.chat_temperature,
            timeout: args.request_timeout(),
        }
    }
}
