use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };
use std::time::Duration;

use super::{ ChatClient, CompletionResponse, GatewayError };
use crate::llm::{ LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL };

pub struct OpenAIChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Debug, Clone)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

impl OpenAIChatClient {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        max_tokens: u32,
        temperature: f32,
        timeout: Duration
    ) -> Result<Self, GatewayError> {
        let chat_model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e|
                GatewayError::Config(format!("Invalid API key format: {}", e))
            )?
        );

        let http = HttpClient::builder().default_headers(headers).timeout(timeout).build()?;

        Ok(Self {
            http,
            model: chat_model,
            base_url: api_url,
            max_tokens,
            temperature,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, GatewayError> {
        let api_key = config.api_key
            .clone()
            .ok_or_else(|| GatewayError::Config("OpenAI API key is required".to_string()))?;

        Self::new(
            api_key,
            config.completion_model.clone(),
            config.base_url.clone(),
            config.max_tokens,
            config.temperature,
            config.timeout
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request(&self, system_prompt: &str, user_message: &str) -> OpenAIChatRequest {
        OpenAIChatRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: user_message.to_string(),
                }
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Pulls `choices[0].message.content` out of a completion body, trimmed.
fn first_choice_content(body: &str) -> Result<String, GatewayError> {
    let resp: OpenAIResponse = serde_json
        ::from_str(body)
        .map_err(|e| GatewayError::MalformedResponse(format!("{}: {}", e, body)))?;

    resp.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| GatewayError::MalformedResponse(format!("no choices[0].message.content in {}", body)))
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str
    ) -> Result<CompletionResponse, GatewayError> {
        let req = self.build_request(system_prompt, user_message);
        debug!(
            "Sending completion request: model={}, max_tokens={}, system_prompt_len={}",
            req.model,
            req.max_tokens,
            system_prompt.len()
        );

        let resp = self.http.post(self.completions_url()).json(&req).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(GatewayError::Status { status, body });
        }

        Ok(CompletionResponse { response: first_choice_content(&body)? })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}
