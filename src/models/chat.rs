use serde::{ Deserialize, Serialize };

use crate::error::AppError;

/// Raw `POST /chat` body. Both fields are optional here so that a missing
/// field turns into a 400 with the fixed message instead of a serde rejection.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatRequestBody {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, rename = "userMessage")]
    pub user_message: Option<String>,
}

/// A validated chat request: both fields present and non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
    pub domain: String,
    pub user_message: String,
}

impl TryFrom<ChatRequestBody> for ChatRequest {
    type Error = AppError;

    fn try_from(body: ChatRequestBody) -> Result<Self, Self::Error> {
        match (body.domain, body.user_message) {
            (Some(domain), Some(user_message)) if !domain.is_empty() && !user_message.is_empty() => {
                Ok(ChatRequest { domain, user_message })
            }
            _ => Err(AppError::InvalidRequest),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(rename = "assistantMessage")]
    pub assistant_message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
