use crate::cli::Args;
use crate::config::prompt::build_system_prompt;
use crate::error::AppError;
use crate::llm::LlmConfig;
use crate::llm::chat::{ ChatClient, new_client as new_chat_client };
use crate::models::chat::ChatRequest;
use crate::store::{ initialize_product_store, ProductStore };

use log::{ debug, error, info, warn };
use std::error::Error;
use std::sync::Arc;

/// Answers shopper questions about one storefront's catalog. Holds the
/// long-lived store and completion clients; cloning shares them.
#[derive(Clone)]
pub struct SalesAgent {
    chat_client: Arc<dyn ChatClient>,
    product_store: Arc<dyn ProductStore>,
}

impl SalesAgent {
    pub async fn new(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let chat_config = LlmConfig::from_args(args);
        let chat_client = new_chat_client(&chat_config)?;
        info!(
            "Chat client configured: Model={}, BaseURL={}",
            chat_client.get_model(),
            chat_client.get_base_url().as_deref().unwrap_or("adapter default")
        );

        let product_store = initialize_product_store(args).await?;

        Ok(Self::from_parts(chat_client, product_store))
    }

    pub fn from_parts(chat_client: Arc<dyn ChatClient>, product_store: Arc<dyn ProductStore>) -> Self {
        Self { chat_client, product_store }
    }

    /// Looks up the domain's catalog, composes the system prompt and returns
    /// the model's trimmed reply.
    pub async fn handle_chat(&self, request: &ChatRequest) -> Result<String, AppError> {
        let products = self.product_store.find_by_domain(&request.domain).await.map_err(|e| {
            error!("Product lookup failed for domain '{}': {}", request.domain, e);
            AppError::Upstream(e.to_string())
        })?;

        if products.is_empty() {
            warn!("No products found for domain '{}'", request.domain);
            return Err(AppError::NotFound(request.domain.clone()));
        }

        let system_prompt = build_system_prompt(&request.domain, &products);
        debug!(
            "Composed system prompt for '{}': {} products, {} bytes",
            request.domain,
            products.len(),
            system_prompt.len()
        );

        let completion = self.chat_client
            .complete(&system_prompt, &request.user_message).await
            .map_err(|e| {
                error!("Completion request failed for domain '{}': {}", request.domain, e);
                AppError::Upstream(e.to_string())
            })?;

        Ok(completion.response.trim().to_string())
    }

    pub async fn shutdown(&self) {
        self.product_store.close().await;
    }
}
