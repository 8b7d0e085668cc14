use crate::agent::SalesAgent;
use crate::error::AppError;
use crate::models::chat::{ ChatRequest, ChatRequestBody, ChatResponse };
use axum::{
    routing::{ get, post },
    Router,
    Json,
    extract::{ State, rejection::JsonRejection },
};
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, warn };

#[derive(Clone)]
pub struct AppState {
    pub agent: SalesAgent,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>
) -> Result<Json<ChatResponse>, AppError> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!("Rejected chat request body: {}", rejection);
            return Err(AppError::InvalidRequest);
        }
    };

    let request = ChatRequest::try_from(body).map_err(|e| {
        warn!("Rejected chat request: {}", e);
        e
    })?;

    info!("Chat request for domain '{}'", request.domain);
    let assistant_message = state.agent.handle_chat(&request).await?;

    Ok(Json(ChatResponse { assistant_message }))
}

async fn health_handler() -> &'static str {
    "ok"
}
