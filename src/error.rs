use axum::{ http::StatusCode, response::{ IntoResponse, Response }, Json };
use thiserror::Error;

use crate::models::chat::ErrorResponse;

pub const INVALID_REQUEST_MESSAGE: &str =
    "Faltan datos en la solicitud (domain y/o userMessage).";
pub const UPSTREAM_ERROR_MESSAGE: &str = "Error al interactuar con el modelo de OpenAI.";

/// Failures surfaced by `POST /chat`. The upstream cause is kept for logs only;
/// callers always see one of the fixed messages.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing domain and/or userMessage")]
    InvalidRequest,

    #[error("no products found for domain: {0}")]
    NotFound(String),

    #[error("upstream error: {0}")]
    Upstream(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidRequest => INVALID_REQUEST_MESSAGE.to_string(),
            AppError::NotFound(domain) => {
                format!("No se encontraron productos para el dominio: {}.", domain)
            }
            AppError::Upstream(_) => UPSTREAM_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse { error: self.public_message() });
        (self.status(), body).into_response()
    }
}
