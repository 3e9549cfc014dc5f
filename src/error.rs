/// Error types for KnowledgeKnot
///
/// Every fault raised inside a handler propagates here and is turned into
/// an HTML error page with the matching status code.
use actix_web::{error::ResponseError, http::header::ContentType, http::StatusCode, HttpResponse};
use askama::Template;
use thiserror::Error;

use crate::views::ErrorTemplate;

/// Result type for application operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application fault taxonomy
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more form fields missing or invalid; the message carries
    /// every violation found, comma-joined
    #[error("{0}")]
    Validation(String),

    /// A route or resource id did not resolve
    #[error("{0}")]
    NotFound(String),

    /// Document store operation failed
    #[error("database error: {0}")]
    Database(String),

    /// View rendering failed
    #[error("template error: {0}")]
    Template(String),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Template(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut message = self.to_string();
        if message.is_empty() {
            message = "something went wrong".to_string();
        }

        let page = ErrorTemplate {
            status: status.as_u16(),
            message: &message,
        };

        // The error renderer must never fault itself; fall back to plain
        // text if the template engine does.
        match page.render() {
            Ok(body) => HttpResponse::build(status)
                .content_type(ContentType::html())
                .body(body),
            Err(e) => {
                tracing::error!("error view rendering failed: {}", e);
                HttpResponse::build(status)
                    .content_type(ContentType::plaintext())
                    .body(message)
            }
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Template(err.to_string())
    }
}
