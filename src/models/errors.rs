use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request to remote service failed: {message}")]
    TransportError { message: String },

    #[error("Remote service returned {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("Malformed response from remote service: {message}")]
    ParseError { message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Template rendering failed: {message}")]
    TemplateError { message: String },
}

/// User-facing rendition of an [`AppError`].
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub message: String,
}

pub struct ErrorHandler;

impl ErrorHandler {
    /// Converts an AppError into the message and status shown to the browser
    pub fn handle_error(error: &AppError) -> ErrorResponse {
        match error {
            AppError::TransportError { .. } => ErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                message: "Failed to fetch".to_string(),
            },

            AppError::RemoteError { status, message } => {
                let status = StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                let message = if message.trim().is_empty() {
                    "The quote service could not complete the request".to_string()
                } else {
                    message.clone()
                };
                ErrorResponse { status, message }
            }

            AppError::ParseError { .. } => ErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                message: "Unexpected response from the quote service".to_string(),
            },

            AppError::Unauthorized => ErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                message: "Unauthorized".to_string(),
            },

            AppError::ValidationError { message } => ErrorResponse {
                status: StatusCode::BAD_REQUEST,
                message: message.clone(),
            },

            AppError::TemplateError { .. } => ErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An unexpected error occurred".to_string(),
            },
        }
    }

    /// Message for a failed action, preferring what the remote service said
    pub fn action_message(error: &AppError, fallback: &str) -> String {
        match error {
            AppError::RemoteError { message, .. } if !message.trim().is_empty() => message.clone(),
            AppError::TransportError { .. } => "Failed to fetch".to_string(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::ValidationError { message } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

// Convenience functions for creating specific errors
impl AppError {
    pub fn transport(message: impl Into<String>) -> Self {
        AppError::TransportError { message: message.into() }
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        AppError::RemoteError { status, message: message.into() }
    }

    pub fn parse_failed(message: impl Into<String>) -> Self {
        AppError::ParseError { message: message.into() }
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        AppError::ValidationError { message: message.into() }
    }

    pub fn template_failed(message: impl Into<String>) -> Self {
        AppError::TemplateError { message: message.into() }
    }

    /// True when the remote service rejected the session credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AppError::Unauthorized | AppError::RemoteError { status: 401, .. }
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            AppError::parse_failed(error.to_string())
        } else {
            AppError::transport(error.to_string())
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(error: tera::Error) -> Self {
        // tera keeps the useful detail in the source chain
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        AppError::template_failed(message)
    }
}

/// Plain-text fallback used when an HTML error page cannot be rendered.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let rendered = ErrorHandler::handle_error(&self);
        if rendered.status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (rendered.status, rendered.message).into_response()
    }
}
