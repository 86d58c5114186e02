//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Whatever goes wrong, the client
//! receives a JSON body of the form `{"message": "..."}`; server-side failures
//! are logged and captured to Sentry before the response is built, and their
//! internal details are never sent to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::AuthError;
use crate::swapi::SwapiError;

/// Message returned when sign-in fails, whatever the reason.
pub const SIGN_IN_FAILED: &str = "Enter your credentials again";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// SWAPI relay failed.
    #[error("SWAPI error: {0}")]
    Swapi(#[from] SwapiError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A write failed; `message` is what the client sees.
    #[error("{message}: {source}")]
    Failed {
        message: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl AppError {
    /// Wrap a server-side failure behind a fixed client-facing message.
    pub fn failed(
        message: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Failed {
            message,
            source: source.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Swapi(_) | Self::Failed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(err) => match err {
                AuthError::MissingField(_) => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                // Duplicate emails get no status of their own
                AuthError::UserAlreadyExists
                | AuthError::Repository(_)
                | AuthError::PasswordHash
                | AuthError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Database(_) => "Internal server error".to_string(),
            Self::Swapi(_) => "Upstream service error".to_string(),
            Self::Auth(err) => match err {
                AuthError::MissingField(_) => err.to_string(),
                AuthError::InvalidCredentials => SIGN_IN_FAILED.to_string(),
                _ => "Internal server error".to_string(),
            },
            Self::NotFound(msg) | Self::Unauthorized(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::Failed { message, .. } => (*message).to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (status, Json(json!({ "message": self.client_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Called by the bearer-token extractor so errors on protected routes are
/// associated with the caller.
pub fn set_sentry_user(user_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            ..Default::default()
        }));
    });
}
