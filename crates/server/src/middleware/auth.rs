//! Bearer token extractor for protected routes.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use swapi_favorites_core::UserId;

use crate::error::{AppError, set_sentry_user};
use crate::services::TokenError;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Resolves to the user ID carried in the token's subject. Missing, malformed,
/// forged or expired tokens are rejected with 401 before the handler runs.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user_id): RequireAuth) -> String {
///     format!("Hello, user {user_id}!")
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth(pub UserId);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization Header".to_string()))?;

        let token = header
            .to_str()
            .ok()
            .and_then(bearer_token)
            .ok_or_else(|| {
                AppError::Unauthorized(
                    "Bad Authorization header. Expected 'Authorization: Bearer <JWT>'".to_string(),
                )
            })?;

        let claims = state.tokens().verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Unauthorized(rejection_message(&e).to_string())
        })?;

        let user_id = claims
            .user_id()
            .map_err(|e| AppError::Unauthorized(rejection_message(&e).to_string()))?;

        set_sentry_user(&user_id);

        Ok(Self(user_id))
    }
}

/// Pull the token out of an `Authorization` value. The scheme is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn rejection_message(err: &TokenError) -> &'static str {
    match err {
        TokenError::Expired => "Token has expired",
        TokenError::InvalidSignature => "Signature verification failed",
        TokenError::NotYetValid => "The token is not yet valid",
        TokenError::WrongType(_) => "Only access tokens are allowed",
        _ => "Invalid token",
    }
}
