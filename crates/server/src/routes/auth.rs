//! Registration and sign-in handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use swapi_favorites_core::UserId;

use super::extract::JsonBody;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// `POST /register` body.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `POST /signin` body.
#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `POST /signin` response.
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user_id: UserId,
    pub name: Option<String>,
}

/// Create an account.
///
/// POST /register
///
/// Any failure after validation, including an email that is already
/// registered, is reported as `500 {"message": "User not created"}`.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let user = auth
        .register(&body.email, &body.password, body.name.as_deref())
        .await
        .map_err(|e| match e {
            AuthError::MissingField(_) => AppError::Auth(e),
            other => AppError::failed("User not created", other),
        })?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange email, password and name for a bearer token.
///
/// POST /signin
#[instrument(skip_all)]
pub async fn sign_in(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SignInRequest>,
) -> Result<Json<SignInResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let signed_in = auth
        .sign_in(&body.email, &body.password, body.name.as_deref())
        .await?;

    Ok(Json(SignInResponse {
        token: signed_in.token,
        user_id: signed_in.user.id,
        name: signed_in.user.name,
    }))
}
