//! User listing.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::UserRepository;
use crate::error::Result;
use crate::models::User;
use crate::state::AppState;

/// `GET /users` response.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub status: &'static str,
    pub results: Vec<User>,
}

/// List every registered user. Passwords are never included.
///
/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>> {
    let results = UserRepository::new(state.pool()).list_all().await?;

    Ok(Json(UsersResponse {
        status: "ok",
        results,
    }))
}
