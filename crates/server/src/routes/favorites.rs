//! Favorites handlers.
//!
//! Listing and creating require a bearer token; the owner is always the
//! token's subject, never a field of the request. Deleting is open to any
//! caller who knows the favorite's ID.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use swapi_favorites_core::FavoriteId;

use super::Message;
use super::extract::{JsonBody, Path};
use crate::db::FavoriteRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Favorite;
use crate::models::favorite::{ResourceUid, resource_url};
use crate::state::AppState;

/// `POST /favorites/{type}` body.
#[derive(Debug, Deserialize)]
pub struct CreateFavoriteRequest {
    /// SWAPI uid of the resource (number or string).
    pub uid: ResourceUid,
    /// Display name stored with the favorite.
    pub name: String,
}

/// List the caller's favorites.
///
/// GET /favorites
#[instrument(skip_all, fields(user_id = %user_id))]
pub async fn list_favorites(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<Vec<Favorite>>> {
    let favorites = FavoriteRepository::new(state.pool())
        .list_for_user(user_id)
        .await?;

    Ok(Json(favorites))
}

/// Favorite an upstream resource.
///
/// POST /favorites/{type}
///
/// `type` is not restricted to `people`/`planets`; it only shapes the stored url.
#[instrument(skip_all, fields(user_id = %user_id, kind = %kind))]
pub async fn create_favorite(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    Path(kind): Path<String>,
    JsonBody(body): JsonBody<CreateFavoriteRequest>,
) -> Result<(StatusCode, Json<Favorite>)> {
    if body.uid.is_blank() {
        return Err(AppError::BadRequest("uid is required".to_string()));
    }
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let url = resource_url(state.swapi().base_url(), &kind, &body.uid);

    let favorite = FavoriteRepository::new(state.pool())
        .create(user_id, &body.name, &url)
        .await
        .map_err(|e| AppError::failed("Favorite not created", e))?;

    tracing::info!(favorite_id = %favorite.id, url = %favorite.url, "Favorite created");
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Delete a favorite by ID.
///
/// DELETE /favorites/{id}
///
/// Answers 201 on success to stay compatible with existing clients.
#[instrument(skip_all, fields(favorite_id = %id))]
pub async fn delete_favorite(
    State(state): State<AppState>,
    Path(id): Path<FavoriteId>,
) -> Result<(StatusCode, Json<Message>)> {
    let favorites = FavoriteRepository::new(state.pool());

    if favorites.get_by_id(id).await?.is_none() {
        return Err(AppError::NotFound("Favorite not found".to_string()));
    }

    match favorites.delete(id).await {
        Ok(true) => {
            tracing::info!(favorite_id = %id, "Favorite deleted");
            Ok((StatusCode::CREATED, Json(Message::new("Favorite deleted"))))
        }
        Ok(false) => Err(AppError::failed(
            "Favorite not deleted",
            "favorite vanished before it could be deleted",
        )),
        Err(e) => Err(AppError::failed("Favorite not deleted", e)),
    }
}
