//! SWAPI relay handlers for `/people` and `/planets`.
//!
//! The upstream body is returned as-is with status 200, even when SWAPI
//! itself answered with an error status.

use axum::{Json, extract::State};
use serde_json::Value;

use super::extract::Path;
use crate::error::Result;
use crate::state::AppState;
use crate::swapi::ResourceKind;

/// GET /people
pub async fn list_people(State(state): State<AppState>) -> Result<Json<Value>> {
    Ok(Json(state.swapi().list(ResourceKind::People).await?))
}

/// GET /people/{id}
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Value>> {
    Ok(Json(state.swapi().get(ResourceKind::People, id).await?))
}

/// GET /planets
pub async fn list_planets(State(state): State<AppState>) -> Result<Json<Value>> {
    Ok(Json(state.swapi().list(ResourceKind::Planets).await?))
}

/// GET /planets/{id}
pub async fn get_planet(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Value>> {
    Ok(Json(state.swapi().get(ResourceKind::Planets, id).await?))
}
