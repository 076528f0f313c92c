//! Generic rank-reorder endpoint.
//!
//! Externally this is `PUT /api/{resource}/reorder`. The router registers a
//! static alias per known resource (the `{id}` routes would otherwise
//! shadow the wildcard) plus the wildcard route, which rejects anything
//! outside the allow-list.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use super::ok_body;
use crate::auth::AdminGuard;
use crate::errors::AppError;
use crate::models::{valid_rank_updates, ReorderRequest, ReorderTable};
use crate::AppState;

/// PUT /api/:resource/reorder for resources outside the static aliases;
/// always an allow-list rejection unless the name happens to be valid.
pub async fn reorder(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(resource): Path<String>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    apply_reorder(&state, &resource, request).await
}

pub async fn reorder_members(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    apply_reorder(&state, "members", request).await
}

pub async fn reorder_news(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    apply_reorder(&state, "news", request).await
}

pub async fn reorder_gallery(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    apply_reorder(&state, "gallery", request).await
}

pub async fn reorder_notices(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    apply_reorder(&state, "notices", request).await
}

pub async fn reorder_memories(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<Value>, AppError> {
    apply_reorder(&state, "memories", request).await
}

/// Validate the resource name, drop entries without a string `id` and a
/// numeric `rank`, and apply the survivors independently.
async fn apply_reorder(
    state: &AppState,
    resource: &str,
    request: ReorderRequest,
) -> Result<Json<Value>, AppError> {
    let table = ReorderTable::from_resource(resource)
        .ok_or_else(|| AppError::BadRequest("Invalid resource".to_string()))?;

    let updates = request
        .updates
        .ok_or_else(|| AppError::BadRequest("Invalid updates payload".to_string()))?;

    let valid = valid_rank_updates(&updates);

    if valid.is_empty() {
        return Ok(ok_body());
    }

    state.repo.reorder(table, &valid).await?;
    Ok(ok_body())
}
