//! Notice API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{flag_is_true, ActivePopupQuery};
use crate::auth::AdminGuard;
use crate::errors::AppError;
use crate::models::{CreateNoticeRequest, Notice, UpdateNoticeRequest};
use crate::AppState;

/// GET /api/notices - List notices, optionally filtered by `active`/`popup`.
pub async fn list_notices(
    State(state): State<AppState>,
    Query(query): Query<ActivePopupQuery>,
) -> Json<Vec<Notice>> {
    let active = flag_is_true(query.active.as_deref());
    let popup = flag_is_true(query.popup.as_deref());

    match state.repo.list_notices(active, popup).await {
        Ok(notices) => Json(notices),
        Err(e) => {
            tracing::error!("Failed to list notices: {}", e);
            Json(Vec::new())
        }
    }
}

/// POST /api/notices - Create a notice.
pub async fn create_notice(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Json(request): Json<CreateNoticeRequest>,
) -> Result<(StatusCode, Json<Notice>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }

    let notice = state.repo.create_notice(&request).await?;

    state.notifier.broadcast(&notice.title, &notice.text).await;

    Ok((StatusCode::CREATED, Json(notice)))
}

/// PUT /api/notices/:id - Update a notice.
pub async fn update_notice(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(id): Path<String>,
    Json(request): Json<UpdateNoticeRequest>,
) -> Result<Json<Notice>, AppError> {
    let notice = state.repo.update_notice(&id, &request).await?;
    Ok(Json(notice))
}

/// DELETE /api/notices/:id - Delete a notice, returning the deleted record.
pub async fn delete_notice(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(id): Path<String>,
) -> Result<Json<Notice>, AppError> {
    let notice = state.repo.delete_notice(&id).await?;
    Ok(Json(notice))
}
