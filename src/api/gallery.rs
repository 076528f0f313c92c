//! Gallery API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::AdminGuard;
use crate::errors::AppError;
use crate::models::{CreateGalleryItemRequest, GalleryItem, GalleryKind, UpdateGalleryItemRequest};
use crate::AppState;

/// GET /api/gallery - List gallery items ordered by rank then recency.
pub async fn list_gallery(State(state): State<AppState>) -> Json<Vec<GalleryItem>> {
    match state.repo.list_gallery().await {
        Ok(items) => Json(items),
        Err(e) => {
            tracing::error!("Failed to list gallery: {}", e);
            Json(Vec::new())
        }
    }
}

/// POST /api/gallery - Create a gallery item.
pub async fn create_gallery_item(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Json(request): Json<CreateGalleryItemRequest>,
) -> Result<(StatusCode, Json<GalleryItem>), AppError> {
    if GalleryKind::from_str(&request.kind).is_none() {
        return Err(AppError::Validation(format!(
            "Invalid gallery type: {}",
            request.kind
        )));
    }

    let item = state.repo.create_gallery_item(&request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/gallery/:id - Update a gallery item.
pub async fn update_gallery_item(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(id): Path<String>,
    Json(request): Json<UpdateGalleryItemRequest>,
) -> Result<Json<GalleryItem>, AppError> {
    if let Some(kind) = &request.kind {
        if GalleryKind::from_str(kind).is_none() {
            return Err(AppError::Validation(format!("Invalid gallery type: {}", kind)));
        }
    }

    let item = state.repo.update_gallery_item(&id, &request).await?;
    Ok(Json(item))
}

/// DELETE /api/gallery/:id - Delete a gallery item, returning the deleted
/// record.
pub async fn delete_gallery_item(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(id): Path<String>,
) -> Result<Json<GalleryItem>, AppError> {
    let item = state.repo.delete_gallery_item(&id).await?;
    Ok(Json(item))
}
