//! Memories album endpoints: album CRUD plus per-album image upload and
//! deletion. Albums are rows in `memory_albums`; the blobs live in the blob
//! store under `memories/{album}/`.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::ok_body;
use crate::auth::AdminGuard;
use crate::errors::AppError;
use crate::models::{AlbumCreated, AlbumSummary, CreateAlbumRequest, MemoryImage};
use crate::storage::{object_path, sanitize_folder_name};
use crate::AppState;

/// GET /api/memories/albums - List albums with image count and cover URL.
pub async fn list_albums(State(state): State<AppState>) -> Json<Vec<AlbumSummary>> {
    match state.repo.list_albums().await {
        Ok(albums) => Json(albums),
        Err(e) => {
            tracing::error!("Failed to list albums: {}", e);
            Json(Vec::new())
        }
    }
}

/// POST /api/memories/albums - Create an album. The name is sanitized to
/// `[A-Za-z0-9_- ]`; duplicates are rejected.
pub async fn create_album(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Json(request): Json<CreateAlbumRequest>,
) -> Result<(StatusCode, Json<AlbumCreated>), AppError> {
    let name = sanitize_folder_name(&request.name)
        .ok_or_else(|| AppError::Validation("Invalid name".to_string()))?;

    let created = state.repo.create_album(&name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/memories/albums/:album - Delete an album, its image rows, and
/// their backing blobs. Deleting an unknown album is a 404, not a failure.
pub async fn delete_album(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(album): Path<String>,
) -> Result<Json<Value>, AppError> {
    let album = album.trim().to_string();
    let album_id = state
        .repo
        .find_album_id(&album)
        .await?
        .ok_or_else(|| AppError::NotFound("Album not found".to_string()))?;

    // Blobs first, by prefix sweep so strays go too; the rows cascade with
    // the album
    let prefix = format!("memories/{}", album);
    let paths: Vec<String> = state
        .blobs
        .list(&prefix)
        .await?
        .into_iter()
        .filter(|object| object.is_file)
        .map(|object| format!("{}/{}", prefix, object.name))
        .collect();
    state.blobs.remove(&paths).await?;

    state.repo.delete_album(&album_id).await?;
    Ok(ok_body())
}

/// GET /api/memories/:album - List an album's images ordered by rank then
/// recency. Unknown albums yield an empty list.
pub async fn list_album_images(
    State(state): State<AppState>,
    Path(album): Path<String>,
) -> Json<Vec<MemoryImage>> {
    let album = album.trim().to_string();

    let album_id = match state.repo.find_album_id(&album).await {
        Ok(Some(id)) => id,
        Ok(None) => return Json(Vec::new()),
        Err(e) => {
            tracing::error!("Failed to resolve album {}: {}", album, e);
            return Json(Vec::new());
        }
    };

    match state.repo.list_images(&album_id).await {
        Ok(images) => Json(images),
        Err(e) => {
            tracing::error!("Failed to list album images: {}", e);
            Json(Vec::new())
        }
    }
}

/// POST /api/memories/:album/upload - Store a batch of images into an album.
///
/// Multipart field `images`, capped at the configured batch size. A failed
/// file is logged and omitted from the response; it never aborts the batch.
pub async fn upload_album_images(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(album): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let album = album.trim().to_string();
    let album_id = state
        .repo
        .find_album_id(&album)
        .await?
        .ok_or_else(|| AppError::NotFound("Album not found".to_string()))?;

    let mut uploaded = Vec::new();
    let mut accepted = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("images") {
            continue;
        }
        if accepted >= state.config.max_upload_files {
            tracing::warn!(
                album,
                limit = state.config.max_upload_files,
                "Upload batch limit reached, ignoring remaining files"
            );
            break;
        }
        accepted += 1;

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to read uploaded file {}: {}", file_name, e);
                continue;
            }
        };

        let path = object_path("memories", Some(&album), &file_name);
        let url = match state.blobs.put(&path, bytes.to_vec(), &content_type).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Failed to store {}: {}", file_name, e);
                continue;
            }
        };

        if let Err(e) = state.repo.insert_image(&album_id, &url).await {
            tracing::warn!("Failed to index uploaded image {}: {}", url, e);
            continue;
        }

        uploaded.push(url);
    }

    Ok((StatusCode::CREATED, Json(json!({ "uploaded": uploaded }))))
}

/// DELETE /api/memories/:album/:filename - Delete one image by its exact
/// object key within the album.
pub async fn delete_album_image(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path((album, filename)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let album = album.trim().to_string();
    let album_id = state
        .repo
        .find_album_id(&album)
        .await?
        .ok_or_else(|| AppError::NotFound("Album not found".to_string()))?;

    let key = format!("memories/{}/{}", album, filename);
    let url = state
        .repo
        .delete_image_by_key(&album_id, &key)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    if let Some(path) = state.blobs.path_from_url(&url) {
        state.blobs.remove(&[path]).await?;
    }

    Ok(ok_body())
}
