//! Generic single-file upload endpoint.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::auth::AdminGuard;
use crate::errors::AppError;
use crate::storage::object_path;
use crate::AppState;

/// POST /api/upload - Store one file (multipart field `image`) and return
/// its public URL.
pub async fn upload(
    State(state): State<AppState>,
    _admin: AdminGuard,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;

        let path = object_path("uploads", None, &file_name);
        let url = state.blobs.put(&path, bytes.to_vec(), &content_type).await?;

        return Ok((StatusCode::CREATED, Json(json!({ "url": url }))));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}
