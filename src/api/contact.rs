//! Contact-form and membership-application endpoints.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::ok_body;
use crate::errors::AppError;
use crate::mailer::{ContactMessage, MembershipApplication};
use crate::storage::object_path;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// POST /api/contact - Forward a contact-form submission to the site mailer.
pub async fn contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<Value>, AppError> {
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.message.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "name, email and message are required".to_string(),
        ));
    }

    state.mailer.send_contact(&ContactMessage {
        name: request.name,
        email: request.email,
        phone: request.phone,
        message: request.message,
    });

    Ok(ok_body())
}

/// POST /api/membership - Accept a membership application: multipart form
/// fields plus `photo` and `citizenship` attachments, which are stored in
/// the blob store and referenced from the composed mail.
pub async fn membership(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut application = MembershipApplication::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };

        match name.as_str() {
            "photo" | "citizenship" => {
                let file_name = field.file_name().unwrap_or("attachment").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!("Failed to read attachment {}: {}", file_name, e);
                        continue;
                    }
                };

                let path = object_path("membership", None, &file_name);
                match state.blobs.put(&path, bytes.to_vec(), &content_type).await {
                    Ok(url) => application.attachment_urls.push(url),
                    Err(e) => tracing::warn!("Failed to store attachment {}: {}", file_name, e),
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Malformed field: {}", e)))?;
                match name.as_str() {
                    "name" => application.name = value,
                    "email" => application.email = value,
                    "phone" => application.phone = Some(value),
                    "address" => application.address = Some(value),
                    "message" => application.message = Some(value),
                    _ => {}
                }
            }
        }
    }

    if application.name.trim().is_empty() || application.email.trim().is_empty() {
        return Err(AppError::BadRequest("name and email are required".to_string()));
    }

    state.mailer.send_membership(&application);

    Ok(ok_body())
}
