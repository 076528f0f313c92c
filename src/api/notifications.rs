//! Push token registration.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use super::ok_body;
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterTokenRequest {
    #[serde(default)]
    pub token: String,
}

/// POST /api/notifications/register - Register a push endpoint, deduplicated
/// by exact token value.
pub async fn register_push_token(
    State(state): State<AppState>,
    Json(request): Json<RegisterTokenRequest>,
) -> Result<Json<Value>, AppError> {
    let token = request.token.trim();
    if token.is_empty() {
        return Err(AppError::BadRequest("Missing token".to_string()));
    }

    let inserted = state.repo.register_push_token(token).await?;
    if inserted {
        tracing::info!("Registered new push token");
    }

    Ok(ok_body())
}
