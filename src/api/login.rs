//! Admin login endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::constant_time_compare;
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/login - Exchange admin credentials for the static admin token.
///
/// Both fields are compared in constant time; the token returned is the same
/// fixed value for every successful login.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user_ok = constant_time_compare(&request.username, &state.config.admin_user);
    let pass_ok = constant_time_compare(&request.password, &state.config.admin_pass);

    if user_ok && pass_ok {
        Ok(Json(LoginResponse {
            token: state.config.admin_token.clone(),
        }))
    } else {
        Err(AppError::Unauthorized)
    }
}
