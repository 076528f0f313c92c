//! Member API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::AdminGuard;
use crate::errors::AppError;
use crate::models::{CreateMemberRequest, Member, MemberType, UpdateMemberRequest};
use crate::AppState;

/// GET /api/members/:type - List members of one type, ordered by rank then
/// name. Unknown types and backend faults both yield an empty list.
pub async fn list_members(
    State(state): State<AppState>,
    Path(member_type): Path<String>,
) -> Json<Vec<Member>> {
    let Some(member_type) = MemberType::from_str(&member_type) else {
        return Json(Vec::new());
    };

    match state.repo.list_members(member_type.as_str()).await {
        Ok(members) => Json(members),
        Err(e) => {
            tracing::error!("Failed to list members: {}", e);
            Json(Vec::new())
        }
    }
}

/// POST /api/members - Create a member.
pub async fn create_member(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Json(request): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    if MemberType::from_str(&request.member_type).is_none() {
        return Err(AppError::Validation(format!(
            "Invalid member type: {}",
            request.member_type
        )));
    }
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.img.trim().is_empty() {
        return Err(AppError::Validation("Image is required".to_string()));
    }

    let member = state.repo.create_member(&request).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /api/members/:id - Update a member.
pub async fn update_member(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(id): Path<String>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<Json<Member>, AppError> {
    if let Some(ty) = &request.member_type {
        if MemberType::from_str(ty).is_none() {
            return Err(AppError::Validation(format!("Invalid member type: {}", ty)));
        }
    }

    let member = state.repo.update_member(&id, &request).await?;
    Ok(Json(member))
}

/// DELETE /api/members/:id - Delete a member, returning the deleted record.
pub async fn delete_member(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(id): Path<String>,
) -> Result<Json<Member>, AppError> {
    let member = state.repo.delete_member(&id).await?;
    Ok(Json(member))
}
