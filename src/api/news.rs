//! News API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::flag_is_true;
use crate::auth::AdminGuard;
use crate::errors::AppError;
use crate::models::{CreateNewsRequest, News, UpdateNewsRequest};
use crate::AppState;

/// Query filters shared by the news and notices listings.
#[derive(Debug, Default, Deserialize)]
pub struct ActivePopupQuery {
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default)]
    pub popup: Option<String>,
}

/// GET /api/news - List news, optionally filtered by `active`/`popup`.
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ActivePopupQuery>,
) -> Json<Vec<News>> {
    let active = flag_is_true(query.active.as_deref());
    let popup = flag_is_true(query.popup.as_deref());

    match state.repo.list_news(active, popup).await {
        Ok(news) => Json(news),
        Err(e) => {
            tracing::error!("Failed to list news: {}", e);
            Json(Vec::new())
        }
    }
}

/// POST /api/news - Create a news item. `publishedAt` is stamped server-side;
/// `active` defaults to true and `popup` to false.
pub async fn create_news(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Json(request): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<News>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }

    let news = state.repo.create_news(&request).await?;

    state.notifier.broadcast(&news.title, &news.text).await;

    Ok((StatusCode::CREATED, Json(news)))
}

/// PUT /api/news/:id - Update a news item.
pub async fn update_news(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(id): Path<String>,
    Json(request): Json<UpdateNewsRequest>,
) -> Result<Json<News>, AppError> {
    let news = state.repo.update_news(&id, &request).await?;
    Ok(Json(news))
}

/// DELETE /api/news/:id - Delete a news item, returning the deleted record.
pub async fn delete_news(
    State(state): State<AppState>,
    _admin: AdminGuard,
    Path(id): Path<String>,
) -> Result<Json<News>, AppError> {
    let news = state.repo.delete_news(&id).await?;
    Ok(Json(news))
}
