//! News model and request shapes.

use serde::{Deserialize, Serialize};

/// A news item shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub text: String,
    pub img: String,
    pub published_at: String,
    pub active: bool,
    pub popup: bool,
    pub rank: i64,
    pub created_at: String,
}

/// Request body for creating a news item. `publishedAt` is stamped
/// server-side at creation and ignored if supplied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub title: String,
    pub text: String,
    pub img: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub popup: bool,
    #[serde(default)]
    pub rank: i64,
}

fn default_active() -> bool {
    true
}

/// Request body for updating a news item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub popup: Option<bool>,
    #[serde(default)]
    pub rank: Option<i64>,
}
