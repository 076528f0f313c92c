//! Notice model and request shapes.

use serde::{Deserialize, Serialize};

/// A notice shown on the public site, optionally as a popup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub active: bool,
    pub popup: bool,
    pub rank: i64,
    pub created_at: String,
}

/// Request body for creating a notice.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticeRequest {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub media_url: Option<String>,
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

/// Request body for updating a notice.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoticeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub popup: Option<bool>,
    #[serde(default)]
    pub rank: Option<i64>,
}
