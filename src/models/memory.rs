//! Memories album models.
//!
//! Albums group uploaded images; the album listing carries a derived image
//! count and cover URL computed from the image table.

use serde::{Deserialize, Serialize};

/// Album entry in the `/memories/albums` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub name: String,
    pub count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// A single image inside an album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryImage {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    pub rank: i64,
}

/// Request body for creating an album.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlbumRequest {
    #[serde(default)]
    pub name: String,
}

/// Response for album creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumCreated {
    pub name: String,
}
