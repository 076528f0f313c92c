//! Reorder request shapes and the resource-name allow-list.

use serde::Deserialize;
use serde_json::Value;

/// Request body for `PUT /{resource}/reorder`.
///
/// Entries stay raw JSON so one malformed element never rejects the whole
/// batch; `valid_rank_updates` picks out the applicable ones.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    #[serde(default)]
    pub updates: Option<Vec<Value>>,
}

/// Extract the `(id, rank)` pairs from a reorder batch. Anything without a
/// string `id` and a JSON-number `rank` is dropped, whether the field is
/// absent or wrong-typed.
pub fn valid_rank_updates(updates: &[Value]) -> Vec<(String, i64)> {
    updates
        .iter()
        .filter_map(|entry| {
            let id = entry.get("id")?.as_str()?;
            let rank = entry.get("rank")?.as_f64()?;
            Some((id.to_string(), rank as i64))
        })
        .collect()
}

/// Internal tables reachable through the reorder endpoint. Anything outside
/// this allow-list is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderTable {
    Members,
    News,
    GalleryItems,
    Notices,
    MemoryImages,
}

impl ReorderTable {
    /// Map the external resource name to its table.
    pub fn from_resource(resource: &str) -> Option<Self> {
        match resource {
            "members" => Some(ReorderTable::Members),
            "news" => Some(ReorderTable::News),
            "gallery" => Some(ReorderTable::GalleryItems),
            "notices" => Some(ReorderTable::Notices),
            "memories" => Some(ReorderTable::MemoryImages),
            _ => None,
        }
    }

    pub fn table_name(&self) -> &'static str {
        match self {
            ReorderTable::Members => "members",
            ReorderTable::News => "news",
            ReorderTable::GalleryItems => "gallery_items",
            ReorderTable::Notices => "notices",
            ReorderTable::MemoryImages => "memory_images",
        }
    }
}
