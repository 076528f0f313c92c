//! Data models for the SCRC community website.
//!
//! External JSON uses camelCase field names and `_id` as the identity field,
//! matching what the frontend already consumes; the storage layer uses
//! snake_case columns. Serde attributes carry the mapping in both directions.

mod gallery;
mod member;
mod memory;
mod news;
mod notice;
mod reorder;

pub use gallery::*;
pub use member::*;
pub use memory::*;
pub use news::*;
pub use notice::*;
pub use reorder::*;
