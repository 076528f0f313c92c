//! REST API module.
//!
//! One handler module per route group. Handlers return `Result<_, AppError>`;
//! read-list endpoints degrade to an empty list on backend failure instead of
//! surfacing a 5xx, keeping the public pages rendering.

mod contact;
mod gallery;
mod login;
mod members;
mod memories;
mod news;
mod notices;
mod notifications;
mod reorder;
mod uploads;

pub use contact::*;
pub use gallery::*;
pub use login::*;
pub use members::*;
pub use memories::*;
pub use news::*;
pub use notices::*;
pub use notifications::*;
pub use reorder::*;
pub use uploads::*;

use axum::Json;
use serde_json::{json, Value};

/// The `{"ok": true}` acknowledgement body.
pub fn ok_body() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Query-string equality filters are compared literally to `"true"`; any
/// other value leaves the filter off.
pub fn flag_is_true(value: Option<&str>) -> bool {
    value == Some("true")
}
