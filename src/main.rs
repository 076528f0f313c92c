//! SCRC Community Website Backend
//!
//! A REST backend with SQLite persistence, local-disk blob storage, and a
//! static-token admin gate over every mutating route.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod mailer;
mod models;
mod notify;
mod storage;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use mailer::Mailer;
use notify::Notifier;
use storage::{BlobStore, LocalDiskStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub blobs: Arc<dyn BlobStore>,
    pub notifier: Notifier,
    pub mailer: Mailer,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SCRC backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_token == "changeme" {
        tracing::warn!("SCRC_ADMIN_TOKEN is not set; using the default token");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Initialize blob storage
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let blobs: Arc<dyn BlobStore> = Arc::new(LocalDiskStore::new(
        config.upload_dir.clone(),
        config.public_base_url.clone(),
    ));

    // Create application state
    let state = AppState {
        notifier: Notifier::new(repo.clone()),
        repo,
        blobs,
        mailer: Mailer::new(),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes; mutating handlers take the AdminGuard extractor
    let api_routes = Router::new()
        .route("/health", get(health_check))
        // Auth
        .route("/login", post(api::login))
        // Members: the GET segment is the member type, the mutating segment
        // is the record id
        .route("/members", post(api::create_member))
        .route(
            "/members/{id}",
            get(api::list_members)
                .put(api::update_member)
                .delete(api::delete_member),
        )
        // Reorder: static aliases, since the {id} routes shadow the wildcard
        .route("/members/reorder", put(api::reorder_members))
        .route("/news/reorder", put(api::reorder_news))
        .route("/gallery/reorder", put(api::reorder_gallery))
        .route("/notices/reorder", put(api::reorder_notices))
        .route("/memories/reorder", put(api::reorder_memories))
        .route("/{resource}/reorder", put(api::reorder))
        // News
        .route("/news", get(api::list_news).post(api::create_news))
        .route(
            "/news/{id}",
            put(api::update_news).delete(api::delete_news),
        )
        // Gallery
        .route(
            "/gallery",
            get(api::list_gallery).post(api::create_gallery_item),
        )
        .route(
            "/gallery/{id}",
            put(api::update_gallery_item).delete(api::delete_gallery_item),
        )
        // Notices
        .route(
            "/notices",
            get(api::list_notices).post(api::create_notice),
        )
        .route(
            "/notices/{id}",
            put(api::update_notice).delete(api::delete_notice),
        )
        // Memories
        .route(
            "/memories/albums",
            get(api::list_albums).post(api::create_album),
        )
        .route("/memories/albums/{album}", delete(api::delete_album))
        .route("/memories/{album}", get(api::list_album_images))
        .route("/memories/{album}/upload", post(api::upload_album_images))
        .route(
            "/memories/{album}/{filename}",
            delete(api::delete_album_image),
        )
        // Uploads and forms
        .route("/upload", post(api::upload))
        .route("/contact", post(api::contact))
        .route("/membership", post(api::membership))
        .route("/notifications/register", post(api::register_push_token));

    // Uploaded blobs are served back under /uploads
    let serve_uploads = ServeDir::new(&state.config.upload_dir);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .nest_service("/uploads", serve_uploads)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "ok": true }))
}

#[cfg(test)]
mod tests;
