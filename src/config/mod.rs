//! Configuration module for the SCRC backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Static admin token gating all mutating routes
    pub admin_token: String,
    /// Admin login username
    pub admin_user: String,
    /// Admin login password
    pub admin_pass: String,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Root directory for uploaded blobs
    pub upload_dir: PathBuf,
    /// Base URL prepended to public blob URLs (empty means root-relative)
    pub public_base_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Maximum number of files accepted in one album upload
    pub max_upload_files: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_token = env::var("SCRC_ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string());
        let admin_user = env::var("SCRC_ADMIN_USER").unwrap_or_else(|_| "admin".to_string());
        let admin_pass = env::var("SCRC_ADMIN_PASS").unwrap_or_else(|_| "admin".to_string());

        let db_path = env::var("SCRC_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let upload_dir = env::var("SCRC_UPLOAD_DIR")
            .unwrap_or_else(|_| "./data/uploads".to_string())
            .into();

        let public_base_url = env::var("SCRC_PUBLIC_BASE_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_default();

        let bind_addr = env::var("SCRC_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid SCRC_BIND_ADDR format");

        let log_level = env::var("SCRC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let max_upload_files = env::var("SCRC_MAX_UPLOAD_FILES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);

        Self {
            admin_token,
            admin_user,
            admin_pass,
            db_path,
            upload_dir,
            public_base_url,
            bind_addr,
            log_level,
            max_upload_files,
        }
    }
}
