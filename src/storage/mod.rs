//! Blob storage for uploaded files.
//!
//! `BlobStore` is the capability seam: handlers only see paths and public
//! URLs, so a managed object store could be dropped in behind the same
//! trait. The shipped implementation writes to a local directory that is
//! served back at `/uploads`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;

/// Metadata for one stored object or directory-like prefix.
#[derive(Debug, Clone)]
pub struct ObjectMeta {
    pub name: String,
    pub is_file: bool,
}

/// Content storage returning a publicly resolvable URL per stored object.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `path` and return the public URL.
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, AppError>;

    /// Best-effort batch delete; a missing object is not an error.
    async fn remove(&self, paths: &[String]) -> Result<(), AppError>;

    /// Entries directly under a path prefix. An absent prefix is an empty
    /// listing, not an error.
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectMeta>, AppError>;

    /// Public URL for a stored path.
    fn url_for(&self, path: &str) -> String;

    /// Inverse of `url_for`; `None` when the URL was not produced by this
    /// store.
    fn path_from_url(&self, url: &str) -> Option<String>;
}

/// Blob store backed by a local directory, with URLs under `/uploads`.
pub struct LocalDiskStore {
    root: PathBuf,
    public_base: String,
}

impl LocalDiskStore {
    pub fn new(root: PathBuf, public_base: String) -> Self {
        Self { root, public_base }
    }

    /// Resolve a stored path under the root, rejecting traversal segments.
    fn resolve(&self, path: &str) -> Result<PathBuf, AppError> {
        let rel = Path::new(path);
        if rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(AppError::BadRequest("Invalid path".to_string()));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl BlobStore for LocalDiskStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, AppError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        Ok(self.url_for(path))
    }

    async fn remove(&self, paths: &[String]) -> Result<(), AppError> {
        for path in paths {
            let target = match self.resolve(path) {
                Ok(t) => t,
                Err(_) => continue,
            };
            if let Err(e) = tokio::fs::remove_file(&target).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to remove blob {}: {}", path, e);
                }
            }
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectMeta>, AppError> {
        let dir = self.resolve(prefix)?;
        let mut entries = Vec::new();

        let mut read_dir = match tokio::fs::read_dir(&dir).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(entries),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = read_dir.next_entry().await? {
            let file_type = entry.file_type().await?;
            entries.push(ObjectMeta {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_file: file_type.is_file(),
            });
        }

        Ok(entries)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/uploads/{}", self.public_base, path)
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(&self.public_base).unwrap_or(url);
        rest.strip_prefix("/uploads/").map(|s| s.to_string())
    }
}

/// Restrict a user-supplied album/folder name to `[A-Za-z0-9_- ]`, trimmed.
/// Returns `None` when nothing survives.
pub fn sanitize_folder_name(name: &str) -> Option<String> {
    let safe: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .collect();
    let safe = safe.trim().to_string();
    if safe.is_empty() {
        None
    } else {
        Some(safe)
    }
}

/// Build a collision-free object path: `{category}/{folder}/{millis}_{suffix}{ext}`.
/// The extension is taken from the original filename.
pub fn object_path(category: &str, folder: Option<&str>, original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let suffix: String = uuid::Uuid::new_v4().simple().to_string()[..6].to_string();
    let file = format!("{}_{}{}", Utc::now().timestamp_millis(), suffix, ext);

    match folder {
        Some(folder) => format!("{}/{}/{}", category, folder, file),
        None => format!("{}/{}", category, file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_invalid_chars() {
        assert_eq!(
            sanitize_folder_name("../../etc"),
            Some("etc".to_string())
        );
        assert_eq!(
            sanitize_folder_name("Dashain 2080!"),
            Some("Dashain 2080".to_string())
        );
        assert_eq!(
            sanitize_folder_name("  photo_album-1  "),
            Some("photo_album-1".to_string())
        );
    }

    #[test]
    fn test_sanitize_rejects_all_invalid() {
        assert_eq!(sanitize_folder_name("***"), None);
        assert_eq!(sanitize_folder_name("   "), None);
        assert_eq!(sanitize_folder_name(""), None);
    }

    #[test]
    fn test_object_path_shape() {
        let path = object_path("memories", Some("Dashain"), "photo.JPG");
        assert!(path.starts_with("memories/Dashain/"));
        assert!(path.ends_with(".JPG"));

        let flat = object_path("uploads", None, "noext");
        assert!(flat.starts_with("uploads/"));
        assert!(!flat.contains("//"));
    }

    #[test]
    fn test_url_round_trip() {
        let store = LocalDiskStore::new(PathBuf::from("/tmp/x"), "http://cdn.test".to_string());
        let url = store.url_for("memories/a/b.jpg");
        assert_eq!(url, "http://cdn.test/uploads/memories/a/b.jpg");
        assert_eq!(
            store.path_from_url(&url),
            Some("memories/a/b.jpg".to_string())
        );

        let rootless = LocalDiskStore::new(PathBuf::from("/tmp/x"), String::new());
        assert_eq!(rootless.url_for("uploads/f.png"), "/uploads/uploads/f.png");
    }

    #[tokio::test]
    async fn test_put_list_remove_flow() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = LocalDiskStore::new(dir.path().to_path_buf(), String::new());

        store
            .put("memories/Holi/1_ab.jpg", b"a".to_vec(), "image/jpeg")
            .await
            .unwrap();
        store
            .put("memories/Holi/2_cd.jpg", b"b".to_vec(), "image/jpeg")
            .await
            .unwrap();

        let mut names: Vec<String> = store
            .list("memories/Holi")
            .await
            .unwrap()
            .into_iter()
            .filter(|o| o.is_file)
            .map(|o| o.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["1_ab.jpg", "2_cd.jpg"]);

        // The album prefix itself shows up as a directory entry
        let under_root = store.list("memories").await.unwrap();
        assert!(under_root.iter().any(|o| o.name == "Holi" && !o.is_file));

        store
            .remove(&[
                "memories/Holi/1_ab.jpg".to_string(),
                "memories/Holi/missing.jpg".to_string(),
            ])
            .await
            .unwrap();
        let remaining = store.list("memories/Holi").await.unwrap();
        assert_eq!(remaining.len(), 1);

        // Unknown prefixes list as empty
        assert!(store.list("memories/Nothing").await.unwrap().is_empty());
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let store = LocalDiskStore::new(PathBuf::from("/tmp/x"), String::new());
        assert!(store.resolve("../secret").is_err());
        assert!(store.resolve("/etc/passwd").is_err());
        assert!(store.resolve("memories/ok.jpg").is_ok());
    }
}
