//! Integration tests for the SCRC backend.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::errors::ErrorBody;
use crate::mailer::Mailer;
use crate::notify::Notifier;
use crate::storage::{BlobStore, LocalDiskStore};
use crate::{create_router, AppState};

const TEST_ADMIN_TOKEN: &str = "test-admin-token";

/// Test fixture for integration tests.
struct TestFixture {
    /// Client sending the admin token on every request
    admin: Client,
    /// Client with no credentials
    public: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let upload_dir = temp_dir.path().join("uploads");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        tokio::fs::create_dir_all(&upload_dir)
            .await
            .expect("Failed to create upload dir");
        let blobs: Arc<dyn BlobStore> =
            Arc::new(LocalDiskStore::new(upload_dir.clone(), String::new()));

        // Create config
        let config = Config {
            admin_token: TEST_ADMIN_TOKEN.to_string(),
            admin_user: "admin".to_string(),
            admin_pass: "secret".to_string(),
            db_path,
            upload_dir,
            public_base_url: String::new(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            max_upload_files: 50,
        };

        let state = AppState {
            notifier: Notifier::new(repo.clone()),
            repo,
            blobs,
            mailer: Mailer::new(),
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("x-admin-token", TEST_ADMIN_TOKEN.parse().unwrap());

        TestFixture {
            admin: Client::builder().default_headers(headers).build().unwrap(),
            public: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .public
        .get(fixture.url("/api/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_login_success() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .public
        .post(fixture.url("/api/login"))
        .json(&json!({ "username": "admin", "password": "secret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["token"], TEST_ADMIN_TOKEN);
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .public
        .post(fixture.url("/api/login"))
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: ErrorBody = resp.json().await.unwrap();
    assert_eq!(body.error, "Unauthorized");
}

#[tokio::test]
async fn test_create_member_requires_admin() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .public
        .post(fixture.url("/api/members"))
        .json(&json!({ "type": "Founding", "name": "X", "img": "/x.jpg" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Nothing was created
    let list: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/members/Founding"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_member_crud_round_trip() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .admin
        .post(fixture.url("/api/members"))
        .json(&json!({
            "type": "Founding",
            "name": "Ram Prasad",
            "img": "/members/1.jpg",
            "rank": 2,
            "details": { "phone": "+977-9812345678", "position": "Chair" }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    let id = created["_id"].as_str().unwrap().to_string();
    assert_eq!(created["type"], "Founding");
    assert_eq!(created["details"]["phone"], "+977-9812345678");

    // Fetch through the list exposes the same external names and values
    let list: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/members/Founding"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["_id"], id.as_str());
    assert_eq!(list[0]["name"], "Ram Prasad");
    assert_eq!(list[0]["details"]["position"], "Chair");
    assert!(list[0].get("id").is_none());

    // Update; a client-supplied _id is ignored
    let resp = fixture
        .admin
        .put(fixture.url(&format!("/api/members/{}", id)))
        .json(&json!({ "_id": "spoofed", "name": "Ram P. Sharma" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["_id"], id.as_str());
    assert_eq!(updated["name"], "Ram P. Sharma");

    // Delete returns the deleted record; a second delete is a 404
    let resp = fixture
        .admin
        .delete(fixture.url(&format!("/api/members/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let deleted: Value = resp.json().await.unwrap();
    assert_eq!(deleted["name"], "Ram P. Sharma");

    let resp = fixture
        .admin
        .delete(fixture.url(&format!("/api/members/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_member_list_filters_and_orders() {
    let fixture = TestFixture::new().await;

    for (ty, name, rank) in [
        ("Founding", "Bishnu", 2),
        ("Founding", "Chandra", 1),
        ("Founding", "Asha", 1),
        ("helper", "Hari", 0),
    ] {
        let resp = fixture
            .admin
            .post(fixture.url("/api/members"))
            .json(&json!({ "type": ty, "name": name, "img": "/i.jpg", "rank": rank }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let list: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/members/Founding"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Only the requested type, ordered by rank then name
    let names: Vec<&str> = list.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Asha", "Chandra", "Bishnu"]);

    // Unknown types yield an empty list
    let list: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/members/unknown-type"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_member_invalid_type_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .admin
        .post(fixture.url("/api/members"))
        .json(&json!({ "type": "founding", "name": "X", "img": "/x.jpg" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_news_defaults_and_published_at() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .admin
        .post(fixture.url("/api/news"))
        .json(&json!({ "title": "AGM", "text": "Annual meeting", "img": "/n.jpg" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["active"], true);
    assert_eq!(created["popup"], false);
    assert!(!created["publishedAt"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_news_active_filter() {
    let fixture = TestFixture::new().await;

    for (title, active) in [("visible", true), ("hidden", false)] {
        fixture
            .admin
            .post(fixture.url("/api/news"))
            .json(&json!({ "title": title, "text": "t", "img": "/n.jpg", "active": active }))
            .send()
            .await
            .unwrap();
    }

    let all: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/news"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let active_only: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/news?active=true"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(active_only.len(), 1);
    assert_eq!(active_only[0]["title"], "visible");
}

#[tokio::test]
async fn test_notices_popup_filter() {
    let fixture = TestFixture::new().await;

    for (title, active, popup) in [
        ("active popup", true, true),
        ("active plain", true, false),
        ("inactive popup", false, true),
    ] {
        fixture
            .admin
            .post(fixture.url("/api/notices"))
            .json(&json!({ "title": title, "text": "t", "active": active, "popup": popup }))
            .send()
            .await
            .unwrap();
    }

    // popup=true alone ignores the active flag
    let popup_only: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/notices?popup=true"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(popup_only.len(), 2);
    assert!(popup_only.iter().all(|n| n["popup"] == true));

    // Combined filters narrow to active popups
    let both: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/notices?active=true&popup=true"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0]["title"], "active popup");

    // Anything other than the literal "true" leaves the filter off
    let all: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/notices?popup=1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_reorder_applies_valid_entries() {
    let fixture = TestFixture::new().await;

    let mut ids = Vec::new();
    for title in ["first", "second"] {
        let created: Value = fixture
            .admin
            .post(fixture.url("/api/news"))
            .json(&json!({ "title": title, "text": "t", "img": "/n.jpg" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        ids.push(created["_id"].as_str().unwrap().to_string());
    }

    // Mixed batch: one valid entry, one without an id, one without a rank
    let resp = fixture
        .admin
        .put(fixture.url("/api/news/reorder"))
        .json(&json!({ "updates": [
            { "id": ids[0], "rank": 5 },
            { "rank": 1 },
            { "id": ids[1] }
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);

    let list: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/news"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let first = list.iter().find(|n| n["_id"] == ids[0].as_str()).unwrap();
    let second = list.iter().find(|n| n["_id"] == ids[1].as_str()).unwrap();
    assert_eq!(first["rank"], 5);
    assert_eq!(second["rank"], 0);
}

#[tokio::test]
async fn test_reorder_tolerates_wrong_typed_entries() {
    let fixture = TestFixture::new().await;

    let mut ids = Vec::new();
    for title in ["alpha", "beta"] {
        let created: Value = fixture
            .admin
            .post(fixture.url("/api/news"))
            .json(&json!({ "title": title, "text": "t", "img": "/n.jpg" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        ids.push(created["_id"].as_str().unwrap().to_string());
    }

    // A string rank or a non-string id must not poison the batch
    let resp = fixture
        .admin
        .put(fixture.url("/api/news/reorder"))
        .json(&json!({ "updates": [
            { "id": ids[0], "rank": 5 },
            { "id": ids[1], "rank": "2" },
            { "id": 3, "rank": 1 }
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);

    let list: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/news"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let first = list.iter().find(|n| n["_id"] == ids[0].as_str()).unwrap();
    let second = list.iter().find(|n| n["_id"] == ids[1].as_str()).unwrap();
    assert_eq!(first["rank"], 5);
    assert_eq!(second["rank"], 0);
}

#[tokio::test]
async fn test_reorder_rejects_unknown_resource() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .admin
        .put(fixture.url("/api/widgets/reorder"))
        .json(&json!({ "updates": [{ "id": "x", "rank": 1 }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_notice_crud() {
    let fixture = TestFixture::new().await;

    let created: Value = fixture
        .admin
        .post(fixture.url("/api/notices"))
        .json(&json!({ "title": "Closure", "text": "Office closed", "mediaUrl": "/m.pdf" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["_id"].as_str().unwrap().to_string();
    assert_eq!(created["mediaUrl"], "/m.pdf");

    let resp = fixture
        .admin
        .put(fixture.url(&format!("/api/notices/{}", id)))
        .json(&json!({ "popup": true }))
        .send()
        .await
        .unwrap();
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["popup"], true);
    assert_eq!(updated["title"], "Closure");

    let resp = fixture
        .admin
        .delete(fixture.url(&format!("/api/notices/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .admin
        .delete(fixture.url(&format!("/api/notices/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_gallery_video_default() {
    let fixture = TestFixture::new().await;

    let created: Value = fixture
        .admin
        .post(fixture.url("/api/gallery"))
        .json(&json!({ "videoUrl": "https://youtu.be/abc", "title": "Event" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["type"], "video");
    assert_eq!(created["videoUrl"], "https://youtu.be/abc");

    let resp = fixture
        .admin
        .post(fixture.url("/api/gallery"))
        .json(&json!({ "type": "gif", "img": "/g.gif" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_album_name_sanitization() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .admin
        .post(fixture.url("/api/memories/albums"))
        .json(&json!({ "name": "../../etc" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "etc");

    let resp = fixture
        .admin
        .post(fixture.url("/api/memories/albums"))
        .json(&json!({ "name": "***" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_album_duplicate_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .admin
        .post(fixture.url("/api/memories/albums"))
        .json(&json!({ "name": "Dashain" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = fixture
        .admin
        .post(fixture.url("/api/memories/albums"))
        .json(&json!({ "name": "Dashain" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_album_upload_list_delete_flow() {
    let fixture = TestFixture::new().await;

    fixture
        .admin
        .post(fixture.url("/api/memories/albums"))
        .json(&json!({ "name": "Tihar" }))
        .send()
        .await
        .unwrap();

    // Fresh album: count 0, no cover
    let albums: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/memories/albums"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0]["count"], 0);
    assert!(albums[0].get("cover").is_none());

    // Upload two images
    let form = Form::new()
        .part(
            "images",
            Part::bytes(b"first-image".to_vec())
                .file_name("a.jpg")
                .mime_str("image/jpeg")
                .unwrap(),
        )
        .part(
            "images",
            Part::bytes(b"second-image".to_vec())
                .file_name("b.png")
                .mime_str("image/png")
                .unwrap(),
        );
    let resp = fixture
        .admin
        .post(fixture.url("/api/memories/Tihar/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    let uploaded = body["uploaded"].as_array().unwrap();
    assert_eq!(uploaded.len(), 2);

    // Album index reflects the uploads
    let albums: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/memories/albums"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(albums[0]["count"], 2);
    assert!(albums[0]["cover"].as_str().unwrap().contains("/uploads/memories/Tihar/"));

    // Stored blob is served back at its public URL
    let first_url = uploaded[0].as_str().unwrap();
    let resp = fixture
        .public
        .get(fixture.url(first_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Delete one image by filename
    let filename = first_url.rsplit('/').next().unwrap();
    let resp = fixture
        .admin
        .delete(fixture.url(&format!("/api/memories/Tihar/{}", filename)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let images: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/memories/Tihar"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(images.len(), 1);

    // Deleting the album removes the remaining image and the blob
    let remaining_url = images[0]["url"].as_str().unwrap().to_string();
    let resp = fixture
        .admin
        .delete(fixture.url("/api/memories/albums/Tihar"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let images: Vec<Value> = fixture
        .public
        .get(fixture.url("/api/memories/Tihar"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(images.is_empty());

    let resp = fixture
        .public
        .get(fixture.url(&remaining_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Second album delete is a 404, not a crash
    let resp = fixture
        .admin
        .delete(fixture.url("/api/memories/albums/Tihar"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_upload_to_unknown_album() {
    let fixture = TestFixture::new().await;

    let form = Form::new().part(
        "images",
        Part::bytes(b"img".to_vec())
            .file_name("a.jpg")
            .mime_str("image/jpeg")
            .unwrap(),
    );
    let resp = fixture
        .admin
        .post(fixture.url("/api/memories/Nowhere/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_generic_upload() {
    let fixture = TestFixture::new().await;

    let form = Form::new().part(
        "image",
        Part::bytes(b"banner-bytes".to_vec())
            .file_name("banner.jpg")
            .mime_str("image/jpeg")
            .unwrap(),
    );
    let resp = fixture
        .admin
        .post(fixture.url("/api/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/uploads/"));
    assert!(url.ends_with(".jpg"));

    let resp = fixture.public.get(fixture.url(url)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"banner-bytes");

    // Missing file field
    let form = Form::new().text("other", "x");
    let resp = fixture
        .admin
        .post(fixture.url("/api/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_contact_form() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .public
        .post(fixture.url("/api/contact"))
        .json(&json!({ "name": "Sita", "email": "sita@example.com", "message": "Namaste" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);

    let resp = fixture
        .public
        .post(fixture.url("/api/contact"))
        .json(&json!({ "name": "Sita", "message": "no email" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_membership_form() {
    let fixture = TestFixture::new().await;

    let form = Form::new()
        .text("name", "Gopal")
        .text("email", "gopal@example.com")
        .text("phone", "9800000000")
        .part(
            "photo",
            Part::bytes(b"photo".to_vec())
                .file_name("photo.jpg")
                .mime_str("image/jpeg")
                .unwrap(),
        )
        .part(
            "citizenship",
            Part::bytes(b"doc".to_vec())
                .file_name("citizenship.pdf")
                .mime_str("application/pdf")
                .unwrap(),
        );
    let resp = fixture
        .public
        .post(fixture.url("/api/membership"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Missing applicant identity
    let form = Form::new().text("phone", "9800000000");
    let resp = fixture
        .public
        .post(fixture.url("/api/membership"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_push_token_registration_dedup() {
    let fixture = TestFixture::new().await;

    for _ in 0..2 {
        let resp = fixture
            .public
            .post(fixture.url("/api/notifications/register"))
            .json(&json!({ "token": "ExpoPushToken[abc123]" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let resp = fixture
        .public
        .post(fixture.url("/api/notifications/register"))
        .json(&json!({ "token": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_mutating_routes_require_admin() {
    let fixture = TestFixture::new().await;

    let cases = [
        ("POST", "/api/news"),
        ("PUT", "/api/news/some-id"),
        ("DELETE", "/api/notices/some-id"),
        ("POST", "/api/memories/albums"),
        ("PUT", "/api/members/reorder"),
        ("POST", "/api/upload"),
    ];

    for (method, path) in cases {
        let req = match method {
            "POST" => fixture.public.post(fixture.url(path)),
            "PUT" => fixture.public.put(fixture.url(path)),
            _ => fixture.public.delete(fixture.url(path)),
        };
        let resp = req.json(&json!({})).send().await.unwrap();
        assert_eq!(resp.status(), 401, "{} {} should be gated", method, path);
    }
}
