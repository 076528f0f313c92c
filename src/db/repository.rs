//! Database repository for CRUD operations.
//!
//! All list orderings are `rank ASC` with a secondary key (name for members,
//! `created_at DESC` for everything else). Deletes return the removed record.

use chrono::Utc;
use futures::future::join_all;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    AlbumCreated, AlbumSummary, CreateGalleryItemRequest, CreateMemberRequest, CreateNewsRequest,
    CreateNoticeRequest, GalleryItem, Member, MemberDetails, MemoryImage, News, Notice,
    ReorderTable, UpdateGalleryItemRequest, UpdateMemberRequest, UpdateNewsRequest,
    UpdateNoticeRequest,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== MEMBER OPERATIONS ====================

    /// List members of one type, ordered by rank then name.
    pub async fn list_members(&self, member_type: &str) -> Result<Vec<Member>, AppError> {
        let rows = sqlx::query(
            "SELECT id, type, name, img, rank, details, created_at, updated_at \
             FROM members WHERE type = ? ORDER BY rank ASC, name ASC",
        )
        .bind(member_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(member_from_row).collect())
    }

    /// Get a member by ID.
    pub async fn get_member(&self, id: &str) -> Result<Option<Member>, AppError> {
        let row = sqlx::query(
            "SELECT id, type, name, img, rank, details, created_at, updated_at \
             FROM members WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(member_from_row))
    }

    /// Create a new member.
    pub async fn create_member(&self, request: &CreateMemberRequest) -> Result<Member, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let details_json = details_to_json(&request.details);

        sqlx::query(
            "INSERT INTO members (id, type, name, img, rank, details, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.member_type)
        .bind(&request.name)
        .bind(&request.img)
        .bind(request.rank)
        .bind(&details_json)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Member {
            id,
            member_type: request.member_type.clone(),
            name: request.name.clone(),
            img: request.img.clone(),
            rank: request.rank,
            details: request.details.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a member. Missing fields keep their current values.
    pub async fn update_member(
        &self,
        id: &str,
        request: &UpdateMemberRequest,
    ) -> Result<Member, AppError> {
        let existing = self
            .get_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

        let now = Utc::now().to_rfc3339();
        let member_type = request
            .member_type
            .clone()
            .unwrap_or(existing.member_type);
        let name = request.name.clone().unwrap_or(existing.name);
        let img = request.img.clone().unwrap_or(existing.img);
        let rank = request.rank.unwrap_or(existing.rank);
        let details = request.details.clone().or(existing.details);
        let details_json = details_to_json(&details);

        sqlx::query(
            "UPDATE members SET type = ?, name = ?, img = ?, rank = ?, details = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&member_type)
        .bind(&name)
        .bind(&img)
        .bind(rank)
        .bind(&details_json)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Member {
            id: id.to_string(),
            member_type,
            name,
            img,
            rank,
            details,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a member, returning the deleted record.
    pub async fn delete_member(&self, id: &str) -> Result<Member, AppError> {
        let existing = self
            .get_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

        sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(existing)
    }

    // ==================== NEWS OPERATIONS ====================

    /// List news, optionally narrowed to active and/or popup items.
    pub async fn list_news(&self, active: bool, popup: bool) -> Result<Vec<News>, AppError> {
        let sql = filtered_list_sql(
            "SELECT id, title, text, img, published_at, active, popup, rank, created_at FROM news",
            active,
            popup,
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(news_from_row).collect())
    }

    /// Get a news item by ID.
    pub async fn get_news(&self, id: &str) -> Result<Option<News>, AppError> {
        let row = sqlx::query(
            "SELECT id, title, text, img, published_at, active, popup, rank, created_at \
             FROM news WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(news_from_row))
    }

    /// Create a news item; `published_at` is stamped here.
    pub async fn create_news(&self, request: &CreateNewsRequest) -> Result<News, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO news (id, title, text, img, published_at, active, popup, rank, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.text)
        .bind(&request.img)
        .bind(&now)
        .bind(request.active as i32)
        .bind(request.popup as i32)
        .bind(request.rank)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(News {
            id,
            title: request.title.clone(),
            text: request.text.clone(),
            img: request.img.clone(),
            published_at: now.clone(),
            active: request.active,
            popup: request.popup,
            rank: request.rank,
            created_at: now,
        })
    }

    /// Update a news item.
    pub async fn update_news(&self, id: &str, request: &UpdateNewsRequest) -> Result<News, AppError> {
        let existing = self
            .get_news(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

        let title = request.title.clone().unwrap_or(existing.title);
        let text = request.text.clone().unwrap_or(existing.text);
        let img = request.img.clone().unwrap_or(existing.img);
        let active = request.active.unwrap_or(existing.active);
        let popup = request.popup.unwrap_or(existing.popup);
        let rank = request.rank.unwrap_or(existing.rank);

        sqlx::query(
            "UPDATE news SET title = ?, text = ?, img = ?, active = ?, popup = ?, rank = ? \
             WHERE id = ?",
        )
        .bind(&title)
        .bind(&text)
        .bind(&img)
        .bind(active as i32)
        .bind(popup as i32)
        .bind(rank)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(News {
            id: id.to_string(),
            title,
            text,
            img,
            published_at: existing.published_at,
            active,
            popup,
            rank,
            created_at: existing.created_at,
        })
    }

    /// Delete a news item, returning the deleted record.
    pub async fn delete_news(&self, id: &str) -> Result<News, AppError> {
        let existing = self
            .get_news(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

        sqlx::query("DELETE FROM news WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(existing)
    }

    // ==================== GALLERY OPERATIONS ====================

    /// List gallery items.
    pub async fn list_gallery(&self) -> Result<Vec<GalleryItem>, AppError> {
        let rows = sqlx::query(
            "SELECT id, type, img, video_url, title, rank, created_at \
             FROM gallery_items ORDER BY rank ASC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(gallery_from_row).collect())
    }

    /// Get a gallery item by ID.
    pub async fn get_gallery_item(&self, id: &str) -> Result<Option<GalleryItem>, AppError> {
        let row = sqlx::query(
            "SELECT id, type, img, video_url, title, rank, created_at \
             FROM gallery_items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(gallery_from_row))
    }

    /// Create a gallery item.
    pub async fn create_gallery_item(
        &self,
        request: &CreateGalleryItemRequest,
    ) -> Result<GalleryItem, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO gallery_items (id, type, img, video_url, title, rank, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.kind)
        .bind(&request.img)
        .bind(&request.video_url)
        .bind(&request.title)
        .bind(request.rank)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(GalleryItem {
            id,
            kind: request.kind.clone(),
            img: request.img.clone(),
            video_url: request.video_url.clone(),
            title: request.title.clone(),
            rank: request.rank,
            created_at: now,
        })
    }

    /// Update a gallery item.
    pub async fn update_gallery_item(
        &self,
        id: &str,
        request: &UpdateGalleryItemRequest,
    ) -> Result<GalleryItem, AppError> {
        let existing = self
            .get_gallery_item(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

        let kind = request.kind.clone().unwrap_or(existing.kind);
        let img = request.img.clone().or(existing.img);
        let video_url = request.video_url.clone().or(existing.video_url);
        let title = request.title.clone().or(existing.title);
        let rank = request.rank.unwrap_or(existing.rank);

        sqlx::query(
            "UPDATE gallery_items SET type = ?, img = ?, video_url = ?, title = ?, rank = ? \
             WHERE id = ?",
        )
        .bind(&kind)
        .bind(&img)
        .bind(&video_url)
        .bind(&title)
        .bind(rank)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(GalleryItem {
            id: id.to_string(),
            kind,
            img,
            video_url,
            title,
            rank,
            created_at: existing.created_at,
        })
    }

    /// Delete a gallery item, returning the deleted record.
    pub async fn delete_gallery_item(&self, id: &str) -> Result<GalleryItem, AppError> {
        let existing = self
            .get_gallery_item(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

        sqlx::query("DELETE FROM gallery_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(existing)
    }

    // ==================== NOTICE OPERATIONS ====================

    /// List notices, optionally narrowed to active and/or popup items.
    pub async fn list_notices(&self, active: bool, popup: bool) -> Result<Vec<Notice>, AppError> {
        let sql = filtered_list_sql(
            "SELECT id, title, text, media_url, active, popup, rank, created_at FROM notices",
            active,
            popup,
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(notice_from_row).collect())
    }

    /// Get a notice by ID.
    pub async fn get_notice(&self, id: &str) -> Result<Option<Notice>, AppError> {
        let row = sqlx::query(
            "SELECT id, title, text, media_url, active, popup, rank, created_at \
             FROM notices WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(notice_from_row))
    }

    /// Create a notice.
    pub async fn create_notice(&self, request: &CreateNoticeRequest) -> Result<Notice, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO notices (id, title, text, media_url, active, popup, rank, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.text)
        .bind(&request.media_url)
        .bind(request.active as i32)
        .bind(request.popup as i32)
        .bind(request.rank)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Notice {
            id,
            title: request.title.clone(),
            text: request.text.clone(),
            media_url: request.media_url.clone(),
            active: request.active,
            popup: request.popup,
            rank: request.rank,
            created_at: now,
        })
    }

    /// Update a notice.
    pub async fn update_notice(
        &self,
        id: &str,
        request: &UpdateNoticeRequest,
    ) -> Result<Notice, AppError> {
        let existing = self
            .get_notice(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

        let title = request.title.clone().unwrap_or(existing.title);
        let text = request.text.clone().unwrap_or(existing.text);
        let media_url = request.media_url.clone().or(existing.media_url);
        let active = request.active.unwrap_or(existing.active);
        let popup = request.popup.unwrap_or(existing.popup);
        let rank = request.rank.unwrap_or(existing.rank);

        sqlx::query(
            "UPDATE notices SET title = ?, text = ?, media_url = ?, active = ?, popup = ?, rank = ? \
             WHERE id = ?",
        )
        .bind(&title)
        .bind(&text)
        .bind(&media_url)
        .bind(active as i32)
        .bind(popup as i32)
        .bind(rank)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Notice {
            id: id.to_string(),
            title,
            text,
            media_url,
            active,
            popup,
            rank,
            created_at: existing.created_at,
        })
    }

    /// Delete a notice, returning the deleted record.
    pub async fn delete_notice(&self, id: &str) -> Result<Notice, AppError> {
        let existing = self
            .get_notice(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

        sqlx::query("DELETE FROM notices WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(existing)
    }

    // ==================== REORDER ====================

    /// Apply rank updates to one table. Entries run concurrently and
    /// independently; a partially failed batch is logged but only reported
    /// as an error when every entry failed.
    pub async fn reorder(
        &self,
        table: ReorderTable,
        updates: &[(String, i64)],
    ) -> Result<(), AppError> {
        if updates.is_empty() {
            return Ok(());
        }

        let sql = format!("UPDATE {} SET rank = ? WHERE id = ?", table.table_name());

        let tasks = updates.iter().map(|(id, rank)| {
            let sql = sql.clone();
            let pool = self.pool.clone();
            async move {
                sqlx::query(&sql)
                    .bind(rank)
                    .bind(id)
                    .execute(&pool)
                    .await
                    .map(|_| ())
            }
        });

        let results = join_all(tasks).await;
        let failed = results.iter().filter(|r| r.is_err()).count();

        if failed > 0 {
            tracing::warn!(
                table = table.table_name(),
                failed,
                total = updates.len(),
                "Some reorder entries failed"
            );
        }

        if failed == results.len() {
            return Err(AppError::Database("All reorder entries failed".to_string()));
        }

        Ok(())
    }

    // ==================== ALBUM INDEX ====================

    /// List albums with derived image count and cover URL.
    pub async fn list_albums(&self) -> Result<Vec<AlbumSummary>, AppError> {
        let rows = sqlx::query(
            r#"SELECT a.name AS name,
                      COUNT(i.id) AS count,
                      (SELECT url FROM memory_images
                       WHERE album_id = a.id
                       ORDER BY rank ASC, created_at DESC
                       LIMIT 1) AS cover
               FROM memory_albums a
               LEFT JOIN memory_images i ON i.album_id = a.id
               GROUP BY a.id
               ORDER BY a.name ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| AlbumSummary {
                name: row.get("name"),
                count: row.get("count"),
                cover: row.get("cover"),
            })
            .collect())
    }

    /// Create an album. Duplicate names are rejected by the unique
    /// constraint and surface as a validation failure.
    pub async fn create_album(&self, name: &str) -> Result<AlbumCreated, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query("INSERT INTO memory_albums (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(&now)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(AlbumCreated {
                name: name.to_string(),
            }),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
                AppError::Validation("Album already exists".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve an album name to its ID.
    pub async fn find_album_id(&self, name: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT id FROM memory_albums WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("id")))
    }

    /// Delete an album row; its images cascade.
    pub async fn delete_album(&self, album_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM memory_albums WHERE id = ?")
            .bind(album_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List an album's images, ordered by rank then recency.
    pub async fn list_images(&self, album_id: &str) -> Result<Vec<MemoryImage>, AppError> {
        let rows = sqlx::query(
            "SELECT id, url, rank FROM memory_images \
             WHERE album_id = ? ORDER BY rank ASC, created_at DESC",
        )
        .bind(album_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| MemoryImage {
                id: row.get("id"),
                url: row.get("url"),
                rank: row.get("rank"),
            })
            .collect())
    }

    /// Record an uploaded image against its album.
    pub async fn insert_image(&self, album_id: &str, url: &str) -> Result<MemoryImage, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO memory_images (id, album_id, url, rank, created_at) VALUES (?, ?, ?, 0, ?)",
        )
        .bind(&id)
        .bind(album_id)
        .bind(url)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(MemoryImage { id, url: url.to_string(), rank: 0 })
    }

    /// Delete the image of an album whose URL ends with the exact object
    /// key, returning its URL. Matching is restricted to the album, so a
    /// filename shared with another album cannot delete the wrong image.
    pub async fn delete_image_by_key(
        &self,
        album_id: &str,
        key: &str,
    ) -> Result<Option<String>, AppError> {
        let rows = sqlx::query("SELECT id, url FROM memory_images WHERE album_id = ?")
            .bind(album_id)
            .fetch_all(&self.pool)
            .await?;

        let target = rows.into_iter().find_map(|row| {
            let id: String = row.get("id");
            let url: String = row.get("url");
            url.ends_with(key).then_some((id, url))
        });

        let Some((id, url)) = target else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM memory_images WHERE id = ?")
            .bind(&id)
            .execute(&self.pool)
            .await?;

        Ok(Some(url))
    }

    // ==================== PUSH TOKENS ====================

    /// Register a push token, deduplicated by exact value. Returns whether a
    /// new row was inserted.
    pub async fn register_push_token(&self, token: &str) -> Result<bool, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let result =
            sqlx::query("INSERT OR IGNORE INTO push_tokens (id, token, created_at) VALUES (?, ?, ?)")
                .bind(&id)
                .bind(token)
                .bind(&now)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All registered push tokens.
    pub async fn list_push_tokens(&self) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query("SELECT token FROM push_tokens ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.get("token")).collect())
    }
}

// Helper functions for row conversion

fn details_to_json(details: &Option<MemberDetails>) -> Option<String> {
    details
        .as_ref()
        .and_then(|d| serde_json::to_string(d).ok())
}

fn member_from_row(row: &sqlx::sqlite::SqliteRow) -> Member {
    let details_str: Option<String> = row.get("details");
    Member {
        id: row.get("id"),
        member_type: row.get("type"),
        name: row.get("name"),
        img: row.get("img"),
        rank: row.get("rank"),
        details: details_str.and_then(|s| serde_json::from_str::<MemberDetails>(&s).ok()),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn news_from_row(row: &sqlx::sqlite::SqliteRow) -> News {
    let active: i32 = row.get("active");
    let popup: i32 = row.get("popup");
    News {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        img: row.get("img"),
        published_at: row.get("published_at"),
        active: active != 0,
        popup: popup != 0,
        rank: row.get("rank"),
        created_at: row.get("created_at"),
    }
}

fn gallery_from_row(row: &sqlx::sqlite::SqliteRow) -> GalleryItem {
    GalleryItem {
        id: row.get("id"),
        kind: row.get("type"),
        img: row.get("img"),
        video_url: row.get("video_url"),
        title: row.get("title"),
        rank: row.get("rank"),
        created_at: row.get("created_at"),
    }
}

fn notice_from_row(row: &sqlx::sqlite::SqliteRow) -> Notice {
    let active: i32 = row.get("active");
    let popup: i32 = row.get("popup");
    Notice {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        media_url: row.get("media_url"),
        active: active != 0,
        popup: popup != 0,
        rank: row.get("rank"),
        created_at: row.get("created_at"),
    }
}

/// Build a list query with optional `active`/`popup` equality filters and the
/// standard ordering.
fn filtered_list_sql(base: &str, active: bool, popup: bool) -> String {
    let mut sql = base.to_string();
    let mut clauses = Vec::new();
    if active {
        clauses.push("active = 1");
    }
    if popup {
        clauses.push("popup = 1");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY rank ASC, created_at DESC");
    sql
}
