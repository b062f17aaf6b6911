use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Category, FeaturedCategory, FeaturedContent, NewVideo, Video};
use crate::repository::QUERY_TIMEOUT;

/// Exact-match filters for listing; absent fields are unconstrained.
#[derive(Debug, Default, Clone)]
pub struct VideoFilter {
    pub category: Option<String>,
    pub is_premium: Option<bool>,
    pub is_live: Option<bool>,
}

/// Owner of the `videos` table. Videos are created once and afterwards
/// mutated only through the view-count increment.
#[derive(Clone)]
pub struct VideoRepository {
    db: PgPool,
}

impl VideoRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, doc: NewVideo) -> Result<Video, AppError> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        let video = tokio::time::timeout(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Video>(
                r#"INSERT INTO videos
                   (id, title, description, url, thumbnail, category, tags, duration,
                    is_premium, is_live, video_type, video_id, embed_url, created_at, view_count)
                   VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                   RETURNING *"#,
            )
            .bind(id)
            .bind(doc.title)
            .bind(doc.description)
            .bind(doc.url)
            .bind(doc.thumbnail)
            .bind(doc.category)
            .bind(doc.tags)
            .bind(doc.duration)
            .bind(doc.is_premium)
            .bind(doc.is_live)
            .bind(doc.video_type)
            .bind(doc.video_id)
            .bind(doc.embed_url)
            .bind(created_at)
            .bind(doc.view_count)
            .fetch_one(&self.db),
        )
        .await??;

        Ok(video)
    }

    pub async fn get(&self, id: &str) -> Result<Video, AppError> {
        let video = tokio::time::timeout(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Video>(r#"SELECT * FROM videos WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.db),
        )
        .await??;

        video.ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    pub async fn list(
        &self,
        filter: VideoFilter,
        limit: i64,
        skip: i64,
    ) -> Result<Vec<Video>, AppError> {
        let videos = tokio::time::timeout(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Video>(
                r#"SELECT * FROM videos
                   WHERE ($1::text IS NULL OR category = $1)
                     AND ($2::boolean IS NULL OR is_premium = $2)
                     AND ($3::boolean IS NULL OR is_live = $3)
                   ORDER BY created_at DESC
                   OFFSET $4 LIMIT $5"#,
            )
            .bind(filter.category)
            .bind(filter.is_premium)
            .bind(filter.is_live)
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.db),
        )
        .await??;

        Ok(videos)
    }

    /// Case-insensitive substring match over title, description, category
    /// and any tag, newest first, with the total match count across all
    /// pages.
    pub async fn search(
        &self,
        query: &str,
        page: i64,
        per_page: i64,
    ) -> Result<(Vec<Video>, i64), AppError> {
        let pattern = format!("%{}%", escape_like(query));
        let skip = (page - 1) * per_page;

        let videos = tokio::time::timeout(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Video>(
                r#"SELECT * FROM videos
                   WHERE title ILIKE $1
                      OR description ILIKE $1
                      OR category ILIKE $1
                      OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE $1)
                   ORDER BY created_at DESC
                   OFFSET $2 LIMIT $3"#,
            )
            .bind(&pattern)
            .bind(skip)
            .bind(per_page)
            .fetch_all(&self.db),
        )
        .await??;

        let total = tokio::time::timeout(
            QUERY_TIMEOUT,
            sqlx::query_scalar::<_, i64>(
                r#"SELECT COUNT(*) FROM videos
                   WHERE title ILIKE $1
                      OR description ILIKE $1
                      OR category ILIKE $1
                      OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE $1)"#,
            )
            .bind(&pattern)
            .fetch_one(&self.db),
        )
        .await??;

        Ok((videos, total))
    }

    /// Single atomic increment; the row-level update is the only write
    /// path that ever touches `view_count` after creation.
    pub async fn increment_view(&self, id: &str) -> Result<(), AppError> {
        let result = tokio::time::timeout(
            QUERY_TIMEOUT,
            sqlx::query(r#"UPDATE videos SET view_count = view_count + 1 WHERE id = $1"#)
                .bind(id)
                .execute(&self.db),
        )
        .await??;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        Ok(())
    }

    /// Homepage aggregation: up to 10 most-recent videos per category,
    /// skipping empty categories, plus the latest non-premium video as the
    /// hero. Reads are independent and non-transactional.
    pub async fn featured(&self, categories: &[Category]) -> Result<FeaturedContent, AppError> {
        let mut sections = Vec::new();

        for category in categories {
            let videos = tokio::time::timeout(
                QUERY_TIMEOUT,
                sqlx::query_as::<_, Video>(
                    r#"SELECT * FROM videos WHERE category = $1
                       ORDER BY created_at DESC LIMIT 10"#,
                )
                .bind(&category.name)
                .fetch_all(&self.db),
            )
            .await??;

            if !videos.is_empty() {
                sections.push(FeaturedCategory {
                    category: category.name.clone(),
                    videos,
                });
            }
        }

        let hero_video = tokio::time::timeout(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Video>(
                r#"SELECT * FROM videos WHERE is_premium = FALSE
                   ORDER BY created_at DESC LIMIT 1"#,
            )
            .fetch_optional(&self.db),
        )
        .await??;

        Ok(FeaturedContent {
            hero_video,
            categories: sections,
        })
    }
}

/// Escapes LIKE metacharacters so the user's query always matches as a
/// literal substring.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_passes_plain_text_through() {
        assert_eq!(escape_like("business"), "business");
    }

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100%_done"), "100\\%\\_done");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn default_filter_is_unconstrained() {
        let filter = VideoFilter::default();
        assert!(filter.category.is_none());
        assert!(filter.is_premium.is_none());
        assert!(filter.is_live.is_none());
    }
}
