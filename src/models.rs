use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored video document. This struct is both the row mapping and the
/// wire shape; nothing beyond these columns is ever exposed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail: String,
    pub category: String,
    pub tags: Vec<String>,
    pub duration: Option<String>,
    pub is_premium: bool,
    pub is_live: bool,
    pub video_type: String,
    pub video_id: Option<String>,
    pub embed_url: String,
    pub created_at: DateTime<Utc>,
    pub view_count: i64,
}

/// Caller-supplied fields for `POST /api/videos`. Derived fields
/// (`video_type`, `video_id`, `embed_url`) and server-assigned fields
/// (`id`, `created_at`, `view_count`) are filled in during creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_live: bool,
}

/// A fully-resolved video ready for insertion: caller fields merged with
/// enrichment, plus the derived source fields. `id` and `created_at` are
/// assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail: String,
    pub category: String,
    pub tags: Vec<String>,
    pub duration: Option<String>,
    pub is_premium: bool,
    pub is_live: bool,
    pub video_type: String,
    pub video_id: Option<String>,
    pub embed_url: String,
    pub view_count: i64,
}

impl NewVideo {
    /// Merges enrichment over the caller-supplied fields. An enriched
    /// field wins only when present; otherwise the caller's value (or its
    /// default) stands. Callers pass an empty `VideoMetadata` for sources
    /// that are not enriched.
    pub fn from_submission(
        input: CreateVideo,
        source: crate::source::SourceInfo,
        metadata: crate::youtube::VideoMetadata,
    ) -> Self {
        Self {
            title: metadata.title.unwrap_or(input.title),
            description: metadata.description.unwrap_or(input.description),
            url: input.url,
            thumbnail: metadata.thumbnail.unwrap_or(input.thumbnail),
            category: input.category,
            tags: input.tags,
            duration: metadata.duration.or(input.duration),
            is_premium: input.is_premium,
            is_live: input.is_live,
            video_type: source.video_type.as_str().to_string(),
            video_id: source.video_id,
            embed_url: source.embed_url,
            view_count: metadata.view_count.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub videos: Vec<Video>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Serialize)]
pub struct FeaturedCategory {
    pub category: String,
    pub videos: Vec<Video>,
}

#[derive(Debug, Serialize)]
pub struct FeaturedContent {
    pub hero_video: Option<Video>,
    pub categories: Vec<FeaturedCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::classify_url;
    use crate::youtube::VideoMetadata;

    fn submission() -> CreateVideo {
        CreateVideo {
            title: "Caller title".to_string(),
            description: "Caller description".to_string(),
            url: "https://youtu.be/abc123".to_string(),
            thumbnail: "https://example.com/thumb.jpg".to_string(),
            category: "Business".to_string(),
            tags: vec!["finance".to_string()],
            duration: None,
            is_premium: false,
            is_live: false,
        }
    }

    #[test]
    fn enriched_fields_override_caller_fields() {
        let input = submission();
        let source = classify_url(&input.url);
        let metadata = VideoMetadata {
            title: Some("Enriched title".to_string()),
            description: None,
            thumbnail: Some("https://i.ytimg.com/vi/abc123/hqdefault.jpg".to_string()),
            duration: Some("PT4M13S".to_string()),
            view_count: Some(1543),
        };

        let doc = NewVideo::from_submission(input, source, metadata);
        assert_eq!(doc.title, "Enriched title");
        assert_eq!(doc.description, "Caller description");
        assert_eq!(doc.thumbnail, "https://i.ytimg.com/vi/abc123/hqdefault.jpg");
        assert_eq!(doc.duration.as_deref(), Some("PT4M13S"));
        assert_eq!(doc.view_count, 1543);
        assert_eq!(doc.video_type, "youtube");
        assert_eq!(doc.video_id.as_deref(), Some("abc123"));
        assert_eq!(doc.embed_url, "https://www.youtube.com/embed/abc123");
    }

    #[test]
    fn empty_enrichment_keeps_caller_fields() {
        let input = submission();
        let source = classify_url(&input.url);

        let doc = NewVideo::from_submission(input.clone(), source, VideoMetadata::default());
        assert_eq!(doc.title, input.title);
        assert_eq!(doc.description, input.description);
        assert_eq!(doc.thumbnail, input.thumbnail);
        assert_eq!(doc.duration, None);
        assert_eq!(doc.view_count, 0);
    }

    #[test]
    fn direct_source_has_no_video_id() {
        let mut input = submission();
        input.url = "https://example.com/video.mp4".to_string();
        let source = classify_url(&input.url);

        let doc = NewVideo::from_submission(input, source, VideoMetadata::default());
        assert_eq!(doc.video_type, "direct");
        assert_eq!(doc.video_id, None);
        assert_eq!(doc.embed_url, "https://example.com/video.mp4");
    }

    #[test]
    fn create_video_defaults_optional_fields() {
        let body = serde_json::json!({
            "title": "Quarterly outlook",
            "description": "Panel discussion",
            "url": "https://youtu.be/abc123",
            "thumbnail": "https://example.com/thumb.jpg",
            "category": "Business"
        });

        let input: CreateVideo = serde_json::from_value(body).unwrap();
        assert!(input.tags.is_empty());
        assert!(input.duration.is_none());
        assert!(!input.is_premium);
        assert!(!input.is_live);
    }
}
