use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{CreateVideo, NewVideo, Video};
use crate::repository::VideoFilter;
use crate::source::{classify_url, VideoType};
use crate::youtube::VideoMetadata;
use crate::InnerState;

pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct ListVideosParams {
    pub category: Option<String>,
    pub is_premium: Option<bool>,
    pub is_live: Option<bool>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

/// Resolves the limit/skip window, rejecting out-of-bounds values before
/// anything reaches the repository.
pub(crate) fn resolve_list_window(
    limit: Option<i64>,
    skip: Option<i64>,
) -> Result<(i64, i64), AppError> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let skip = skip.unwrap_or(0);

    if !(0..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 0 and {}",
            MAX_PAGE_SIZE
        )));
    }
    if skip < 0 {
        return Err(AppError::Validation("skip must be >= 0".to_string()));
    }

    Ok((limit, skip))
}

/// Creates a video: classify the source URL, enrich YouTube entries,
/// merge, persist, return the stored document.
#[tracing::instrument(name = "create_video", skip(inner, input), fields(url = %input.url))]
pub async fn create_video(
    State(inner): State<InnerState>,
    Json(input): Json<CreateVideo>,
) -> Result<Json<Video>, AppError> {
    let source = classify_url(&input.url);

    let metadata = if source.video_type == VideoType::Youtube {
        match source.video_id.as_deref() {
            Some(id) => inner.youtube.fetch_metadata(id).await,
            None => VideoMetadata::default(),
        }
    } else {
        VideoMetadata::default()
    };

    let doc = NewVideo::from_submission(input, source, metadata);
    let video = inner.videos.create(doc).await?;

    Ok(Json(video))
}

#[tracing::instrument(name = "list_videos", skip(inner))]
pub async fn list_videos(
    State(inner): State<InnerState>,
    Query(params): Query<ListVideosParams>,
) -> Result<Json<Vec<Video>>, AppError> {
    let (limit, skip) = resolve_list_window(params.limit, params.skip)?;

    let filter = VideoFilter {
        category: params.category,
        is_premium: params.is_premium,
        is_live: params.is_live,
    };

    let videos = inner.videos.list(filter, limit, skip).await?;

    Ok(Json(videos))
}

#[tracing::instrument(name = "get_video", skip(inner))]
pub async fn get_video(
    State(inner): State<InnerState>,
    Path(id): Path<String>,
) -> Result<Json<Video>, AppError> {
    let video = inner.videos.get(&id).await?;

    Ok(Json(video))
}

#[tracing::instrument(name = "increment_view_count", skip(inner))]
pub async fn increment_view_count(
    State(inner): State<InnerState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    inner.videos.increment_view(&id).await?;

    Ok(Json(json!({ "message": "View count incremented" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_window_defaults() {
        let (limit, skip) = resolve_list_window(None, None).unwrap();
        assert_eq!(limit, 20);
        assert_eq!(skip, 0);
    }

    #[test]
    fn list_window_accepts_bounds() {
        let (limit, skip) = resolve_list_window(Some(100), Some(40)).unwrap();
        assert_eq!(limit, 100);
        assert_eq!(skip, 40);
    }

    #[test]
    fn list_window_rejects_oversized_limit() {
        let err = resolve_list_window(Some(101), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn list_window_rejects_negative_skip() {
        let err = resolve_list_window(None, Some(-1)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
