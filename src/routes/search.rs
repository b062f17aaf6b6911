use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::SearchResponse;
use crate::routes::videos::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::InnerState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

pub(crate) fn resolve_search_window(
    page: Option<i64>,
    per_page: Option<i64>,
) -> Result<(i64, i64), AppError> {
    let page = page.unwrap_or(1);
    let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE);

    if page < 1 {
        return Err(AppError::Validation("page must be >= 1".to_string()));
    }
    if !(0..=MAX_PAGE_SIZE).contains(&per_page) {
        return Err(AppError::Validation(format!(
            "per_page must be between 0 and {}",
            MAX_PAGE_SIZE
        )));
    }

    Ok((page, per_page))
}

#[tracing::instrument(name = "search_videos", skip(inner))]
pub async fn search_videos(
    State(inner): State<InnerState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    if params.q.is_empty() {
        return Err(AppError::Validation("q must not be empty".to_string()));
    }

    let (page, per_page) = resolve_search_window(params.page, params.per_page)?;

    let (videos, total) = inner.videos.search(&params.q, page, per_page).await?;

    Ok(Json(SearchResponse {
        videos,
        total,
        page,
        per_page,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_window_defaults() {
        let (page, per_page) = resolve_search_window(None, None).unwrap();
        assert_eq!(page, 1);
        assert_eq!(per_page, 20);
    }

    #[test]
    fn search_window_rejects_zero_page() {
        let err = resolve_search_window(Some(0), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn search_window_rejects_oversized_per_page() {
        let err = resolve_search_window(None, Some(500)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
