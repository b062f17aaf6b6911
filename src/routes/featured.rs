use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::FeaturedContent;
use crate::InnerState;

/// Homepage content: categories in storage order with their latest videos,
/// plus the most recent non-premium video as the hero. A category created
/// while this runs may or may not appear; the two reads are deliberately
/// not transactional.
#[tracing::instrument(name = "featured_content", skip(inner))]
pub async fn featured_content(
    State(inner): State<InnerState>,
) -> Result<Json<FeaturedContent>, AppError> {
    let categories = inner.categories.all().await?;
    let featured = inner.videos.featured(&categories).await?;

    Ok(Json(featured))
}
