use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::Category;
use crate::InnerState;

/// Category creation takes query parameters, not a JSON body.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryParams {
    pub name: String,
    pub description: Option<String>,
}

#[tracing::instrument(name = "all_categories", skip(inner))]
pub async fn all_categories(
    State(inner): State<InnerState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = inner.categories.list().await?;

    Ok(Json(categories))
}

#[tracing::instrument(name = "create_category", skip(inner))]
pub async fn create_category(
    State(inner): State<InnerState>,
    Query(params): Query<CreateCategoryParams>,
) -> Result<Json<Category>, AppError> {
    if params.name.is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }

    let category = inner
        .categories
        .create(params.name, params.description.unwrap_or_default())
        .await?;

    Ok(Json(category))
}
