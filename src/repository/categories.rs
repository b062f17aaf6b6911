use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Category;
use crate::repository::QUERY_TIMEOUT;

/// Owner of the `categories` table. Names are plain labels: no uniqueness
/// constraint and no foreign key from `videos.category`, so renames and
/// deletes elsewhere would leave orphaned labels by design.
#[derive(Clone)]
pub struct CategoryRepository {
    db: PgPool,
}

impl CategoryRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: String, description: String) -> Result<Category, AppError> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now();

        let category = tokio::time::timeout(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Category>(
                r#"INSERT INTO categories (id, name, description, created_at)
                   VALUES ($1, $2, $3, $4) RETURNING *"#,
            )
            .bind(id)
            .bind(name)
            .bind(description)
            .bind(created_at)
            .fetch_one(&self.db),
        )
        .await??;

        Ok(category)
    }

    /// All categories, sorted by name for the listing endpoint.
    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        let categories = tokio::time::timeout(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Category>(r#"SELECT * FROM categories ORDER BY name ASC"#)
                .fetch_all(&self.db),
        )
        .await??;

        Ok(categories)
    }

    /// All categories in storage order, used by the featured aggregation.
    pub async fn all(&self) -> Result<Vec<Category>, AppError> {
        let categories = tokio::time::timeout(
            QUERY_TIMEOUT,
            sqlx::query_as::<_, Category>(r#"SELECT * FROM categories"#).fetch_all(&self.db),
        )
        .await??;

        Ok(categories)
    }
}
