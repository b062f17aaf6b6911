use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS videos (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    url         TEXT NOT NULL,
    thumbnail   TEXT NOT NULL,
    category    TEXT NOT NULL,
    tags        TEXT[] NOT NULL DEFAULT '{}',
    duration    TEXT,
    is_premium  BOOLEAN NOT NULL DEFAULT FALSE,
    is_live     BOOLEAN NOT NULL DEFAULT FALSE,
    video_type  TEXT NOT NULL,
    video_id    TEXT,
    embed_url   TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    view_count  BIGINT NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS categories (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX IF NOT EXISTS videos_created_at_idx ON videos (created_at DESC);
CREATE INDEX IF NOT EXISTS videos_category_idx ON videos (category);
"#;

/// Connects to Postgres and runs the idempotent schema bootstrap.
pub async fn init_db(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    sqlx::raw_sql(SCHEMA).execute(&pool).await?;

    tracing::info!("database initialized");

    Ok(pool)
}
