mod config;
mod db;
mod errors;
mod models;
mod repository;
mod routes;
mod source;
mod youtube;

use crate::config::Config;
use crate::db::init_db;
use crate::repository::{CategoryRepository, VideoRepository};
use crate::routes::{
    all_categories, create_category, create_video, featured_content, get_video, health_check,
    increment_view_count, list_videos, root, search_videos,
};
use crate::youtube::YoutubeClient;

use axum::routing::{get, post, put};
use axum::Router;
use axum_prometheus::PrometheusMetricLayer;
use std::error::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone)]
pub struct InnerState {
    pub videos: VideoRepository,
    pub categories: CategoryRepository,
    pub youtube: YoutubeClient,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vod_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db = init_db(&config.database_url).await?;

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app_state = InnerState {
        videos: VideoRepository::new(db.clone()),
        categories: CategoryRepository::new(db),
        youtube: YoutubeClient::new(config.youtube_api_key),
    };

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .route("/api/videos", post(create_video).get(list_videos))
        .route("/api/videos/:id", get(get_video))
        .route("/api/videos/:id/view", put(increment_view_count))
        .route("/api/search", get(search_videos))
        .route("/api/categories", get(all_categories).post(create_category))
        .route("/api/featured", get(featured_content))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer)
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("Could not initialize TcpListener");

    tracing::debug!(
        "listening on {}",
        listener
            .local_addr()
            .expect("Could not convert listener address to local address")
    );

    axum::serve(listener, app)
        .await
        .expect("Could not successfully connect");

    Ok(())
}
