use anyhow::Context;

/// Process configuration, read once at startup and handed to the
/// components that need it. No ambient globals.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub youtube_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().context("PORT must be a valid port number")?,
            Err(_) => 8001,
        };

        // Enrichment is optional; without a key the YouTube lookup is
        // skipped entirely.
        let youtube_api_key = std::env::var("YOUTUBE_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        Ok(Self {
            database_url,
            port,
            youtube_api_key,
        })
    }
}
