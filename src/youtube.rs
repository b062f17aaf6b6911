use reqwest::Client;
use serde::Deserialize;

use crate::errors::AppError;

const VIDEOS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";
const LOOKUP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// Best-effort metadata from the YouTube Data API v3. Every field is
/// optional: a disabled or failed lookup yields the empty record and the
/// caller-supplied values stand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub view_count: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    snippet: Option<Snippet>,
    content_details: Option<ContentDetails>,
    statistics: Option<Statistics>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    description: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentDetails {
    duration: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    // The Data API returns counters as strings.
    view_count: Option<String>,
}

#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: Client,
    api_key: Option<String>,
}

impl YoutubeClient {
    pub fn new(api_key: Option<String>) -> Self {
        let http = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self { http, api_key }
    }

    /// Looks up snippet, content details and statistics for a video.
    /// Never fails: without a configured key this returns the empty
    /// record without touching the network, and any lookup error is
    /// logged and swallowed so that video creation proceeds with the
    /// caller-supplied fields.
    pub async fn fetch_metadata(&self, video_id: &str) -> VideoMetadata {
        let Some(api_key) = &self.api_key else {
            return VideoMetadata::default();
        };

        match self.lookup(video_id, api_key).await {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::warn!(video_id, error = %err, "YouTube metadata lookup failed");
                VideoMetadata::default()
            }
        }
    }

    async fn lookup(&self, video_id: &str, api_key: &str) -> Result<VideoMetadata, AppError> {
        let response = self
            .http
            .get(VIDEOS_ENDPOINT)
            .query(&[
                ("id", video_id),
                ("part", "snippet,contentDetails,statistics"),
                ("key", api_key),
            ])
            .send()
            .await?
            .error_for_status()?;

        let payload: VideoListResponse = response.json().await?;
        let Some(item) = payload.items.into_iter().next() else {
            return Err(anyhow::anyhow!("no items returned for video {video_id}").into());
        };

        Ok(metadata_from_item(item))
    }
}

fn metadata_from_item(item: VideoItem) -> VideoMetadata {
    let mut metadata = VideoMetadata::default();

    if let Some(snippet) = item.snippet {
        metadata.title = snippet.title;
        metadata.description = snippet.description;
        metadata.thumbnail = snippet
            .thumbnails
            .and_then(|t| t.high)
            .map(|t| t.url);
    }

    if let Some(details) = item.content_details {
        metadata.duration = details.duration;
    }

    metadata.view_count = item
        .statistics
        .and_then(|s| s.view_count)
        .and_then(|raw| raw.parse::<i64>().ok());

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_short_circuits_to_empty() {
        let client = YoutubeClient::new(None);
        let metadata = client.fetch_metadata("dQw4w9WgXcQ").await;
        assert_eq!(metadata, VideoMetadata::default());
    }

    #[test]
    fn decodes_full_payload() {
        let payload: VideoListResponse = serde_json::from_str(
            r#"{
                "kind": "youtube#videoListResponse",
                "items": [{
                    "id": "abc123",
                    "snippet": {
                        "title": "A talk",
                        "description": "About things",
                        "thumbnails": {
                            "default": {"url": "https://i.ytimg.com/vi/abc123/default.jpg"},
                            "high": {"url": "https://i.ytimg.com/vi/abc123/hqdefault.jpg"}
                        }
                    },
                    "contentDetails": {"duration": "PT4M13S"},
                    "statistics": {"viewCount": "1543"}
                }]
            }"#,
        )
        .unwrap();

        let metadata = metadata_from_item(payload.items.into_iter().next().unwrap());
        assert_eq!(metadata.title.as_deref(), Some("A talk"));
        assert_eq!(metadata.description.as_deref(), Some("About things"));
        assert_eq!(
            metadata.thumbnail.as_deref(),
            Some("https://i.ytimg.com/vi/abc123/hqdefault.jpg")
        );
        assert_eq!(metadata.duration.as_deref(), Some("PT4M13S"));
        assert_eq!(metadata.view_count, Some(1543));
    }

    #[test]
    fn tolerates_missing_statistics_and_thumbnails() {
        let payload: VideoListResponse = serde_json::from_str(
            r#"{"items": [{"snippet": {"title": "Bare"}, "contentDetails": {}}]}"#,
        )
        .unwrap();

        let metadata = metadata_from_item(payload.items.into_iter().next().unwrap());
        assert_eq!(metadata.title.as_deref(), Some("Bare"));
        assert_eq!(metadata.thumbnail, None);
        assert_eq!(metadata.duration, None);
        assert_eq!(metadata.view_count, None);
    }

    #[test]
    fn unparseable_view_count_is_absent() {
        let payload: VideoListResponse = serde_json::from_str(
            r#"{"items": [{"statistics": {"viewCount": "not-a-number"}}]}"#,
        )
        .unwrap();

        let metadata = metadata_from_item(payload.items.into_iter().next().unwrap());
        assert_eq!(metadata.view_count, None);
    }

    #[test]
    fn decodes_empty_item_list() {
        let payload: VideoListResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(payload.items.is_empty());
    }
}
