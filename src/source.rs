use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static YOUTUBE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)")
        .expect("Failed to compile YouTube regex")
});

static RUMBLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rumble\.com/(?:embed/)?([^/?]+)").expect("Failed to compile Rumble regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    Youtube,
    Rumble,
    Direct,
}

impl VideoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoType::Youtube => "youtube",
            VideoType::Rumble => "rumble",
            VideoType::Direct => "direct",
        }
    }
}

/// Classification result for a raw source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub video_type: VideoType,
    pub video_id: Option<String>,
    pub embed_url: String,
}

/// Classifies a raw URL into a playable source. Total: anything that is
/// neither a YouTube nor a Rumble link passes through as a direct URL.
pub fn classify_url(url: &str) -> SourceInfo {
    if let Some(caps) = YOUTUBE_REGEX.captures(url) {
        let id = caps[1].to_string();
        return SourceInfo {
            video_type: VideoType::Youtube,
            embed_url: format!("https://www.youtube.com/embed/{}", id),
            video_id: Some(id),
        };
    }

    if let Some(caps) = RUMBLE_REGEX.captures(url) {
        let id = caps[1].to_string();
        return SourceInfo {
            video_type: VideoType::Rumble,
            embed_url: format!("https://rumble.com/embed/{}/", id),
            video_id: Some(id),
        };
    }

    SourceInfo {
        video_type: VideoType::Direct,
        video_id: None,
        embed_url: url.to_string(),
    }
}
