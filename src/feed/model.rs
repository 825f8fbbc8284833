use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A downloadable recording attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaAsset {
    pub url: String,
    pub created_at: DateTime<Utc>,
    /// Length in seconds.
    #[serde(default)]
    pub duration: u64,
    /// Size in mebibytes, if known.
    #[serde(default)]
    pub size: Option<u64>,
    pub mime_type: String,
    /// Human-readable type label, e.g. `mp4` or `webm`.
    pub display_mime_type: String,
    #[serde(default)]
    pub high_quality: bool,
}

impl MediaAsset {
    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }

    pub fn is_audio(&self) -> bool {
        self.mime_type.starts_with("audio/")
    }
}

/// A published talk or event together with its recordings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedRecord {
    pub guid: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Markdown body text.
    #[serde(default)]
    pub description: Option<String>,
    /// External link supplied by the speakers, if any.
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub persons: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// When the event took place. Preferred over `created_at` as publish date.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recordings: Vec<MediaAsset>,
}

impl FeedRecord {
    pub fn publish_date(&self) -> DateTime<Utc> {
        self.date.unwrap_or(self.created_at)
    }
}

/// A conference and the events that have downloadable recordings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Conference {
    pub acronym: String,
    pub title: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub events: Vec<FeedRecord>,
}
