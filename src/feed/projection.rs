use super::model::{FeedRecord, MediaAsset};

/// Video types in order of preference for the default feed.
const PREFERRED_VIDEO: [&str; 3] = ["video/mp4", "video/webm", "video/ogg"];

/// Audio types in order of preference for the audio feed.
const PREFERRED_AUDIO: [&str; 3] = ["audio/mpeg", "audio/opus", "audio/ogg"];

/// Selects which recording, if any, represents a record in a feed variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// Best video recording, high quality first.
    PreferredRecording,
    /// Best audio-only recording.
    AudioRecording,
    /// First recording with exactly this MIME type.
    ByMimeType(String),
}

impl Projection {
    pub fn select<'a>(&self, record: &'a FeedRecord) -> Option<&'a MediaAsset> {
        match self {
            Projection::PreferredRecording => record
                .recordings
                .iter()
                .filter(|r| r.is_video())
                .min_by_key(|r| (!r.high_quality, rank(&PREFERRED_VIDEO, &r.mime_type))),
            Projection::AudioRecording => record
                .recordings
                .iter()
                .filter(|r| r.is_audio())
                .min_by_key(|r| rank(&PREFERRED_AUDIO, &r.mime_type)),
            Projection::ByMimeType(mime_type) => {
                record.recordings.iter().find(|r| &r.mime_type == mime_type)
            }
        }
    }

    /// Short name used in log output.
    pub fn name(&self) -> &str {
        match self {
            Projection::PreferredRecording => "preferred",
            Projection::AudioRecording => "audio",
            Projection::ByMimeType(mime_type) => mime_type,
        }
    }
}

/// Position in the preference list; unlisted types sort last.
fn rank(order: &[&str], mime_type: &str) -> usize {
    order
        .iter()
        .position(|m| *m == mime_type)
        .unwrap_or(order.len())
}
