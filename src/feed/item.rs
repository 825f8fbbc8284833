use chrono::DateTime;

use super::channel::EXPLICIT;
use super::document::{Enclosure, Guid, Item};
use super::error::FeedError;
use super::model::{FeedRecord, MediaAsset};
use crate::util::{DescriptionRenderer, UrlBuilder};

/// Converts a size in mebibytes to bytes, saturating at `u64::MAX`.
pub fn size_to_bytes(size: u64) -> u64 {
    size.saturating_mul(1024 * 1024)
}

/// Formats a duration as `HH:MM:SS` by reading it as a UTC time of day.
///
/// Durations of 24 hours or more wrap around (`90000` becomes `01:00:00`).
pub fn format_duration(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "00:00:00".to_string())
}

/// Asset URL plus its creation time, so re-encoded files get a fresh GUID.
pub fn item_guid(asset: &MediaAsset) -> String {
    format!("{}?{}", asset.url, asset.created_at.timestamp())
}

/// Maps one record and its projected recording onto a feed item.
pub fn build_item(
    record: &FeedRecord,
    asset: &MediaAsset,
    urls: &dyn UrlBuilder,
    descriptions: &dyn DescriptionRenderer,
) -> Result<Item, FeedError> {
    let event_url = urls.event_url(&record.slug)?;
    let description = descriptions
        .render(record, &event_url)
        .map_err(FeedError::Description)?;

    let itunes_subtitle = record
        .subtitle
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let itunes_author = if record.persons.is_empty() {
        None
    } else {
        Some(record.persons.join(", "))
    };

    Ok(Item {
        title: record.title.clone(),
        link: event_url.to_string(),
        guid: Guid {
            value: item_guid(asset),
            is_permalink: true,
        },
        identifier: record.guid.clone(),
        itunes_summary: description.clone(),
        description,
        pub_date: record.publish_date(),
        // The display label goes into `type`, not the canonical MIME type.
        enclosure: Enclosure {
            url: asset.url.clone(),
            length: size_to_bytes(asset.size.unwrap_or(0)),
            mime_type: asset.display_mime_type.clone(),
        },
        itunes_author,
        itunes_duration: format_duration(asset.duration),
        itunes_explicit: EXPLICIT.to_string(),
        itunes_keywords: record.tags.join(","),
        itunes_subtitle,
    })
}
