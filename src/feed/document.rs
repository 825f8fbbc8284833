//! In-memory podcast feed, assembled first and serialized in one step.
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub name: String,
    pub email: String,
}

/// Channel-level metadata, written once before any item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub link: String,
    pub description: String,
    pub copyright: String,
    pub last_build_date: DateTime<Utc>,
    pub generator: String,
    pub image: Image,
    pub itunes_author: String,
    pub itunes_category: String,
    pub itunes_explicit: String,
    pub itunes_image: String,
    pub itunes_keywords: String,
    pub itunes_owner: Owner,
    pub itunes_subtitle: String,
    pub itunes_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guid {
    pub value: String,
    pub is_permalink: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    pub url: String,
    /// Length in bytes.
    pub length: u64,
    pub mime_type: String,
}

/// One `<item>` element.
///
/// `itunes_subtitle` and `itunes_author` are omitted entirely when `None`;
/// `itunes_keywords` is always written, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub link: String,
    pub description: String,
    pub guid: Guid,
    pub identifier: String,
    pub pub_date: DateTime<Utc>,
    pub enclosure: Enclosure,
    pub itunes_author: Option<String>,
    pub itunes_duration: String,
    pub itunes_explicit: String,
    pub itunes_keywords: String,
    pub itunes_subtitle: Option<String>,
    pub itunes_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub channel: Channel,
    pub items: Vec<Item>,
}
