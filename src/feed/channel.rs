use chrono::{DateTime, Utc};

use super::document::{Channel, Image, Owner};
use crate::config::ChannelConfig;

/// Contact address published as the iTunes owner email.
pub const OWNER_EMAIL: &str = "media@koeln.ccc.de";
pub const COPYRIGHT: &str = "mostly cc-by-nc";
/// See <http://www.apple.com/itunes/podcasts/specs.html#category>.
pub const CATEGORY: &str = "Technology";
pub const EXPLICIT: &str = "No";
/// Version of the XML writer used by [`super::render`]. Only the minor
/// version is tracked, matching the `quick-xml = "0.37"` requirement; patch
/// releases do not change the generator string.
pub const SERIALIZER_VERSION: &str = "quick-xml/0.37";

pub fn generator() -> String {
    format!("media.ccc.de / RSS {}", SERIALIZER_VERSION)
}

/// Builds the channel block from resolved configuration.
///
/// `now` becomes the last-build date; callers pass the current time on every
/// generation so the value is never reused across feeds.
pub fn build_channel(config: &ChannelConfig, now: DateTime<Utc>) -> Channel {
    Channel {
        title: config.title.clone(),
        link: config.base_url.clone(),
        description: config.description.clone(),
        copyright: COPYRIGHT.to_string(),
        last_build_date: now,
        generator: generator(),
        image: Image {
            url: config.logo_image.clone(),
            title: config.title.clone(),
            link: config.base_url.clone(),
        },
        itunes_author: config.owner.clone(),
        itunes_category: CATEGORY.to_string(),
        itunes_explicit: EXPLICIT.to_string(),
        itunes_image: config.logo_image.clone(),
        itunes_keywords: config.keywords.join(","),
        itunes_owner: Owner {
            name: config.owner.clone(),
            email: OWNER_EMAIL.to_string(),
        },
        itunes_subtitle: config.subtitle.clone(),
        itunes_summary: config.summary.clone(),
    }
}
