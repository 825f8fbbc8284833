use chrono::Utc;

use super::channel::build_channel;
use super::document::FeedDocument;
use super::error::FeedError;
use super::item::build_item;
use super::model::{Conference, FeedRecord, MediaAsset};
use super::projection::Projection;
use super::render::render;
use crate::config::{resolve, ChannelConfig, ChannelDefaults, ChannelOverrides};
use crate::util::{DescriptionRenderer, MarkdownDescription, UrlBuilder};

static MARKDOWN: MarkdownDescription = MarkdownDescription;

/// Assembles one podcast feed from records and a recording selection rule.
///
/// Each generator owns its resolved channel configuration; every call to
/// [`PodcastGenerator::generate`] builds a fresh document and nothing is
/// carried over between calls.
pub struct PodcastGenerator<'a> {
    config: ChannelConfig,
    urls: &'a dyn UrlBuilder,
    descriptions: &'a dyn DescriptionRenderer,
}

impl<'a> PodcastGenerator<'a> {
    pub fn new(
        urls: &'a dyn UrlBuilder,
        defaults: &ChannelDefaults,
        overrides: &ChannelOverrides,
    ) -> Self {
        Self {
            config: resolve(defaults, overrides),
            urls,
            descriptions: &MARKDOWN,
        }
    }

    /// Replace the default Markdown description renderer.
    pub fn with_descriptions(mut self, descriptions: &'a dyn DescriptionRenderer) -> Self {
        self.descriptions = descriptions;
        self
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Builds the feed document without serializing it.
    ///
    /// Records for which `select` yields nothing are skipped; the rest keep
    /// their input order.
    pub fn assemble<'r, I, F>(&self, records: I, mut select: F) -> Result<FeedDocument, FeedError>
    where
        I: IntoIterator<Item = &'r FeedRecord>,
        F: FnMut(&'r FeedRecord) -> Option<&'r MediaAsset>,
    {
        let channel = build_channel(&self.config, Utc::now());
        let mut items = Vec::new();
        let mut skipped = 0usize;

        for record in records {
            let Some(asset) = select(record) else {
                tracing::debug!(
                    guid = %record.guid,
                    slug = %record.slug,
                    "No recording for record, skipping"
                );
                skipped += 1;
                continue;
            };
            items.push(build_item(record, asset, self.urls, self.descriptions)?);
        }

        tracing::info!(
            title = %self.config.title,
            items = items.len(),
            skipped,
            "Assembled podcast feed"
        );
        Ok(FeedDocument { channel, items })
    }

    /// Renders a feed using an arbitrary recording selector.
    pub fn generate_with<'r, I, F>(&self, records: I, select: F) -> Result<String, FeedError>
    where
        I: IntoIterator<Item = &'r FeedRecord>,
        F: FnMut(&'r FeedRecord) -> Option<&'r MediaAsset>,
    {
        render(&self.assemble(records, select)?)
    }

    /// Renders a feed for one of the standard projections.
    pub fn generate(
        &self,
        records: &[FeedRecord],
        projection: &Projection,
    ) -> Result<String, FeedError> {
        tracing::debug!(projection = projection.name(), records = records.len(), "Generating feed");
        self.generate_with(records, |record| projection.select(record))
    }
}

fn listing_overrides(title: &str, summary: &str, logo: &str) -> ChannelOverrides {
    ChannelOverrides {
        channel_title: Some(title.to_string()),
        channel_summary: Some(summary.to_string()),
        logo_image: Some(logo.to_string()),
        ..Default::default()
    }
}

/// Feed of the preferred video recording of every record.
pub fn create_preferred(
    urls: &dyn UrlBuilder,
    defaults: &ChannelDefaults,
    title: &str,
    summary: &str,
    logo: &str,
    records: &[FeedRecord],
) -> Result<String, FeedError> {
    PodcastGenerator::new(urls, defaults, &listing_overrides(title, summary, logo))
        .generate(records, &Projection::PreferredRecording)
}

/// Feed of the audio-only recording of every record.
pub fn create_audio(
    urls: &dyn UrlBuilder,
    defaults: &ChannelDefaults,
    title: &str,
    summary: &str,
    logo: &str,
    records: &[FeedRecord],
) -> Result<String, FeedError> {
    PodcastGenerator::new(urls, defaults, &listing_overrides(title, summary, logo))
        .generate(records, &Projection::AudioRecording)
}

/// Feed of every event of a conference in one specific media type.
pub fn create_conference(
    urls: &dyn UrlBuilder,
    defaults: &ChannelDefaults,
    conference: &Conference,
    mime_type: &str,
    mime_type_name: &str,
) -> Result<String, FeedError> {
    let blurb = format!(
        "This feed contains all events from {} as {}",
        conference.acronym, mime_type_name
    );
    let overrides = ChannelOverrides {
        channel_title: Some(format!("{} ({})", conference.title, mime_type_name)),
        channel_summary: Some(blurb.clone()),
        channel_description: Some(blurb),
        base_url: Some(urls.conference_url(&conference.acronym)?.to_string()),
        logo_image: Some(conference.logo_url.clone()),
        ..Default::default()
    };

    PodcastGenerator::new(urls, defaults, &overrides).generate(
        &conference.events,
        &Projection::ByMimeType(mime_type.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::model::fixtures::{asset, record};
    use crate::util::SiteUrls;

    fn urls() -> SiteUrls {
        SiteUrls::new("https://media.ccc.de/").unwrap()
    }

    #[test]
    fn test_skips_records_without_recording() {
        let urls = urls();
        let records = vec![
            record("one", vec![asset("https://cdn.example.com/1.mp4", "video/mp4", 1)]),
            record("two", vec![asset("https://cdn.example.com/2.mp3", "audio/mpeg", 1)]),
            record("three", vec![asset("https://cdn.example.com/3.mp4", "video/mp4", 1)]),
        ];
        let generator =
            PodcastGenerator::new(&urls, &ChannelDefaults::default(), &ChannelOverrides::default());

        let doc = generator
            .assemble(&records, |r| Projection::PreferredRecording.select(r))
            .unwrap();
        let titles: Vec<&str> = doc.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Talk one", "Talk three"]);
    }

    #[test]
    fn test_zero_records_yields_channel_only() {
        let urls = urls();
        let generator =
            PodcastGenerator::new(&urls, &ChannelDefaults::default(), &ChannelOverrides::default());
        let records: Vec<FeedRecord> = Vec::new();
        let doc = generator.assemble(&records, |_| None).unwrap();
        assert!(doc.items.is_empty());
        assert_eq!(doc.channel.title, "media.ccc.de");
    }

    #[test]
    fn test_custom_selector() {
        let urls = urls();
        let records = vec![record(
            "one",
            vec![
                asset("https://cdn.example.com/1.mp4", "video/mp4", 1),
                asset("https://cdn.example.com/1.srt", "application/x-subrip", 1),
            ],
        )];
        let generator =
            PodcastGenerator::new(&urls, &ChannelDefaults::default(), &ChannelOverrides::default());

        let doc = generator
            .assemble(&records, |r| r.recordings.last())
            .unwrap();
        assert_eq!(doc.items[0].enclosure.url, "https://cdn.example.com/1.srt");
    }

    #[test]
    fn test_failing_record_aborts_generation() {
        let urls = urls();
        let records = vec![
            record("ok", vec![asset("https://cdn.example.com/1.mp4", "video/mp4", 1)]),
            record("", vec![asset("https://cdn.example.com/2.mp4", "video/mp4", 1)]),
        ];
        let result = create_preferred(
            &urls,
            &ChannelDefaults::default(),
            "Talks",
            "",
            "",
            &records,
        );
        assert!(matches!(result, Err(FeedError::Url(_))));
    }

    /// Renders normally until it meets the record with the given slug.
    struct FailsOn(&'static str);

    impl DescriptionRenderer for FailsOn {
        fn render(
            &self,
            record: &FeedRecord,
            event_url: &url::Url,
        ) -> Result<String, crate::util::DescriptionError> {
            if record.slug == self.0 {
                anyhow::bail!("cannot render body of {}", record.slug);
            }
            MarkdownDescription.render(record, event_url)
        }
    }

    #[test]
    fn test_description_failure_aborts_generation() {
        let urls = urls();
        let renderer = FailsOn("two");
        let records = vec![
            record("one", vec![asset("https://cdn.example.com/1.mp4", "video/mp4", 1)]),
            record("two", vec![asset("https://cdn.example.com/2.mp4", "video/mp4", 1)]),
            record("three", vec![asset("https://cdn.example.com/3.mp4", "video/mp4", 1)]),
        ];
        let generator =
            PodcastGenerator::new(&urls, &ChannelDefaults::default(), &ChannelOverrides::default())
                .with_descriptions(&renderer);

        let err = generator
            .generate(&records, &Projection::PreferredRecording)
            .unwrap_err();
        assert!(matches!(err, FeedError::Description(_)));
        assert_eq!(err.to_string(), "cannot render body of two");

        let without_failing = [records[0].clone(), records[2].clone()];
        let xml = generator
            .generate(&without_failing, &Projection::PreferredRecording)
            .unwrap();
        assert_eq!(xml.matches("<item>").count(), 2);
    }

    #[test]
    fn test_listing_overrides_replace_defaults() {
        let urls = urls();
        let overrides = listing_overrides("Audio", "Just audio", "https://example.com/a.png");
        let generator = PodcastGenerator::new(&urls, &ChannelDefaults::default(), &overrides);

        assert_eq!(generator.config().title, "Audio");
        assert_eq!(generator.config().summary, "Just audio");
        assert_eq!(generator.config().logo_image, "https://example.com/a.png");
        assert_eq!(generator.config().base_url, "https://media.ccc.de/");
    }
}
