use pulldown_cmark::{html, Options, Parser};
use url::Url;

use crate::feed::FeedRecord;

/// Error raised by a [`DescriptionRenderer`].
pub type DescriptionError = anyhow::Error;

/// Produces the item description text for a record.
///
/// A failure aborts the whole feed generation.
pub trait DescriptionRenderer {
    fn render(&self, record: &FeedRecord, event_url: &Url) -> Result<String, DescriptionError>;
}

/// Renders the Markdown body to HTML, then appends the speakers' link and
/// a pointer back to the event page, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownDescription;

impl DescriptionRenderer for MarkdownDescription {
    fn render(&self, record: &FeedRecord, event_url: &Url) -> Result<String, DescriptionError> {
        let mut parts = Vec::with_capacity(3);

        if let Some(body) = record.description.as_deref().filter(|b| !b.trim().is_empty()) {
            let mut out = String::with_capacity(body.len() * 3 / 2);
            html::push_html(&mut out, Parser::new_ext(body, Options::empty()));
            parts.push(out.trim_end().to_string());
        }
        if let Some(link) = record.link.as_deref().filter(|l| !l.trim().is_empty()) {
            parts.push(link.to_string());
        }
        parts.push(format!("about this event: {}", event_url));

        Ok(parts.join("\n"))
    }
}
