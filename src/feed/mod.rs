//! Podcast feed assembly: RSS 2.0 with iTunes extensions.
//!
//! A feed is built in two steps:
//!
//! - **Assembly**: channel metadata from resolved configuration, plus one item
//!   per record whose [`Projection`] yields a recording
//! - **Rendering**: the finished [`FeedDocument`] is serialized with `quick-xml`
//!
//! # Architecture
//!
//! - [`model`] - records, recordings and conferences as loaded by the caller
//! - [`projection`] - which recording represents a record in a feed variant
//! - [`channel`] / [`item`] - field mapping onto the document
//! - [`render`] - XML serialization
//! - [`generator`] - the assembler and the three entry points
//!
//! # Example
//!
//! ```ignore
//! use podcast_feed::feed::create_audio;
//!
//! let xml = create_audio(&urls, &settings.feeds, "Audio", "All talks as audio", logo, &records)?;
//! ```

pub mod channel;
pub mod document;
mod error;
pub mod generator;
pub mod item;
pub mod model;
pub mod projection;
pub mod render;

pub use document::FeedDocument;
pub use error::FeedError;
pub use generator::{create_audio, create_conference, create_preferred, PodcastGenerator};
pub use model::{Conference, FeedRecord, MediaAsset};
pub use projection::Projection;
