//! Collaborators used while assembling a feed.
//!
//! - **URL building**: turns event slugs and conference acronyms into public URLs
//! - **Descriptions**: renders a record's Markdown body into item description text
//!
//! # Examples
//!
//! ```
//! use podcast_feed::util::{SiteUrls, UrlBuilder};
//!
//! let urls = SiteUrls::new("https://media.ccc.de/").unwrap();
//! let page = urls.conference_url("37c3").unwrap();
//! assert_eq!(page.as_str(), "https://media.ccc.de/c/37c3");
//! ```

mod description;
mod urls;

pub use description::{DescriptionError, DescriptionRenderer, MarkdownDescription};
pub use urls::{SiteUrls, UrlBuilder, UrlError};
