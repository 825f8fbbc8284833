use thiserror::Error;

use crate::util::{DescriptionError, UrlError};

/// Errors that abort a feed generation. No partial document is returned.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The URL builder rejected an identifier or base URL.
    #[error(transparent)]
    Url(#[from] UrlError),

    /// The description renderer failed; its error is passed through as is.
    #[error(transparent)]
    Description(DescriptionError),

    /// Writing the XML document failed.
    #[error("Failed to write feed XML: {0}")]
    Xml(#[from] std::io::Error),

    #[error("Generated feed contains invalid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
