use thiserror::Error;
use url::Url;

/// Errors raised while building public URLs.
#[derive(Error, Debug)]
pub enum UrlError {
    /// The base URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The base URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("URL cannot be used as a base: {0}")]
    CannotBeABase(String),
    /// A slug or acronym was empty.
    #[error("Empty {0} identifier")]
    EmptyIdentifier(&'static str),
}

/// Turns logical identifiers into absolute public URLs.
pub trait UrlBuilder {
    /// Public page of a single event, addressed by slug.
    fn event_url(&self, slug: &str) -> Result<Url, UrlError>;

    /// Public page of a conference, addressed by acronym.
    fn conference_url(&self, acronym: &str) -> Result<Url, UrlError>;
}

/// URL layout of the public site: `{base}/v/{slug}` and `{base}/c/{acronym}`.
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base: Url,
}

impl SiteUrls {
    /// # Examples
    ///
    /// ```
    /// use podcast_feed::util::{SiteUrls, UrlBuilder};
    ///
    /// let urls = SiteUrls::new("https://media.ccc.de/").unwrap();
    /// assert_eq!(urls.event_url("37c3-11811").unwrap().as_str(), "https://media.ccc.de/v/37c3-11811");
    /// assert!(SiteUrls::new("ftp://media.ccc.de/").is_err());
    /// ```
    pub fn new(base: &str) -> Result<Self, UrlError> {
        let base = Url::parse(base)?;
        match base.scheme() {
            "http" | "https" => {}
            scheme => return Err(UrlError::UnsupportedScheme(scheme.to_owned())),
        }
        if base.cannot_be_a_base() {
            return Err(UrlError::CannotBeABase(base.to_string()));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn page(&self, prefix: &'static str, kind: &'static str, id: &str) -> Result<Url, UrlError> {
        if id.trim().is_empty() {
            return Err(UrlError::EmptyIdentifier(kind));
        }

        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UrlError::CannotBeABase(self.base.to_string()))?;
            segments.pop_if_empty().push(prefix).push(id);
        }
        Ok(url)
    }
}

impl UrlBuilder for SiteUrls {
    fn event_url(&self, slug: &str) -> Result<Url, UrlError> {
        self.page("v", "event", slug)
    }

    fn conference_url(&self, acronym: &str) -> Result<Url, UrlError> {
        self.page("c", "conference", acronym)
    }
}
