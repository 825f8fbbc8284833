//! Channel configuration: process-wide defaults and per-call overrides.
//!
//! Defaults come from an optional settings file (`[feeds]` table in TOML).
//! A missing file yields the built-in defaults. Unknown keys are accepted by
//! serde and logged as warnings so typos are visible without breaking callers.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Settings file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Defaults
// ============================================================================

/// Default channel metadata shared by every generated feed.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChannelDefaults {
    pub channel_title: String,
    pub channel_description: String,
    pub channel_summary: String,
    pub channel_subtitle: String,
    pub channel_owner: String,
    pub channel_keywords: Vec<String>,
    pub base_url: String,
    pub logo_image: String,
}

impl Default for ChannelDefaults {
    fn default() -> Self {
        Self {
            channel_title: "media.ccc.de".to_string(),
            channel_description: "This feed contains recordings of talks from events organized or supported by the CCC".to_string(),
            channel_summary: "This feed contains recordings of talks from events organized or supported by the CCC".to_string(),
            channel_subtitle: "Chaos Computer Club recordings".to_string(),
            channel_owner: "CCC media team".to_string(),
            channel_keywords: vec![
                "CCC".to_string(),
                "Congress".to_string(),
                "Hacking".to_string(),
                "Security".to_string(),
                "Netzpolitik".to_string(),
            ],
            base_url: "https://media.ccc.de/".to_string(),
            logo_image: "https://static.media.ccc.de/media/feed-logo.png".to_string(),
        }
    }
}

/// Keys recognized in the `[feeds]` table. Anything else is logged and ignored.
const KNOWN_FEED_KEYS: [&str; 8] = [
    "channel_title",
    "channel_description",
    "channel_summary",
    "channel_subtitle",
    "channel_owner",
    "channel_keywords",
    "base_url",
    "logo_image",
];

/// Top-level settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub feeds: ChannelDefaults,
}

impl Settings {
    /// Maximum settings file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load settings from a TOML file.
    ///
    /// - Missing file → `Ok(Settings::default())`
    /// - Empty file → `Ok(Settings::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let len = file.metadata()?.len();
        if len > Self::MAX_FILE_SIZE {
            return Err(ConfigError::TooLarge(format!(
                "Settings file is {} bytes (max {} bytes)",
                len,
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::io::read_to_string(file)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_toml(&content)
    }

    /// Parse settings from TOML text, warning about unknown keys.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if let Ok(raw) = content.parse::<toml::Table>() {
            for (key, value) in &raw {
                if key != "feeds" {
                    tracing::warn!(key = %key, "Unknown key in settings file, ignoring");
                    continue;
                }
                if let Some(feeds) = value.as_table() {
                    for feed_key in feeds.keys() {
                        if !KNOWN_FEED_KEYS.contains(&feed_key.as_str()) {
                            tracing::warn!(key = %feed_key, "Unknown feeds key in settings file, ignoring");
                        }
                    }
                }
            }
        }

        let settings: Settings = toml::from_str(content)?;
        tracing::info!(title = %settings.feeds.channel_title, "Loaded feed settings");
        Ok(settings)
    }
}

// ============================================================================
// Overrides and resolution
// ============================================================================

/// Per-call channel overrides. `None` means "use the default".
///
/// Deserializing from a map silently drops keys that are not listed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChannelOverrides {
    pub channel_title: Option<String>,
    pub channel_description: Option<String>,
    pub channel_summary: Option<String>,
    pub channel_subtitle: Option<String>,
    pub channel_owner: Option<String>,
    pub channel_keywords: Option<Vec<String>>,
    pub base_url: Option<String>,
    pub logo_image: Option<String>,
}

/// Fully resolved channel metadata for one feed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    pub title: String,
    pub description: String,
    pub summary: String,
    pub subtitle: String,
    pub owner: String,
    pub keywords: Vec<String>,
    pub base_url: String,
    pub logo_image: String,
}

/// Merge overrides onto defaults. An override wins whenever it is present.
pub fn resolve(defaults: &ChannelDefaults, overrides: &ChannelOverrides) -> ChannelConfig {
    fn pick<T: Clone>(over: &Option<T>, default: &T) -> T {
        over.as_ref().unwrap_or(default).clone()
    }

    ChannelConfig {
        title: pick(&overrides.channel_title, &defaults.channel_title),
        description: pick(&overrides.channel_description, &defaults.channel_description),
        summary: pick(&overrides.channel_summary, &defaults.channel_summary),
        subtitle: pick(&overrides.channel_subtitle, &defaults.channel_subtitle),
        owner: pick(&overrides.channel_owner, &defaults.channel_owner),
        keywords: pick(&overrides.channel_keywords, &defaults.channel_keywords),
        base_url: pick(&overrides.base_url, &defaults.base_url),
        logo_image: pick(&overrides.logo_image, &defaults.logo_image),
    }
}

// ============================================================================
// Tests
// ============================================================================
