use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use podcast_feed::config::Settings;
use podcast_feed::feed::{create_audio, create_conference, create_preferred, Conference, FeedRecord};
use podcast_feed::util::SiteUrls;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Variant {
    /// Preferred video recording of every record
    Preferred,
    /// Audio-only recording of every record
    Audio,
    /// All events of one conference in a given media type
    Conference,
}

#[derive(Parser, Debug)]
#[command(name = "podcast-feed", about = "Generate RSS podcast feeds from recorded talks")]
struct Args {
    /// JSON file with an array of records, or a conference object for --variant conference
    #[arg(long, value_name = "FILE")]
    records: PathBuf,

    /// TOML settings file with default channel metadata
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Variant::Preferred)]
    variant: Variant,

    /// MIME type to select for --variant conference (e.g. video/webm)
    #[arg(long, required_if_eq("variant", "conference"))]
    mime_type: Option<String>,

    /// Human-readable name of the MIME type (e.g. webm)
    #[arg(long)]
    mime_type_name: Option<String>,

    /// Channel title (defaults to the configured title)
    #[arg(long)]
    title: Option<String>,

    /// Channel summary (defaults to the configured summary)
    #[arg(long)]
    summary: Option<String>,

    /// Channel logo URL (defaults to the configured logo)
    #[arg(long)]
    logo: Option<String>,

    /// Public site used to build event and conference links (defaults to the configured base URL)
    #[arg(long, value_name = "URL")]
    site_url: Option<String>,

    /// Write the feed to this file instead of stdout
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
}

/// Write the feed beside `dst` first and rename it into place, so anything
/// serving `dst` never picks up a half-written document.
fn write_feed(dst: &Path, xml: &str) -> Result<()> {
    let file_name = dst
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Output path has no file name: {}", dst.display()))?;
    let mut temp_name = OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    let temp_path = dst.with_file_name(temp_name);

    std::fs::write(&temp_path, xml)
        .with_context(|| format!("Failed to write temporary file '{}'", temp_path.display()))?;

    std::fs::rename(&temp_path, dst).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}'",
            temp_path.display(),
            dst.display()
        )
    })?;

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let defaults = &settings.feeds;

    let site_url = args.site_url.as_deref().unwrap_or(&defaults.base_url);
    let urls = SiteUrls::new(site_url)
        .with_context(|| format!("Invalid site URL: {}", site_url))?;

    let input = std::fs::read_to_string(&args.records)
        .with_context(|| format!("Failed to read records file: {}", args.records.display()))?;

    let title = args.title.as_deref().unwrap_or(&defaults.channel_title);
    let summary = args.summary.as_deref().unwrap_or(&defaults.channel_summary);
    let logo = args.logo.as_deref().unwrap_or(&defaults.logo_image);

    let xml = match args.variant {
        Variant::Preferred | Variant::Audio => {
            let records: Vec<FeedRecord> =
                serde_json::from_str(&input).context("Records file is not a valid record list")?;
            tracing::debug!(records = records.len(), "Loaded records");
            if args.variant == Variant::Audio {
                create_audio(&urls, defaults, title, summary, logo, &records)?
            } else {
                create_preferred(&urls, defaults, title, summary, logo, &records)?
            }
        }
        Variant::Conference => {
            let conference: Conference =
                serde_json::from_str(&input).context("Records file is not a valid conference")?;
            let mime_type = args
                .mime_type
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("--mime-type is required for conference feeds"))?;
            let mime_type_name = args.mime_type_name.as_deref().unwrap_or(mime_type);
            create_conference(&urls, defaults, &conference, mime_type, mime_type_name)?
        }
    };

    match &args.output {
        Some(path) => {
            write_feed(path, &xml)
                .with_context(|| format!("Failed to write feed to {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = xml.len(), "Wrote feed");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(xml.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
