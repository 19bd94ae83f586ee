//! Feed generation (RSS, Atom).
//!
//! Builds a syndication feed from the post index and the rendered site:
//!
//! - **RSS 2.0**: default format (`feed.rss`)
//! - **Atom 1.0**: `format = "atom"`
//!
//! The document is assembled in full before anything is written, so a
//! failing post leaves the previous feed file untouched.

mod assemble;
mod atom;
mod error;
pub mod extract;
mod rss;

pub use assemble::FeedAssembler;
pub use error::FeedError;

use crate::{
    config::{ExtractorKind, FeedFormat, SiteConfig, absolute_url},
    log,
    logger::plural_count,
    post::PostRecord,
    utils::date::DateTimeUtc,
};
use extract::{ContentExtractor, DomExtractor, PatternExtractor};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Generator name written into the feed.
const GENERATOR: &str = concat!("diary-feed ", env!("CARGO_PKG_VERSION"));

/// Channel-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedChannel {
    pub title: String,
    pub description: String,
    pub id: String,
    pub link: String,
    pub language: String,
    pub image: Option<String>,
    pub favicon: Option<String>,
    pub copyright: String,
    /// Where the feed itself will be served.
    pub feed_url: String,
}

impl FeedChannel {
    pub fn from_config(config: &SiteConfig) -> Self {
        let site = &config.site;
        let base = site.base_url();
        let feed_path = config.build.feed.path.to_string_lossy().replace('\\', "/");

        Self {
            title: site.title.clone(),
            description: site.description.clone(),
            id: base.to_string(),
            link: base.to_string(),
            language: site.language.clone(),
            image: site.image.as_deref().map(|image| absolute_url(base, image)),
            favicon: site.favicon.as_deref().map(|icon| absolute_url(base, icon)),
            copyright: site.copyright.clone(),
            feed_url: absolute_url(base, &feed_path),
        }
    }
}

/// One feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub id: String,
    pub link: String,
    pub description: String,
    pub content: String,
    pub authors: Vec<FeedAuthor>,
    pub date: DateTimeUtc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedAuthor {
    pub name: String,
    pub link: Option<String>,
}

/// The feed being built: channel metadata plus entries in post order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub channel: FeedChannel,
    entries: Vec<FeedEntry>,
}

impl FeedDocument {
    pub fn new(channel: FeedChannel) -> Self {
        Self {
            channel,
            entries: Vec::new(),
        }
    }

    pub fn add_entry(&mut self, entry: FeedEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Newest entry date; used for `lastBuildDate` / `updated` so output
    /// depends only on the inputs.
    pub fn updated(&self) -> Option<DateTimeUtc> {
        self.entries.iter().map(|entry| entry.date).max()
    }

    /// Serialize to the given format. `pretty` indents the XML.
    pub fn to_xml(&self, format: FeedFormat, pretty: bool) -> Result<String, FeedError> {
        match format {
            FeedFormat::Rss => rss::to_xml(self, pretty),
            FeedFormat::Atom => atom::to_xml(self, pretty),
        }
    }
}

/// Build the extractor selected in `[build.feed]`.
pub fn extractor_for(kind: ExtractorKind, marker: &str) -> Box<dyn ContentExtractor> {
    match kind {
        ExtractorKind::Pattern => Box::new(PatternExtractor::new(marker)),
        ExtractorKind::Dom => Box::new(DomExtractor::new(marker)),
    }
}

/// Assemble the feed for `posts` and write it to the configured path.
pub fn build_feed(config: &SiteConfig, posts: &[PostRecord]) -> Result<PathBuf, FeedError> {
    let feed = &config.build.feed;
    let extractor = extractor_for(feed.extractor, &feed.marker);

    let assembler = FeedAssembler::new(
        config.site.base_url(),
        &config.build.output,
        extractor.as_ref(),
    );
    let document = assembler.assemble(FeedChannel::from_config(config), posts)?;
    let xml = document.to_xml(feed.format, !config.build.minify)?;

    let path = config.feed_output();
    write_feed(&path, xml.as_bytes())?;

    let label = match feed.format {
        FeedFormat::Rss => "rss",
        FeedFormat::Atom => "atom",
    };
    log!(label; "{} ({})", path.display(), plural_count(document.entries().len(), "item"));
    Ok(path)
}

/// Write through a sibling temp file and rename over the target.
fn write_feed(path: &Path, bytes: &[u8]) -> Result<(), FeedError> {
    let write_err = |source| FeedError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp, bytes).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(|source| {
        fs::remove_file(&tmp).ok();
        write_err(source)
    })
}
