//! Post index: the ordered list of published posts the feed is built from.
//!
//! ```text
//! post/
//! ├── frontmatter   # `---` / `+++` front matter parsing
//! ├── markdown      # MarkdownIndex: scan the posts directory
//! ├── json          # JsonIndex: precomputed JSON list
//! └── error         # IndexError
//! ```
//!
//! Both providers implement [`PostIndex`]; [`open_index`] picks one from the
//! `[content]` config.

mod error;
mod frontmatter;
mod json;
mod markdown;

pub use error::IndexError;
pub use json::JsonIndex;
pub use markdown::MarkdownIndex;

use crate::{config::SiteConfig, utils::date::DateTimeUtc};
use serde::{Deserialize, Serialize};

/// One published post, as produced by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: String,
    /// Site-relative URL of the rendered page (e.g. `/posts/hello.html`).
    pub href: String,
    /// Rendered HTML excerpt.
    #[serde(default)]
    pub excerpt: String,
    /// Front matter.
    pub data: PostData,
}

/// Front matter fields the feed cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostData {
    pub author: String,
    /// Twitter handle, without the profile URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    pub date: DateTimeUtc,
    #[serde(default, skip_serializing_if = "is_false")]
    pub draft: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

/// Source of the ordered post list.
///
/// Called once per run. The returned order is the feed order.
pub trait PostIndex {
    fn posts(&self, include_drafts: bool) -> Result<Vec<PostRecord>, IndexError>;
}

/// Pick the index provider configured in `[content]`.
pub fn open_index(config: &SiteConfig) -> Box<dyn PostIndex> {
    match &config.content.index {
        Some(path) => Box::new(JsonIndex::new(path.clone())),
        None => Box::new(MarkdownIndex::from_config(config)),
    }
}
