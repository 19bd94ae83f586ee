//! Feed generation errors.
//!
//! Every variant is fatal: a feed with an entry missing its content is
//! worse than no new feed, so the run stops and the old file stays.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("rendered page for `{href}` not found at `{}` (has the site been built?)", path.display())]
    MissingRenderedFile { href: String, path: PathBuf },

    #[error("failed to read rendered page `{}`", path.display())]
    RenderedRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no `class=\"{marker}…\"` content region in `{}` (post `{href}`)", path.display())]
    ContentExtraction {
        href: String,
        path: PathBuf,
        marker: String,
    },

    #[error("feed serialization failed: {0}")]
    Serialization(String),

    #[error("failed to write feed `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
