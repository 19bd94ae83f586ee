//! `[content]` configuration: where the post index comes from.

use crate::config::{ConfigDiagnostics, Field, Section};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Site source root; post hrefs are relative to it.
    pub root: PathBuf,
    /// Markdown posts directory, relative to `root`.
    pub posts: PathBuf,
    /// Line that ends a post's excerpt.
    pub excerpt_separator: String,
    /// Precomputed JSON post index. When set, markdown scanning is skipped.
    pub index: Option<PathBuf>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: ".".into(),
            posts: "posts".into(),
            excerpt_separator: "---".into(),
            index: None,
        }
    }
}

impl ContentConfig {
    pub const FIELD_EXCERPT_SEPARATOR: Field = Field::new(Section::Content, "excerpt_separator");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.excerpt_separator.trim().is_empty() {
            diag.push(Self::FIELD_EXCERPT_SEPARATOR, "must not be empty")
                .hint("use \"---\" or \"<!-- more -->\"");
        }
    }
}
