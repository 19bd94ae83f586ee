//! `[site]` configuration.
//!
//! Channel-level metadata of the feed: title, description, base URL,
//! language, image, favicon, copyright. The defaults are the diary's own
//! values, so a missing `diary.toml` still produces the right feed.

use crate::config::{ConfigDiagnostics, Field, Section};
use serde::{Deserialize, Serialize};

/// Site metadata for feed generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title.
    pub title: String,

    /// Site description.
    pub description: String,

    /// Base URL every post `href` is appended to (e.g., "https://diary.dev").
    pub url: String,

    /// Language code (e.g., "en", "zh-Hans").
    pub language: String,

    /// Fallback author for posts whose front matter has none.
    pub author: String,

    /// Logo image, absolute URL or site-relative path.
    pub image: Option<String>,

    /// Favicon, absolute URL or site-relative path.
    pub favicon: Option<String>,

    /// Copyright notice.
    pub copyright: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: "Developer Diary".into(),
            description: "Notes, experiments and lessons from day-to-day development.".into(),
            url: "https://diary.example.com".into(),
            language: "en".into(),
            author: "Diary Author".into(),
            image: Some("/logo.png".into()),
            favicon: Some("/favicon.ico".into()),
            copyright: "Copyright © Developer Diary. All rights reserved.".into(),
        }
    }
}

impl SiteInfoConfig {
    pub const FIELD_TITLE: Field = Field::new(Section::Site, "title");
    pub const FIELD_URL: Field = Field::new(Section::Site, "url");
    pub const FIELD_LANGUAGE: Field = Field::new(Section::Site, "language");
    pub const FIELD_IMAGE: Field = Field::new(Section::Site, "image");

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `title` is not empty
    /// - `url` is a valid http(s) URL with a host
    /// - `language` is not empty
    /// - `image`, if set, is a format RSS accepts
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        const URL_HINT: &str = "use format like https://example.com";

        if self.title.trim().is_empty() {
            diag.push(Self::FIELD_TITLE, "must not be empty");
        }

        if self.language.trim().is_empty() {
            diag.push(Self::FIELD_LANGUAGE, "must not be empty")
                .hint("use a language code like \"en\"");
        }

        match url::Url::parse(&self.url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    let scheme = parsed.scheme();
                    diag.push(
                        Self::FIELD_URL,
                        format!("scheme `{scheme}` not supported, must be http or https"),
                    )
                    .hint(URL_HINT);
                }
                if parsed.host_str().is_none() {
                    diag.push(Self::FIELD_URL, "URL has no host").hint(URL_HINT);
                }
                if parsed.query().is_some() || parsed.fragment().is_some() {
                    diag.push(Self::FIELD_URL, "base URL must not carry a query or fragment");
                }
            }
            Err(e) => {
                diag.push(Self::FIELD_URL, format!("`{}` is not a URL: {e}", self.url))
                    .hint(URL_HINT);
            }
        }

        if let Some(image) = &self.image {
            let path = image.split(['?', '#']).next().unwrap_or_default();
            let ext = path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
            if !matches!(ext.as_deref(), Some("png" | "jpg" | "jpeg" | "gif")) {
                diag.push(Self::FIELD_IMAGE, format!("`{image}` must be a png, jpg or gif"))
                    .hint("RSS readers only accept those formats; remove `image` to omit it");
            }
        }
    }
}
