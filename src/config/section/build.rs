//! `[build]` and `[build.feed]` configuration.

use crate::config::{ConfigDiagnostics, Field, Section};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Feed output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// RSS 2.0 format (default).
    #[default]
    Rss,
    /// Atom 1.0 format.
    Atom,
}

/// How the article body is located inside a rendered page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// Match the raw markup against the content-container pattern (default).
    #[default]
    Pattern,
    /// Parse the page and select the content container by class.
    Dom,
}

/// `[build]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory of the static site build (relative to project root).
    pub output: PathBuf,
    /// Minify the generated feed.
    pub minify: bool,
    /// Feed settings.
    pub feed: FeedConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: ".vitepress/dist".into(),
            minify: false,
            feed: FeedConfig::default(),
        }
    }
}

/// `[build.feed]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Output path for feed file, relative to `build.output`.
    pub path: PathBuf,
    /// Feed format (RSS 2.0 or Atom 1.0).
    pub format: FeedFormat,
    /// Content extraction strategy.
    pub extractor: ExtractorKind,
    /// Class prefix of the element wrapping the article body.
    pub marker: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: "feed.rss".into(),
            format: FeedFormat::Rss,
            extractor: ExtractorKind::Pattern,
            marker: "prose".into(),
        }
    }
}

impl BuildConfig {
    pub const FIELD_FEED_PATH: Field = Field::new(Section::Feed, "path");
    pub const FIELD_FEED_MARKER: Field = Field::new(Section::Feed, "marker");

    /// Absolute location of the feed file.
    pub fn feed_output(&self) -> PathBuf {
        self.output.join(&self.feed.path)
    }

    /// Validate the build section.
    ///
    /// `feed.path` must stay inside the output directory, and the marker must
    /// be a plain class token.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !is_contained_relative(&self.feed.path) {
            let path = self.feed.path.display();
            diag.push(
                Self::FIELD_FEED_PATH,
                format!("`{path}` must be a relative file path inside build.output"),
            )
            .hint("use something like \"feed.rss\"");
        }

        let marker = &self.feed.marker;
        if marker.is_empty() || marker.chars().any(|c| c.is_whitespace() || c == '"') {
            diag.push(Self::FIELD_FEED_MARKER, format!("`{marker}` is not a class token"))
                .hint("use the class the theme puts on the article body, e.g. \"prose\"");
        }
    }
}

/// Relative, non-empty, and no `..` components.
fn is_contained_relative(path: &Path) -> bool {
    path.file_name().is_some()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn validate(build: &BuildConfig) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        build.validate(&mut diag);
        diag
    }

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.feed.path, PathBuf::from("feed.rss"));
        assert_eq!(config.build.feed.format, FeedFormat::Rss);
        assert_eq!(config.build.feed.extractor, ExtractorKind::Pattern);
        assert_eq!(config.build.feed.marker, "prose");
        assert!(!config.build.minify);
        assert!(!validate(&config.build).has_errors());
    }

    #[test]
    fn test_custom_config() {
        let config = test_parse_config(
            "[build]\noutput = \"dist\"\nminify = true\n[build.feed]\npath = \"atom.xml\"\nformat = \"atom\"\nextractor = \"dom\"\nmarker = \"article-body\"",
        );
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.minify);
        assert_eq!(config.build.feed.path, PathBuf::from("atom.xml"));
        assert_eq!(config.build.feed.format, FeedFormat::Atom);
        assert_eq!(config.build.feed.extractor, ExtractorKind::Dom);
        assert_eq!(config.build.feed.marker, "article-body");
    }

    #[test]
    fn test_feed_path_must_stay_inside_output() {
        for bad in ["../feed.rss", "/tmp/feed.rss", ""] {
            let build = BuildConfig {
                feed: FeedConfig {
                    path: bad.into(),
                    ..FeedConfig::default()
                },
                ..BuildConfig::default()
            };
            let diag = validate(&build);
            assert_eq!(diag.errors()[0].field, BuildConfig::FIELD_FEED_PATH, "{bad}");
        }
    }

    #[test]
    fn test_nested_feed_path_allowed() {
        let build = BuildConfig {
            feed: FeedConfig {
                path: "feeds/all.rss".into(),
                ..FeedConfig::default()
            },
            ..BuildConfig::default()
        };
        assert!(!validate(&build).has_errors());
        assert!(build.feed_output().ends_with("feeds/all.rss"));
    }

    #[test]
    fn test_marker_rejects_quotes_and_spaces() {
        for bad in ["", "pro se", "prose\""] {
            let build = BuildConfig {
                feed: FeedConfig {
                    marker: bad.into(),
                    ..FeedConfig::default()
                },
                ..BuildConfig::default()
            };
            assert!(validate(&build).has_errors(), "{bad:?}");
        }
    }
}
