//! Article body extraction from rendered pages.
//!
//! The theme renders each post as
//!
//! ```html
//! <div class="prose ..."> ARTICLE </div></div><footer ...>
//! ```
//!
//! [`PatternExtractor`] matches exactly that shape on the raw markup.
//! [`DomExtractor`] parses the page and takes the inner HTML of the first
//! element whose class starts with the marker, which survives whitespace
//! and wrapper changes in the theme.

use regex::Regex;
use std::sync::LazyLock;

/// Text that must follow the article body.
const CLOSING: &str = "</div></div><footer";

/// Locates the article body inside a rendered page.
pub trait ContentExtractor {
    /// Class prefix that identifies the content container.
    fn marker(&self) -> &str;

    /// Extract the content region, or `None` when the page has none.
    fn extract(&self, html: &str) -> Option<String>;
}

/// Match on `<div class="MARKER...">(...)</div></div><footer`.
///
/// The first `<div class="...">` whose class starts with the marker opens
/// the region. The capture is greedy: it runs to the last closing sequence
/// in the page.
pub struct PatternExtractor {
    marker: String,
}

impl PatternExtractor {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
        }
    }
}

impl ContentExtractor for PatternExtractor {
    fn marker(&self) -> &str {
        &self.marker
    }

    fn extract(&self, html: &str) -> Option<String> {
        static RE_OPEN: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r#"<div class="([^"]*)">"#).unwrap());

        let open = RE_OPEN
            .captures_iter(html)
            .find(|caps| caps[1].starts_with(self.marker.as_str()))?
            .get(0)?;

        let rest = &html[open.end()..];
        rest.rfind(CLOSING).map(|end| rest[..end].to_string())
    }
}

/// Tree-based lookup using `tl`.
pub struct DomExtractor {
    marker: String,
}

impl DomExtractor {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
        }
    }
}

impl ContentExtractor for DomExtractor {
    fn marker(&self) -> &str {
        &self.marker
    }

    fn extract(&self, html: &str) -> Option<String> {
        let dom = tl::parse(html, tl::ParserOptions::default()).ok()?;
        let parser = dom.parser();

        dom.nodes()
            .iter()
            .filter_map(tl::Node::as_tag)
            .find(|tag| {
                tag.attributes()
                    .get("class")
                    .flatten()
                    .is_some_and(|class| class.as_utf8_str().starts_with(self.marker.as_str()))
            })
            .map(|tag| tag.inner_html(parser).to_string())
    }
}
