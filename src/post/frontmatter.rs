//! Front matter parsing for markdown posts.
//!
//! Two fences are recognised:
//!
//! - `---` YAML-style `key: value` lines (quotes stripped, `#` comments)
//! - `+++` TOML
//!
//! Only the keys the feed needs are read; everything else is ignored.

use anyhow::{Result, anyhow};

/// Front matter fields used by the post index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub twitter: Option<String>,
    pub draft: bool,
}

impl FrontMatter {
    /// Split `content` into front matter and body.
    ///
    /// Returns `None` when the document has no front matter fence.
    pub fn extract(content: &str) -> Result<Option<(Self, &str)>> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        if let Some((fm, body)) = split_fenced(content, "---") {
            return Ok(Some((Self::parse_yaml_like(fm), body)));
        }
        if let Some((fm, body)) = split_fenced(content, "+++") {
            return Ok(Some((Self::parse_toml(fm)?, body)));
        }
        Ok(None)
    }

    /// Parse simple YAML-like frontmatter (key: value).
    fn parse_yaml_like(content: &str) -> Self {
        let mut meta = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(':') {
                let value = unquote(value.trim());
                let value = (!value.is_empty()).then(|| value.to_string());

                match key.trim().to_lowercase().as_str() {
                    "title" => meta.title = value,
                    "date" => meta.date = value,
                    "author" => meta.author = value,
                    "twitter" => meta.twitter = value,
                    "draft" => {
                        meta.draft = value.is_some_and(|v| v.eq_ignore_ascii_case("true"));
                    }
                    _ => {}
                }
            }
        }

        meta
    }

    /// Parse TOML frontmatter.
    ///
    /// `date` may be a TOML datetime or a string.
    fn parse_toml(content: &str) -> Result<Self> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| anyhow!("Invalid TOML frontmatter: {e}"))?;

        let string = |key: &str| match table.get(key) {
            Some(toml::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(toml::Value::Datetime(dt)) => Some(dt.to_string()),
            _ => None,
        };

        Ok(Self {
            title: string("title"),
            date: string("date"),
            author: string("author"),
            twitter: string("twitter"),
            draft: table
                .get("draft")
                .and_then(toml::Value::as_bool)
                .unwrap_or(false),
        })
    }
}

/// Split a document fenced by `fence` lines into (inner, rest).
fn split_fenced<'a>(content: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let rest = content.strip_prefix(fence)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Strip one layer of matching single or double quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
