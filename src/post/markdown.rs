//! Markdown post index.
//!
//! Scans `<content.root>/<content.posts>` for `*.md` files, the way the
//! diary theme's post loader does at build time:
//!
//! - front matter supplies title, date, author, twitter handle, draft flag
//! - the excerpt is everything before the first separator line, rendered
//!   to HTML
//! - `href` mirrors the source path with `.md` → `.html`
//! - posts are ordered newest first

use super::{IndexError, PostData, PostIndex, PostRecord, frontmatter::FrontMatter};
use crate::{config::SiteConfig, debug, log, logger::plural_count, utils::date::DateTimeUtc};
use jwalk::{Parallelism, WalkDir};
use pulldown_cmark::{Options, Parser, html};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct MarkdownIndex {
    root: PathBuf,
    posts_dir: PathBuf,
    excerpt_separator: String,
    default_author: String,
}

impl MarkdownIndex {
    pub fn new(
        root: impl Into<PathBuf>,
        posts_dir: impl Into<PathBuf>,
        excerpt_separator: impl Into<String>,
        default_author: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            posts_dir: posts_dir.into(),
            excerpt_separator: excerpt_separator.into(),
            default_author: default_author.into(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            &config.content.root,
            &config.content.posts,
            &config.content.excerpt_separator,
            &config.site.author,
        )
    }

    /// Markdown files under the posts directory, in walk order.
    fn collect_files(&self, dir: &Path) -> Result<Vec<PathBuf>, IndexError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .sort(true)
            .parallelism(Parallelism::Serial)
        {
            let entry = entry.map_err(|e| IndexError::Walk {
                dir: dir.to_path_buf(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            let is_markdown = path.extension().is_some_and(|ext| ext == "md");
            let is_index = path.file_name().is_some_and(|name| name == "index.md");
            if entry.file_type().is_file() && is_markdown && !is_index {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Build a record for one file. `None` when title or date is missing.
    fn read_post(&self, path: &Path) -> Result<Option<PostRecord>, IndexError> {
        let source = fs::read_to_string(path).map_err(|e| IndexError::Io(path.to_path_buf(), e))?;

        let (meta, body) = match FrontMatter::extract(&source) {
            Ok(Some((meta, body))) => (meta, body),
            Ok(None) => (FrontMatter::default(), source.as_str()),
            Err(e) => {
                return Err(IndexError::FrontMatter {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        };

        let (Some(title), Some(raw_date)) = (meta.title, meta.date) else {
            debug!("index"; "skipping {} (no title or date)", path.display());
            return Ok(None);
        };
        let date = DateTimeUtc::parse(&raw_date).ok_or_else(|| IndexError::InvalidDate {
            path: path.to_path_buf(),
            value: raw_date.clone(),
        })?;

        Ok(Some(PostRecord {
            title,
            href: self.href_for(path),
            excerpt: render_excerpt(body, &self.excerpt_separator),
            data: PostData {
                author: meta.author.unwrap_or_else(|| self.default_author.clone()),
                twitter: meta.twitter,
                date,
                draft: meta.draft,
            },
        }))
    }

    /// `/posts/hello.html` for `<root>/posts/hello.md`.
    fn href_for(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let html = relative.with_extension("html");
        let segments: Vec<_> = html
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(s) => Some(s.to_string_lossy()),
                _ => None,
            })
            .collect();
        format!("/{}", segments.join("/"))
    }
}

impl PostIndex for MarkdownIndex {
    fn posts(&self, include_drafts: bool) -> Result<Vec<PostRecord>, IndexError> {
        let dir = self.root.join(&self.posts_dir);
        if !dir.is_dir() {
            return Err(IndexError::MissingDir(dir));
        }

        let mut posts = Vec::new();
        let mut incomplete = 0;
        let mut drafts = 0;

        for path in self.collect_files(&dir)? {
            match self.read_post(&path)? {
                Some(post) if include_drafts || !post.data.draft => posts.push(post),
                Some(_) => drafts += 1,
                None => incomplete += 1,
            }
        }

        if incomplete > 0 {
            log!("index"; "excluded {} without title or date", plural_count(incomplete, "post"));
        }
        if drafts > 0 {
            debug!("index"; "skipped {}", plural_count(drafts, "draft"));
        }

        // Newest first; sort_by is stable so equal dates keep walk order.
        posts.sort_by(|a, b| b.data.date.cmp(&a.data.date));
        Ok(posts)
    }
}

/// Render the part of `body` before the first `separator` line as HTML.
///
/// No separator means no excerpt.
fn render_excerpt(body: &str, separator: &str) -> String {
    let separator = separator.trim();
    let mut offset = 0;
    let mut found = None;
    for line in body.split_inclusive('\n') {
        if line.trim() == separator {
            found = Some(offset);
            break;
        }
        offset += line.len();
    }

    let Some(end) = found else {
        return String::new();
    };
    let excerpt = body[..end].trim();
    if excerpt.is_empty() {
        return String::new();
    }

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let mut out = String::with_capacity(excerpt.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(excerpt, options));
    out.truncate(out.trim_end().len());
    out
}
