//! Feed assembly: post records + rendered pages → feed document.

use super::{FeedAuthor, FeedChannel, FeedDocument, FeedEntry, FeedError, extract::ContentExtractor};
use crate::{log, post::PostRecord};
use regex::Regex;
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Builds one feed entry per post, in input order.
pub struct FeedAssembler<'a> {
    base_url: &'a str,
    output_dir: &'a Path,
    extractor: &'a dyn ContentExtractor,
}

impl<'a> FeedAssembler<'a> {
    pub fn new(
        base_url: &'a str,
        output_dir: &'a Path,
        extractor: &'a dyn ContentExtractor,
    ) -> Self {
        Self {
            base_url,
            output_dir,
            extractor,
        }
    }

    /// Assemble the whole document. The first failing post aborts.
    pub fn assemble(
        &self,
        channel: FeedChannel,
        posts: &[PostRecord],
    ) -> Result<FeedDocument, FeedError> {
        let mut document = FeedDocument::new(channel);
        for post in posts {
            document.add_entry(self.entry_for(post)?);
        }
        Ok(document)
    }

    fn entry_for(&self, post: &PostRecord) -> Result<FeedEntry, FeedError> {
        let path = rendered_path(self.output_dir, &post.href);
        let html = read_rendered(&path, &post.href)?;

        let content =
            self.extractor
                .extract(&html)
                .ok_or_else(|| FeedError::ContentExtraction {
                    href: post.href.clone(),
                    path: path.clone(),
                    marker: self.extractor.marker().to_string(),
                })?;

        let url = join_url(self.base_url, &post.href);
        Ok(FeedEntry {
            title: post.title.clone(),
            id: url.clone(),
            link: url,
            description: post.excerpt.clone(),
            content,
            authors: vec![FeedAuthor {
                name: post.data.author.clone(),
                link: post.data.twitter.as_deref().and_then(twitter_profile),
            }],
            date: post.data.date,
        })
    }
}

fn read_rendered(path: &Path, href: &str) -> Result<String, FeedError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => FeedError::MissingRenderedFile {
            href: href.to_string(),
            path: path.to_path_buf(),
        },
        _ => FeedError::RenderedRead {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Absolute URL for a site-relative `href`.
///
/// ```ignore
/// join_url("https://diary.dev/", "/a/b") -> "https://diary.dev/a/b"
/// join_url("https://diary.dev", "a/b")   -> "https://diary.dev/a/b"
/// ```
pub fn join_url(base_url: &str, href: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}

/// Location of the rendered page for `href` inside the build output.
///
/// Query and fragment are dropped; a trailing `/` means `index.html`.
pub fn rendered_path(output_dir: &Path, href: &str) -> PathBuf {
    let href = href.split(['#', '?']).next().unwrap_or_default();
    let relative = href.trim_start_matches('/');

    let mut path = output_dir.join(relative);
    if relative.is_empty() || relative.ends_with('/') {
        path.push("index.html");
    }
    path
}

/// Profile URL for a twitter handle.
///
/// A leading `@` is dropped. Anything that is not a plain handle gets no
/// link rather than a broken one.
pub fn twitter_profile(handle: &str) -> Option<String> {
    static RE_HANDLE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,15}$").unwrap());

    let handle = handle.trim();
    let handle = handle.strip_prefix('@').unwrap_or(handle);
    if RE_HANDLE.is_match(handle) {
        Some(format!("https://twitter.com/{handle}"))
    } else {
        log!("warning"; "ignoring invalid twitter handle `{}`", handle);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generator::feed::extract::{DomExtractor, PatternExtractor},
        post::PostData,
        utils::date::DateTimeUtc,
    };
    use tempfile::TempDir;

    const BASE: &str = "https://diary.dev";

    fn post(title: &str, href: &str, twitter: Option<&str>) -> PostRecord {
        PostRecord {
            title: title.into(),
            href: href.into(),
            excerpt: format!("{title} excerpt"),
            data: PostData {
                author: "Alice".into(),
                twitter: twitter.map(Into::into),
                date: DateTimeUtc::from_ymd(2024, 1, 1),
                draft: false,
            },
        }
    }

    fn render(out: &Path, href: &str, body: &str) {
        let path = rendered_path(out, href);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("<div class=\"prose\">{body}</div></div><footer>")).unwrap();
    }

    #[test]
    fn test_hello_scenario() {
        let out = TempDir::new().unwrap();
        fs::write(
            out.path().join("hello"),
            r#"<div class="prose foo">BODY</div></div><footer>"#,
        )
        .unwrap();

        let extractor = PatternExtractor::new("prose");
        let assembler = FeedAssembler::new(BASE, out.path(), &extractor);
        let mut hello = post("Hello", "/hello", Some("alice"));
        hello.excerpt = "Hi".into();

        let document = assembler
            .assemble(FeedChannel::default(), std::slice::from_ref(&hello))
            .unwrap();

        assert_eq!(
            document.entries(),
            [FeedEntry {
                title: "Hello".into(),
                id: "https://diary.dev/hello".into(),
                link: "https://diary.dev/hello".into(),
                description: "Hi".into(),
                content: "BODY".into(),
                authors: vec![FeedAuthor {
                    name: "Alice".into(),
                    link: Some("https://twitter.com/alice".into()),
                }],
                date: DateTimeUtc::from_ymd(2024, 1, 1),
            }]
        );
    }

    #[test]
    fn test_one_entry_per_post_in_order() {
        let out = TempDir::new().unwrap();
        let posts: Vec<_> = ["/posts/c.html", "/posts/a.html", "/posts/b.html"]
            .iter()
            .map(|href| {
                render(out.path(), href, href);
                post(href, href, None)
            })
            .collect();

        let extractor = PatternExtractor::new("prose");
        let document = FeedAssembler::new(BASE, out.path(), &extractor)
            .assemble(FeedChannel::default(), &posts)
            .unwrap();

        let links: Vec<_> = document.entries().iter().map(|e| e.link.as_str()).collect();
        assert_eq!(
            links,
            [
                "https://diary.dev/posts/c.html",
                "https://diary.dev/posts/a.html",
                "https://diary.dev/posts/b.html"
            ]
        );
        let contents: Vec<_> = document.entries().iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, ["/posts/c.html", "/posts/a.html", "/posts/b.html"]);
        assert!(document.entries().iter().all(|e| e.id == e.link));
    }

    #[test]
    fn test_author_without_handle_has_no_link() {
        let out = TempDir::new().unwrap();
        render(out.path(), "/a", "x");

        let extractor = PatternExtractor::new("prose");
        let document = FeedAssembler::new(BASE, out.path(), &extractor)
            .assemble(FeedChannel::default(), &[post("A", "/a", None)])
            .unwrap();
        assert_eq!(document.entries()[0].authors[0].link, None);
    }

    #[test]
    fn test_missing_rendered_file() {
        let out = TempDir::new().unwrap();
        render(out.path(), "/a", "x");

        let extractor = PatternExtractor::new("prose");
        let err = FeedAssembler::new(BASE, out.path(), &extractor)
            .assemble(
                FeedChannel::default(),
                &[post("A", "/a", None), post("B", "/b", None)],
            )
            .unwrap_err();
        assert!(matches!(err, FeedError::MissingRenderedFile { ref href, .. } if href == "/b"));
    }

    #[test]
    fn test_extraction_failure() {
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("a"), "<main>no article here</main>").unwrap();

        let extractor = PatternExtractor::new("prose");
        let err = FeedAssembler::new(BASE, out.path(), &extractor)
            .assemble(FeedChannel::default(), &[post("A", "/a", None)])
            .unwrap_err();
        assert!(matches!(
            err,
            FeedError::ContentExtraction { ref marker, .. } if marker == "prose"
        ));
    }

    #[test]
    fn test_dom_extractor_plugs_in() {
        let out = TempDir::new().unwrap();
        render(out.path(), "/a", "<p>dom</p>");

        let extractor = DomExtractor::new("prose");
        let document = FeedAssembler::new(BASE, out.path(), &extractor)
            .assemble(FeedChannel::default(), &[post("A", "/a", None)])
            .unwrap();
        assert!(document.entries()[0].content.contains("dom"));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://d.dev", "/a/b"), "https://d.dev/a/b");
        assert_eq!(join_url("https://d.dev/", "/a/b"), "https://d.dev/a/b");
        assert_eq!(join_url("https://d.dev", "a/b"), "https://d.dev/a/b");
        assert_eq!(join_url("https://d.dev/blog", "/a"), "https://d.dev/blog/a");
    }

    #[test]
    fn test_rendered_path() {
        let out = Path::new("/site/dist");
        assert_eq!(rendered_path(out, "/hello"), out.join("hello"));
        assert_eq!(
            rendered_path(out, "/posts/x.html#intro"),
            out.join("posts/x.html")
        );
        assert_eq!(rendered_path(out, "/posts/?p=1"), out.join("posts/index.html"));
        assert_eq!(rendered_path(out, "/"), out.join("index.html"));
    }

    #[test]
    fn test_twitter_profile() {
        assert_eq!(
            twitter_profile("foo").as_deref(),
            Some("https://twitter.com/foo")
        );
        assert_eq!(
            twitter_profile(" @foo_bar ").as_deref(),
            Some("https://twitter.com/foo_bar")
        );
        assert_eq!(twitter_profile(""), None);
        assert_eq!(twitter_profile("foo/../bar"), None);
        assert_eq!(twitter_profile("https://twitter.com/foo"), None);
        assert_eq!(twitter_profile("a_handle_way_too_long"), None);
    }
}
