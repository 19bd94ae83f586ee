//! `build` command: post index → feed file.

use crate::{
    cli::BuildArgs,
    config::SiteConfig,
    debug,
    generator::feed::build_feed,
    log,
    logger::plural_count,
    post::open_index,
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Generate the feed for the configured site.
///
/// Runs after the static site has been rendered into `build.output`.
pub fn run_build(args: &BuildArgs, config: &SiteConfig) -> Result<PathBuf> {
    let posts = open_index(config)
        .posts(args.drafts)
        .context("failed to load post index")?;

    debug!("build"; "project root: {}", config.get_root().display());
    debug!("build"; "output dir: {}", config.build.output.display());
    if posts.is_empty() {
        log!("build"; "no published posts, writing an empty feed");
    } else {
        log!("build"; "assembling feed from {}", plural_count(posts.len(), "post"));
    }

    build_feed(config, &posts).context("feed generation failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(drafts: bool) -> BuildArgs {
        BuildArgs {
            output: None,
            drafts,
            minify: None,
            format: None,
            extractor: None,
        }
    }

    fn write(path: PathBuf, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        write(
            root.join("posts/hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-01\nauthor: Alice\ntwitter: alice\n---\nHi there\n\n---\n\nRest",
        );
        write(
            root.join("posts/wip.md"),
            "---\ntitle: WIP\ndate: 2024-02-01\ndraft: true\n---\nSoon",
        );
        for name in ["hello", "wip"] {
            write(
                root.join(format!("dist/posts/{name}.html")),
                &format!("<div class=\"prose\"><p>{name} body</p></div></div><footer>"),
            );
        }

        let mut config = SiteConfig::default();
        config.root = root.to_path_buf();
        config.site.url = "https://diary.dev".into();
        config.build.output = root.join("dist");
        config.content.root = root.to_path_buf();
        (dir, config)
    }

    #[test]
    fn test_run_build_end_to_end() {
        let (_dir, config) = site();
        let path = run_build(&args(false), &config).unwrap();

        let channel = rss::Channel::read_from(fs::read(path).unwrap().as_slice()).unwrap();
        assert_eq!(channel.items().len(), 1);
        let item = &channel.items()[0];
        assert_eq!(item.link(), Some("https://diary.dev/posts/hello.html"));
        assert_eq!(item.content(), Some("<p>hello body</p>"));
        assert_eq!(item.description(), Some("<p>Hi there</p>"));
    }

    #[test]
    fn test_run_build_with_drafts() {
        let (_dir, config) = site();
        let path = run_build(&args(true), &config).unwrap();

        let channel = rss::Channel::read_from(fs::read(path).unwrap().as_slice()).unwrap();
        let titles: Vec<_> = channel.items().iter().filter_map(|i| i.title()).collect();
        assert_eq!(titles, ["WIP", "Hello"]);
    }

    #[test]
    fn test_run_build_fails_without_rendered_site() {
        let (dir, config) = site();
        fs::remove_dir_all(dir.path().join("dist")).unwrap();
        assert!(run_build(&args(false), &config).is_err());
        assert!(!dir.path().join("dist/feed.rss").exists());
    }
}
