//! `query` command: dump the post index as JSON.
//!
//! The output is the same array a JSON index file (`content.index`)
//! accepts, so it can be cached and fed back in.

use crate::{
    cli::QueryArgs, config::SiteConfig, log, logger::plural_count, post::PostRecord,
    post::open_index,
};
use anyhow::{Context, Result};
use std::{fs, io::Write};

/// Execute query command
pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    let posts = open_index(config)
        .posts(args.drafts)
        .context("failed to load post index")?;

    log!("query"; "found {}", plural_count(posts.len(), "post"));

    let formatted = format_posts(&posts, args.pretty)?;

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("failed to create {}", output_path.display()))?;
        writeln!(file, "{formatted}")?;
        log!("query"; "wrote output to {}", output_path.display());
    } else {
        println!("{formatted}");
    }

    Ok(())
}

fn format_posts(posts: &[PostRecord], pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(posts)?
    } else {
        serde_json::to_string(posts)?
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::{JsonIndex, PostIndex};
    use tempfile::TempDir;

    fn site(dir: &TempDir) -> SiteConfig {
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("b.md"),
            "---\ntitle: B\ndate: 2024-02-02\nauthor: Bob\n---\nIntro\n---\nBody",
        )
        .unwrap();
        fs::write(
            posts.join("a.md"),
            "+++\ntitle = \"A\"\ndate = 2024-01-01\ndraft = true\n+++\nBody",
        )
        .unwrap();

        let mut config = SiteConfig::default();
        config.content.root = dir.path().to_path_buf();
        config
    }

    #[test]
    fn test_query_output_feeds_back_into_json_index() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        let out = dir.path().join("index.json");

        let args = QueryArgs {
            drafts: true,
            pretty: true,
            output: Some(out.clone()),
        };
        run_query(&args, &config).unwrap();

        let from_json = JsonIndex::new(&out).posts(true).unwrap();
        let from_markdown = open_index(&config).posts(true).unwrap();
        assert_eq!(from_json, from_markdown);
        assert_eq!(from_json[0].title, "B");
        assert_eq!(from_json[1].href, "/posts/a.html");
    }

    #[test]
    fn test_query_excludes_drafts_by_default() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        let out = dir.path().join("index.json");

        let args = QueryArgs {
            drafts: false,
            pretty: false,
            output: Some(out.clone()),
        };
        run_query(&args, &config).unwrap();

        let content = fs::read_to_string(out).unwrap();
        assert_eq!(content.lines().count(), 1);
        let posts: Vec<PostRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].data.author, "Bob");
        assert_eq!(posts[0].excerpt, "<p>Intro</p>");
    }
}
