//! Command-line interface definitions.

use crate::config::{ExtractorKind, FeedFormat};
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Default config file name, searched upward from the working directory.
pub const DEFAULT_CONFIG: &str = "diary.toml";

/// Feed generator for a statically built developer diary
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: diary.toml)
    #[arg(short = 'C', long, global = true, default_value = DEFAULT_CONFIG, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the feed from the rendered site
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the post index as JSON
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Build output directory holding the rendered site (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Include draft posts in the feed
    #[arg(short, long)]
    pub drafts: bool,

    /// Minify the feed XML
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Feed format (rss, atom)
    #[arg(short, long, value_enum)]
    pub format: Option<FeedFormat>,

    /// Content extraction strategy (pattern, dom)
    #[arg(short, long, value_enum)]
    pub extractor: Option<ExtractorKind>,
}

/// Query command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Include draft posts in results
    #[arg(short, long)]
    pub drafts: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let cli = Cli::try_parse_from(["diary-feed", "build"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG));
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build command");
        };
        assert!(!build_args.drafts);
        assert_eq!(build_args.minify, None);
        assert_eq!(build_args.format, None);
    }

    #[test]
    fn test_build_overrides() {
        let cli = Cli::try_parse_from([
            "diary-feed",
            "-C",
            "site/diary.toml",
            "b",
            "--drafts",
            "--minify",
            "--format",
            "atom",
            "--extractor",
            "dom",
            "-o",
            "dist",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("site/diary.toml"));
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build command");
        };
        assert!(build_args.drafts);
        assert_eq!(build_args.minify, Some(true));
        assert_eq!(build_args.format, Some(FeedFormat::Atom));
        assert_eq!(build_args.extractor, Some(ExtractorKind::Dom));
        assert_eq!(build_args.output, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_query_with_global_verbose() {
        let cli = Cli::try_parse_from(["diary-feed", "query", "--pretty", "-v"]).unwrap();
        assert!(matches!(cli.command, Commands::Query { ref args } if args.pretty));
        assert!(cli.verbose);
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_and_verbose_flags_are_distinct() {
        let cli = Cli::try_parse_from(["diary-feed", "-v", "build"]).unwrap();
        assert!(cli.verbose);

        let err = Cli::try_parse_from(["diary-feed", "-V"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["diary-feed", "build", "--format", "json"]).is_err());
    }
}
