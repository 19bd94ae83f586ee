//! Site configuration management for `diary.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build], [build.feed]
//! │   ├── content    # [content]
//! │   └── site       # [site]
//! ├── error          # ConfigError, ConfigDiagnostics
//! ├── util           # config discovery, path helpers
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section        | Purpose                                            |
//! |----------------|----------------------------------------------------|
//! | `[site]`       | Feed channel metadata (title, url, image, ...)     |
//! | `[build]`      | Rendered output dir, minify                        |
//! | `[build.feed]` | Feed path, format, content extraction              |
//! | `[content]`    | Post index source (markdown dir or JSON index)     |
//!
//! The config is built once in `main` and passed by reference from there on.

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError, Field, Section};
pub use section::{BuildConfig, ContentConfig, ExtractorKind, FeedFormat, SiteInfoConfig};
pub use util::absolute_url;

use util::{find_config_file, normalize_path};

use crate::{
    cli::{BuildArgs, Cli, Commands, DEFAULT_CONFIG},
    debug, log,
};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing diary.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Channel metadata
    #[serde(default)]
    pub site: SiteInfoConfig,

    /// Build output and feed settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Post index source
    #[serde(default)]
    pub content: ContentConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. Without one, the
    /// built-in site defaults apply and the project root is cwd; an
    /// explicitly named config that does not exist is an error.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = find_config_file(&cli.config);

        let mut config = match &config_path {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                Self::from_path(path)?
            }
            None if cli.config != Path::new(DEFAULT_CONFIG) => {
                bail!(ConfigError::NotFound(cli.config.clone()));
            }
            None => {
                debug!("config"; "no {} found, using built-in site settings", DEFAULT_CONFIG);
                Self::default()
            }
        };

        let root = match &config_path {
            Some(path) => path.parent().map(Path::to_path_buf).unwrap_or_default(),
            None => std::env::current_dir().unwrap_or_default(),
        };

        config.apply_command_options(cli);
        config.normalize_paths(&root);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let (config, ignored) =
            Self::parse_with_ignored(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of the feed file.
    pub fn feed_output(&self) -> PathBuf {
        self.build.feed_output()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            // Query command doesn't modify config
            Commands::Query { .. } => {}
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.build.output, args.output.as_ref());
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.feed.format, args.format.as_ref());
        Self::update_option(&mut self.build.feed.extractor, args.extractor.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    ///
    /// `build.feed.path` stays relative; it is resolved against the output
    /// directory at write time.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);

        self.build.output = normalize_path(&root.join(&self.build.output));
        self.content.root = normalize_path(&root.join(&self.content.root));
        if let Some(index) = self.content.index.take() {
            self.content.index = Some(normalize_path(&root.join(index)));
        }

        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.build.validate(&mut diag);
        self.content.validate(&mut diag);

        Ok(diag.finish()?)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with a minimal `[site]` table; `extra` continues that table.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
