//! Config errors and per-table validation diagnostics.
//!
//! Validation never stops at the first problem: each section pushes what it
//! finds into a [`ConfigDiagnostics`], and the report is printed grouped by
//! TOML table.

use owo_colors::OwoColorize;
use std::{fmt, io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` is not valid TOML", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config file `{}` not found", .0.display())]
    NotFound(PathBuf),

    // plain Display: the report already lists every problem
    #[error("{0}")]
    Invalid(ConfigDiagnostics),
}

/// TOML table a key lives in. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Site,
    Feed,
    Content,
}

impl Section {
    pub const fn table(self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::Feed => "build.feed",
            Self::Content => "content",
        }
    }
}

/// A validated key, e.g. `[build.feed] marker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub section: Section,
    pub key: &'static str,
}

impl Field {
    pub const fn new(section: Section, key: &'static str) -> Self {
        Self { section, key }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section.table(), self.key)
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub field: Field,
    pub message: String,
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Attach a suggestion shown under the message.
    pub fn hint(&mut self, hint: impl Into<String>) -> &mut Self {
        self.hint = Some(hint.into());
        self
    }
}

#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    entries: Vec<Diagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem with `field`.
    pub fn push(&mut self, field: Field, message: impl Into<String>) -> &mut Diagnostic {
        let index = self.entries.len();
        self.entries.push(Diagnostic {
            field,
            message: message.into(),
            hint: None,
        });
        &mut self.entries[index]
    }

    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Problems in the order they were found.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn finish(self) -> Result<(), ConfigError> {
        if self.has_errors() {
            Err(ConfigError::Invalid(self))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.entries.len();
        let noun = if count == 1 { "problem" } else { "problems" };
        write!(f, "{} ({count} {noun})", "invalid configuration".red().bold())?;

        let mut sorted: Vec<&Diagnostic> = self.entries.iter().collect();
        sorted.sort_by_key(|d| d.field.section);

        let mut current = None;
        for diag in sorted {
            if current != Some(diag.field.section) {
                current = Some(diag.field.section);
                let header = format!("[{}]", diag.field.section.table());
                write!(f, "\n{}", header.cyan().bold())?;
            }
            write!(f, "\n  {}: {}", diag.field.key, diag.message)?;
            if let Some(hint) = &diag.hint {
                write!(f, "\n    {} {hint}", "hint:".yellow())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: Field = Field::new(Section::Site, "url");
    const MARKER: Field = Field::new(Section::Feed, "marker");
    const TITLE: Field = Field::new(Section::Site, "title");

    #[test]
    fn test_field_display() {
        assert_eq!(URL.to_string(), "site.url");
        assert_eq!(MARKER.to_string(), "build.feed.marker");
    }

    #[test]
    fn test_finish_without_problems() {
        assert!(ConfigDiagnostics::new().finish().is_ok());
    }

    #[test]
    fn test_report_groups_by_table() {
        let mut diag = ConfigDiagnostics::new();
        diag.push(MARKER, "bad marker");
        diag.push(URL, "invalid URL").hint("use https://example.com");
        diag.push(TITLE, "must not be empty");

        // insertion order is kept for callers
        let fields: Vec<_> = diag.errors().iter().map(|d| d.field).collect();
        assert_eq!(fields, [MARKER, URL, TITLE]);

        let report = diag.to_string();
        assert!(report.contains("invalid configuration"));
        assert!(report.contains("(3 problems)"));
        let site = report.find("[site]").unwrap();
        let feed = report.find("[build.feed]").unwrap();
        assert!(site < feed);
        assert_eq!(report.matches("[site]").count(), 1);
        assert!(report.contains("\n  url: invalid URL\n    "));
        assert!(report.contains("hint:"));
        assert!(report.contains(" use https://example.com"));

        let Err(ConfigError::Invalid(diag)) = diag.finish() else {
            panic!("expected a validation error");
        };
        assert_eq!(diag.errors().len(), 3);
    }

    #[test]
    fn test_not_found_names_the_file() {
        let err = ConfigError::NotFound(PathBuf::from("site/diary.toml"));
        assert_eq!(err.to_string(), "config file `site/diary.toml` not found");
    }
}
