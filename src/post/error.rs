//! Post index errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("posts directory `{}` does not exist", .0.display())]
    MissingDir(PathBuf),

    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to walk `{}`: {message}", dir.display())]
    Walk { dir: PathBuf, message: String },

    #[error("invalid front matter in `{}`: {message}", path.display())]
    FrontMatter { path: PathBuf, message: String },

    #[error("invalid date `{value}` in `{}`", path.display())]
    InvalidDate { path: PathBuf, value: String },

    #[error("invalid post index `{}`", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
