//! Precomputed JSON post index.
//!
//! The file holds a JSON array of [`PostRecord`]s, already in feed order.

use super::{IndexError, PostIndex, PostRecord};
use std::{fs, path::PathBuf};

pub struct JsonIndex {
    path: PathBuf,
}

impl JsonIndex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PostIndex for JsonIndex {
    fn posts(&self, include_drafts: bool) -> Result<Vec<PostRecord>, IndexError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| IndexError::Io(self.path.clone(), e))?;
        let mut posts: Vec<PostRecord> =
            serde_json::from_str(&content).map_err(|source| IndexError::Json {
                path: self.path.clone(),
                source,
            })?;

        if !include_drafts {
            posts.retain(|post| !post.data.draft);
        }
        Ok(posts)
    }
}
