//! Output generators.
//!
//! - **Feed**: RSS/Atom feed assembled from the post index and the
//!   rendered pages (`feed.rss` by default)

pub mod feed;
